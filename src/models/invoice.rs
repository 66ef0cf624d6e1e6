// src/models/invoice.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    A,
    B,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Authorized,
    Rejected,
}

// Cabeçalho de fatura eletrônica. O tráfego SOAP com a AFIP é um
// colaborador externo; CAE e vencimento do CAE chegam prontos.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,

    #[schema(ignore)]
    pub agency_id: Uuid,

    pub client_id: Option<Uuid>,

    pub invoice_type: InvoiceType,

    #[schema(example = 3)]
    pub point_of_sale: i32,

    #[schema(example = 1042)]
    pub number: i64,

    #[schema(example = "20-23456789-0")]
    pub client_tax_id: Option<String>,

    #[schema(example = "100000.00")]
    pub net_amount: Decimal,
    #[schema(example = "21000.00")]
    pub tax_amount: Decimal,
    #[schema(example = "121000.00")]
    pub total_amount: Decimal,

    pub cae: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub cae_expiry: Option<NaiveDate>,

    pub status: InvoiceStatus,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateInvoicePayload {
    pub client_id: Option<Uuid>,

    pub invoice_type: InvoiceType,

    #[validate(range(min = 1, message = "O ponto de venda deve ser positivo."))]
    pub point_of_sale: i32,

    #[validate(range(min = 1, message = "O número da fatura deve ser positivo."))]
    pub number: i64,

    pub client_tax_id: Option<String>,

    #[serde(default)]
    pub net_amount: Decimal,
    #[serde(default)]
    pub tax_amount: Decimal,
}

// Resultado da autorização devolvido pelo colaborador AFIP.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateInvoicePayload {
    pub cae: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub cae_expiry: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
}
