// src/models/financing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "financing_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FinancingStatus {
    Active,
    Completed,
    Defaulted,
}

// Acompanhamento de uma venda financiada: cliente + veículo + parcelas.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancingRecord {
    pub id: Uuid,

    #[schema(ignore)]
    pub agency_id: Uuid,

    pub client_id: Uuid,
    pub vehicle_id: Uuid,

    #[schema(example = "12000000.00")]
    pub total_amount: Decimal,

    #[schema(example = 24)]
    pub installments: i32,

    #[schema(example = "500000.00")]
    pub installment_amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-04-01")]
    pub start_date: NaiveDate,

    pub status: FinancingStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateFinancingPayload {
    pub client_id: Uuid,
    pub vehicle_id: Uuid,

    #[serde(default)]
    pub total_amount: Decimal,

    #[validate(range(min = 1, max = 120, message = "A quantidade de parcelas deve estar entre 1 e 120."))]
    pub installments: i32,

    #[serde(default)]
    pub installment_amount: Decimal,

    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateFinancingPayload {
    pub status: Option<FinancingStatus>,
    pub installment_amount: Option<Decimal>,
}
