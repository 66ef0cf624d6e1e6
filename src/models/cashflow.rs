// src/models/cashflow.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashflowTransaction {
    pub id: Uuid,

    #[schema(ignore)]
    pub agency_id: Uuid,

    pub kind: TransactionKind,

    #[schema(example = "150000.00")]
    pub amount: Decimal,

    #[schema(example = "ARS")]
    pub currency: String,

    #[schema(example = "Venta de vehículo")]
    pub category: Option<String>,
    pub description: Option<String>,

    #[schema(value_type = String, format = Date, example = "2025-03-15")]
    pub occurred_on: NaiveDate,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTransactionPayload {
    pub kind: TransactionKind,

    #[serde(default)]
    pub amount: Decimal,

    #[serde(default = "default_currency")]
    pub currency: String,

    pub category: Option<String>,
    pub description: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub occurred_on: NaiveDate,
}

fn default_currency() -> String {
    "ARS".to_string()
}

// Filtro da listagem: intervalo de datas opcional
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    #[schema(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
}

// Resumo do módulo "balances": derivado das transações, nunca persistido.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    #[schema(example = "500000.00")]
    pub total_income: Decimal,
    #[schema(example = "120000.00")]
    pub total_expense: Decimal,
    #[schema(example = "380000.00")]
    pub net: Decimal,
}
