// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "subscription_plan", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Basic,
    Premium,
    Enterprise,
}

impl SubscriptionPlan {
    // Tabela de preços fixa (USD/mês). Configuração imutável: vive no
    // código, não em tabela mutável em runtime.
    pub fn monthly_price(&self) -> Decimal {
        match self {
            SubscriptionPlan::Basic => Decimal::from(30),
            SubscriptionPlan::Premium => Decimal::from(70),
            SubscriptionPlan::Enterprise => Decimal::from(100),
        }
    }
}

// Classificação derivada de um registro de pagamento. Nunca persistida:
// é recalculada a cada leitura a partir de is_paid + due_date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Overdue,
    Upcoming,
    Pending,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,

    #[schema(ignore)]
    pub agency_id: Uuid,

    pub plan: SubscriptionPlan,

    // Dia do mês em que vence a fatura (1..=31, ajustado ao fim do mês)
    #[schema(example = 10)]
    pub billing_day: i32,

    #[schema(example = "transferencia")]
    pub payment_method: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// A obrigação de cobrança de uma agência para um mês-calendário.
// Criado pela geração (manual ou backfill); nunca deletado (auditoria).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    pub agency_id: Uuid,
    pub subscription_id: Uuid,

    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: i32,

    // Valor base (preço do plano no momento da geração)
    #[schema(example = "70.00")]
    pub amount: Decimal,
    #[schema(example = "0.00")]
    pub extra_amount: Decimal,
    #[schema(example = "0.00")]
    pub discount_amount: Decimal,
    // Sempre = amount + extra_amount - discount_amount
    #[schema(example = "70.00")]
    pub total_amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-03-10")]
    pub due_date: NaiveDate,

    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Registro + status derivado, como o admin vê nas listagens.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecordView {
    #[serde(flatten)]
    pub record: PaymentRecord,
    pub status: PaymentStatus,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpsertSubscriptionPayload {
    pub plan: SubscriptionPlan,

    #[validate(range(min = 1, max = 31, message = "O dia de cobrança deve estar entre 1 e 31."))]
    pub billing_day: i32,

    pub payment_method: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateMonthPayload {
    #[validate(range(min = 1, max = 12, message = "O mês deve estar entre 1 e 12."))]
    pub month: i32,

    #[validate(range(min = 2000, max = 2100, message = "O ano está fora do intervalo aceito."))]
    pub year: i32,
}

// Patch parcial: só os campos presentes são alterados.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePaymentRecordPayload {
    pub extra_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub is_paid: Option<bool>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateDebtPayload {
    #[schema(value_type = String, format = Date, example = "2025-06-05")]
    pub next_due_date: NaiveDate,

    #[validate(range(min = 1, max = 36, message = "A quantidade de meses deve estar entre 1 e 36."))]
    pub months_to_generate: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    // Quantos registros foram efetivamente criados (agências já cobradas
    // no mês são puladas, não são erro)
    pub generated: i64,
}
