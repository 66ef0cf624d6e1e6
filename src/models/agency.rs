// src/models/agency.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Ciclo de vida do tenant: nasce 'pending' no cadastro e só o
// super_admin move para 'active' ou 'blocked'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "agency_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AgencyStatus {
    Pending,
    Active,
    Blocked,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub id: Uuid,

    #[schema(example = "Automotores del Sur")]
    pub name: String,

    pub legal_name: Option<String>,

    #[schema(example = "30-12345678-9")]
    pub tax_id: Option<String>,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,

    pub status: AgencyStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Limiares do "semáforo" de envelhecimento de estoque, por agência.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgencySettings {
    #[schema(ignore)]
    pub agency_id: Uuid,

    #[schema(example = 60)]
    pub stock_yellow_days: i32,

    #[schema(example = 90)]
    pub stock_red_days: i32,

    pub updated_at: DateTime<Utc>,
}

impl AgencySettings {
    // Valores usados quando a agência ainda não salvou configurações.
    pub fn defaults(agency_id: Uuid) -> Self {
        Self {
            agency_id,
            stock_yellow_days: 60,
            stock_red_days: 90,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateAgencyStatusPayload {
    pub status: AgencyStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateStockSettingsPayload {
    #[schema(example = 60)]
    pub stock_yellow_days: i32,
    #[schema(example = 90)]
    pub stock_red_days: i32,
}
