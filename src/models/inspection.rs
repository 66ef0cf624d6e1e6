// src/models/inspection.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Peritagem de um veículo. O PDF em si é renderizado por um colaborador
// externo; aqui guardamos apenas a URL resultante.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: Uuid,

    #[schema(ignore)]
    pub agency_id: Uuid,

    pub vehicle_id: Uuid,

    #[schema(example = "Carlos Gómez")]
    pub inspector_name: String,

    #[schema(value_type = String, format = Date, example = "2025-05-20")]
    pub inspected_at: NaiveDate,

    pub notes: Option<String>,
    pub photo_urls: Vec<String>,
    pub pdf_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateInspectionPayload {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, message = "O nome do perito é obrigatório."))]
    pub inspector_name: String,

    #[schema(value_type = String, format = Date)]
    pub inspected_at: NaiveDate,

    pub notes: Option<String>,

    #[serde(default)]
    pub photo_urls: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateInspectionPayload {
    pub notes: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    // Preenchido quando o colaborador de PDF devolve a URL gerada
    pub pdf_url: Option<String>,
}
