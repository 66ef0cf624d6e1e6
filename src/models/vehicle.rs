// src/models/vehicle.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Sold,
}

// O "semáforo" de envelhecimento: derivado de created_at vs limiares da
// agência, recalculado a cada consulta, nunca persistido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockAgeStatus {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,

    #[schema(ignore)]
    pub agency_id: Uuid,

    #[schema(example = "Toyota")]
    pub brand: String,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = 2021)]
    pub year: Option<i32>,
    #[schema(example = "AB123CD")]
    pub plate: Option<String>,
    pub vin: Option<String>,

    #[schema(example = "18500000.00")]
    pub price: Decimal,
    pub mileage: Option<i32>,
    pub color: Option<String>,

    pub status: VehicleStatus,

    // URLs devolvidas pelo colaborador de armazenamento de objetos
    pub photo_urls: Vec<String>,

    // Data de entrada em estoque (entrada do semáforo)
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Veículo + dias em estoque + cor do semáforo, como a listagem devolve.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleView {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub days_in_stock: i64,
    pub stock_age: StockAgeStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateVehiclePayload {
    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub brand: String,

    #[validate(length(min = 1, message = "O modelo é obrigatório."))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100, message = "Ano inválido."))]
    pub year: Option<i32>,

    pub plate: Option<String>,
    pub vin: Option<String>,

    #[serde(default)]
    pub price: Decimal,

    pub mileage: Option<i32>,
    pub color: Option<String>,

    #[serde(default)]
    pub photo_urls: Vec<String>,
}

// Patch parcial: só os campos presentes são alterados.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateVehiclePayload {
    pub brand: Option<String>,
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100, message = "Ano inválido."))]
    pub year: Option<i32>,

    pub plate: Option<String>,
    pub vin: Option<String>,
    pub price: Option<Decimal>,
    pub mileage: Option<i32>,
    pub color: Option<String>,
    pub status: Option<VehicleStatus>,
    pub photo_urls: Option<Vec<String>>,
}

// Filtro da listagem: ?stockAge=green|yellow|red
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListQuery {
    pub stock_age: Option<StockAgeStatus>,
}
