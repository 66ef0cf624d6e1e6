// src/handlers/vehicles.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        agency::AgencyContext,
        gate::{ActDelete, ActEdit, ActView, ModStock, RequireModuleAccess},
    },
    models::vehicle::{
        CreateVehiclePayload, UpdateVehiclePayload, VehicleListQuery,
    },
};

#[utoipa::path(
    post,
    path = "/api/stock/vehicles",
    request_body = CreateVehiclePayload,
    responses(
        (status = 201, description = "Veículo criado", body = crate::models::vehicle::Vehicle),
        (status = 403, description = "Sem acesso ao módulo stock"),
    ),
    security(("bearer_auth" = [])),
    tag = "stock"
)]
pub async fn create_vehicle(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModStock, ActEdit>,
    Json(payload): Json<CreateVehiclePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vehicle = app_state.vehicle_repo.create(agency.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Listagem do estoque com o semáforo (verde/amarelo/vermelho) calculado
/// na hora, com filtro opcional ?stockAge=.
#[utoipa::path(
    get,
    path = "/api/stock/vehicles",
    params(("stockAge" = Option<crate::models::vehicle::StockAgeStatus>, Query, description = "Filtro do semáforo")),
    responses(
        (status = 200, description = "Estoque classificado", body = [crate::models::vehicle::VehicleView]),
        (status = 403, description = "Sem acesso ao módulo stock"),
    ),
    security(("bearer_auth" = [])),
    tag = "stock"
)]
pub async fn list_vehicles(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModStock, ActView>,
    Query(query): Query<VehicleListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let vehicles = app_state
        .stock_service
        .list_vehicles(agency.0, query.stock_age)
        .await?;

    Ok((StatusCode::OK, Json(vehicles)))
}

#[utoipa::path(
    get,
    path = "/api/stock/vehicles/{id}",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Veículo classificado", body = crate::models::vehicle::VehicleView),
        (status = 404, description = "Veículo não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "stock"
)]
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModStock, ActView>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let vehicle = app_state.stock_service.get_vehicle(agency.0, vehicle_id).await?;
    Ok((StatusCode::OK, Json(vehicle)))
}

#[utoipa::path(
    patch,
    path = "/api/stock/vehicles/{id}",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    request_body = UpdateVehiclePayload,
    responses(
        (status = 200, description = "Veículo atualizado", body = crate::models::vehicle::Vehicle),
        (status = 404, description = "Veículo não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "stock"
)]
pub async fn update_vehicle(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModStock, ActEdit>,
    Path(vehicle_id): Path<Uuid>,
    Json(payload): Json<UpdateVehiclePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vehicle = app_state
        .vehicle_repo
        .update(agency.0, vehicle_id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(vehicle)))
}

#[utoipa::path(
    delete,
    path = "/api/stock/vehicles/{id}",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 204, description = "Veículo removido"),
        (status = 403, description = "Sem permissão de exclusão"),
        (status = 404, description = "Veículo não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "stock"
)]
pub async fn delete_vehicle(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModStock, ActDelete>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.vehicle_repo.delete(agency.0, vehicle_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
