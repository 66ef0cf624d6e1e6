// src/handlers/inspections.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        agency::AgencyContext,
        gate::{ActEdit, ActView, ModStock, RequireModuleAccess},
    },
    models::inspection::{CreateInspectionPayload, UpdateInspectionPayload},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionListQuery {
    pub vehicle_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/inspections",
    request_body = CreateInspectionPayload,
    responses(
        (status = 201, description = "Peritagem registrada", body = crate::models::inspection::Inspection),
        (status = 404, description = "Veículo não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "inspections"
)]
pub async fn create_inspection(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModStock, ActEdit>,
    Json(payload): Json<CreateInspectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let inspection = app_state.inspection_repo.create(agency.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(inspection)))
}

#[utoipa::path(
    get,
    path = "/api/inspections",
    params(("vehicleId" = Option<Uuid>, Query, description = "Filtra por veículo")),
    responses(
        (status = 200, description = "Peritagens da agência", body = [crate::models::inspection::Inspection]),
    ),
    security(("bearer_auth" = [])),
    tag = "inspections"
)]
pub async fn list_inspections(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModStock, ActView>,
    Query(query): Query<InspectionListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let inspections = app_state
        .inspection_repo
        .list_by_agency(agency.0, query.vehicle_id)
        .await?;

    Ok((StatusCode::OK, Json(inspections)))
}

/// Anexa notas, fotos ou a URL do PDF gerado externamente.
#[utoipa::path(
    patch,
    path = "/api/inspections/{id}",
    params(("id" = Uuid, Path, description = "ID da peritagem")),
    request_body = UpdateInspectionPayload,
    responses(
        (status = 200, description = "Peritagem atualizada", body = crate::models::inspection::Inspection),
        (status = 404, description = "Peritagem não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "inspections"
)]
pub async fn update_inspection(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModStock, ActEdit>,
    Path(inspection_id): Path<Uuid>,
    Json(payload): Json<UpdateInspectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let inspection = app_state
        .inspection_repo
        .update(agency.0, inspection_id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(inspection)))
}
