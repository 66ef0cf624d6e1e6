// src/handlers/financing.rs

use axum::{
    extract::{Path, State},
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
        gate::{ActEdit, ActView, ModFinancing, RequireModuleAccess},
    },
    models::financing::{CreateFinancingPayload, UpdateFinancingPayload},
};

#[utoipa::path(
    post,
    path = "/api/financing",
    request_body = CreateFinancingPayload,
    responses(
        (status = 201, description = "Financiamento criado", body = crate::models::financing::FinancingRecord),
        (status = 403, description = "Sem acesso ao módulo financing"),
        (status = 404, description = "Cliente ou veículo não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "financing"
)]
pub async fn create_financing(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModFinancing, ActEdit>,
    Json(payload): Json<CreateFinancingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let record = app_state.financing_repo.create(agency.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/financing",
    responses(
        (status = 200, description = "Financiamentos da agência", body = [crate::models::financing::FinancingRecord]),
    ),
    security(("bearer_auth" = [])),
    tag = "financing"
)]
pub async fn list_financing(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModFinancing, ActView>,
) -> Result<impl IntoResponse, AppError> {
    let records = app_state.financing_repo.list_by_agency(agency.0).await?;
    Ok((StatusCode::OK, Json(records)))
}

#[utoipa::path(
    get,
    path = "/api/financing/{id}",
    params(("id" = Uuid, Path, description = "ID do financiamento")),
    responses(
        (status = 200, description = "Financiamento", body = crate::models::financing::FinancingRecord),
        (status = 404, description = "Financiamento não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "financing"
)]
pub async fn get_financing(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModFinancing, ActView>,
    Path(record_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state
        .financing_repo
        .find_by_id(agency.0, record_id)
        .await?
        .ok_or(AppError::ResourceNotFound("Financiamento"))?;

    Ok((StatusCode::OK, Json(record)))
}

/// Atualiza o status do contrato ou o valor da parcela (renegociação).
#[utoipa::path(
    patch,
    path = "/api/financing/{id}",
    params(("id" = Uuid, Path, description = "ID do financiamento")),
    request_body = UpdateFinancingPayload,
    responses(
        (status = 200, description = "Financiamento atualizado", body = crate::models::financing::FinancingRecord),
        (status = 404, description = "Financiamento não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "financing"
)]
pub async fn update_financing(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModFinancing, ActEdit>,
    Path(record_id): Path<Uuid>,
    Json(payload): Json<UpdateFinancingPayload>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state
        .financing_repo
        .update(agency.0, record_id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(record)))
}
