// src/handlers/clients.rs

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
        gate::{ActDelete, ActEdit, ActView, ModClients, RequireModuleAccess},
    },
    models::client::{CreateClientPayload, UpdateClientPayload},
};

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = crate::models::client::Client),
        (status = 403, description = "Sem acesso ao módulo clients"),
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModClients, ActEdit>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state.client_repo.create(agency.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    get,
    path = "/api/clients",
    responses(
        (status = 200, description = "Clientes da agência", body = [crate::models::client::Client]),
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModClients, ActView>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_repo.list_by_agency(agency.0).await?;
    Ok((StatusCode::OK, Json(clients)))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = crate::models::client::Client),
        (status = 404, description = "Cliente não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModClients, ActView>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state
        .client_repo
        .find_by_id(agency.0, client_id)
        .await?
        .ok_or(AppError::ResourceNotFound("Cliente"))?;

    Ok((StatusCode::OK, Json(client)))
}

#[utoipa::path(
    patch,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = crate::models::client::Client),
        (status = 404, description = "Cliente não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModClients, ActEdit>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_repo
        .update(agency.0, client_id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "clients"
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModClients, ActDelete>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_repo.delete(agency.0, client_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
