// src/handlers/users.rs
//
// Gestão de usuários da agência, pelo agency_admin: criar agency_users,
// listar, desativar (nunca deletar) e conceder permissões finas.

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
    middleware::{agency::AgencyContext, auth::RequireAgencyAdmin},
    models::{auth::CreateAgencyUserPayload, modules::SetPermissionPayload},
};

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateAgencyUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = crate::models::auth::User),
        (status = 403, description = "Não é administrador da agência"),
        (status = 409, description = "E-mail já em uso"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn create_agency_user(
    State(app_state): State<AppState>,
    _admin: RequireAgencyAdmin,
    agency: AgencyContext,
    Json(payload): Json<CreateAgencyUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state
        .auth_service
        .create_agency_user(agency.0, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Usuários da agência", body = [crate::models::auth::User]),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_agency_users(
    State(app_state): State<AppState>,
    _admin: RequireAgencyAdmin,
    agency: AgencyContext,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_repo.list_by_agency(agency.0).await?;
    Ok((StatusCode::OK, Json(users)))
}

/// Desativação lógica: o usuário some do login, mas o histórico que ele
/// produziu continua referenciável.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário desativado"),
        (status = 404, description = "Usuário não encontrado na agência"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn deactivate_user(
    State(app_state): State<AppState>,
    _admin: RequireAgencyAdmin,
    agency: AgencyContext,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_repo.deactivate(user_id, agency.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/permissions",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = SetPermissionPayload,
    responses(
        (status = 200, description = "Permissão gravada", body = crate::models::modules::UserModulePermission),
        (status = 403, description = "Alvo não é agency_user"),
        (status = 404, description = "Usuário não encontrado na agência"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn set_user_permission(
    State(app_state): State<AppState>,
    _admin: RequireAgencyAdmin,
    agency: AgencyContext,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SetPermissionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let permission = app_state
        .entitlement_service
        .set_user_permission(
            agency.0,
            user_id,
            payload.module,
            payload.can_view,
            payload.can_edit,
            payload.can_delete,
        )
        .await?;

    Ok((StatusCode::OK, Json(permission)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/permissions",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Permissões do usuário", body = [crate::models::modules::UserModulePermission]),
        (status = 404, description = "Usuário não encontrado na agência"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_user_permissions(
    State(app_state): State<AppState>,
    _admin: RequireAgencyAdmin,
    agency: AgencyContext,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let permissions = app_state
        .entitlement_service
        .list_user_permissions(agency.0, user_id)
        .await?;

    Ok((StatusCode::OK, Json(permissions)))
}
