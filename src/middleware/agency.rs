// src/middleware/agency.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{agency::AgencyStatus, auth::UserRole},
};

// Cabeçalho que o super_admin usa para agir "como" uma agência específica
const AGENCY_ID_HEADER: &str = "x-agency-id";

// O contexto de tenant da requisição: em qual agência o chamador opera.
// Para agency_admin/agency_user vem do próprio usuário; o super_admin
// indica a agência via cabeçalho.
#[derive(Debug, Clone, Copy)]
pub struct AgencyContext(pub Uuid);

impl<S> FromRequestParts<S> for AgencyContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Já resolvido nesta requisição (ex.: pelo gate)? Reaproveita.
        // O cache dura só o escopo da requisição.
        if let Some(ctx) = parts.extensions.get::<AgencyContext>() {
            return Ok(*ctx);
        }

        let app_state = AppState::from_ref(state);

        let AuthenticatedUser(user) = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        let agency_id = match user.role {
            UserRole::SuperAdmin => {
                let header_value = parts
                    .headers
                    .get(AGENCY_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| {
                        AppError::Forbidden(
                            "O cabeçalho X-Agency-ID é obrigatório para o super_admin.".into(),
                        )
                    })?;

                Uuid::parse_str(header_value).map_err(|_| {
                    AppError::Forbidden("Cabeçalho X-Agency-ID inválido (não é um UUID).".into())
                })?
            }
            _ => user.agency_id.ok_or_else(|| {
                AppError::Forbidden("Usuário sem agência associada.".into())
            })?,
        };

        // Agências pending/blocked não operam; o super_admin é isento.
        let agency = app_state
            .agency_repo
            .find_by_id(agency_id)
            .await?
            .ok_or(AppError::AgencyNotFound)?;

        if user.role != UserRole::SuperAdmin && agency.status != AgencyStatus::Active {
            return Err(AppError::AgencyNotActive);
        }

        let ctx = AgencyContext(agency.id);
        parts.extensions.insert(ctx);
        Ok(ctx)
    }
}
