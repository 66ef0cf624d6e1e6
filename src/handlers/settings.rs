// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{agency::AgencyContext, auth::RequireAgencyAdmin},
    models::agency::UpdateStockSettingsPayload,
};

// GET /api/settings/stock
#[utoipa::path(
    get,
    path = "/api/settings/stock",
    responses(
        (status = 200, description = "Limiares do semáforo", body = crate::models::agency::AgencySettings),
    ),
    security(("bearer_auth" = [])),
    tag = "settings"
)]
pub async fn get_stock_settings(
    State(app_state): State<AppState>,
    _admin: RequireAgencyAdmin,
    agency: AgencyContext,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.stock_service.get_settings(agency.0).await?;
    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings/stock
#[utoipa::path(
    put,
    path = "/api/settings/stock",
    request_body = UpdateStockSettingsPayload,
    responses(
        (status = 200, description = "Limiares atualizados", body = crate::models::agency::AgencySettings),
        (status = 400, description = "Limiar vermelho não é maior que o amarelo"),
    ),
    security(("bearer_auth" = [])),
    tag = "settings"
)]
pub async fn update_stock_settings(
    State(app_state): State<AppState>,
    _admin: RequireAgencyAdmin,
    agency: AgencyContext,
    Json(payload): Json<UpdateStockSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state
        .stock_service
        .update_settings(agency.0, &payload)
        .await?;

    Ok((StatusCode::OK, Json(settings)))
}
