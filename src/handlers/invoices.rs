// src/handlers/invoices.rs

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
        gate::{ActEdit, ActView, ModInvoicing, RequireModuleAccess},
    },
    models::invoice::{CreateInvoicePayload, UpdateInvoicePayload},
};

#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Fatura criada em rascunho", body = crate::models::invoice::Invoice),
        (status = 409, description = "Número já usado nesse ponto de venda"),
    ),
    security(("bearer_auth" = [])),
    tag = "invoices"
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModInvoicing, ActEdit>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // O total é sempre derivado, nunca aceito do cliente
    let total_amount = payload.net_amount + payload.tax_amount;

    let invoice = app_state
        .invoice_repo
        .create(agency.0, &payload, total_amount)
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

#[utoipa::path(
    get,
    path = "/api/invoices",
    responses(
        (status = 200, description = "Faturas da agência", body = [crate::models::invoice::Invoice]),
    ),
    security(("bearer_auth" = [])),
    tag = "invoices"
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModInvoicing, ActView>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.invoice_repo.list_by_agency(agency.0).await?;
    Ok((StatusCode::OK, Json(invoices)))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura", body = crate::models::invoice::Invoice),
        (status = 404, description = "Fatura não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "invoices"
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModInvoicing, ActView>,
    Path(invoice_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_repo
        .find_by_id(agency.0, invoice_id)
        .await?
        .ok_or(AppError::ResourceNotFound("Fatura"))?;

    Ok((StatusCode::OK, Json(invoice)))
}

/// Registra o resultado da autorização fiscal (CAE, vencimento, status).
#[utoipa::path(
    patch,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    request_body = UpdateInvoicePayload,
    responses(
        (status = 200, description = "Fatura atualizada", body = crate::models::invoice::Invoice),
        (status = 404, description = "Fatura não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "invoices"
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModInvoicing, ActEdit>,
    Path(invoice_id): Path<Uuid>,
    Json(payload): Json<UpdateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_repo
        .update(agency.0, invoice_id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(invoice)))
}
