// src/handlers/cashflow.rs

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
        gate::{ActDelete, ActEdit, ActView, ModBalances, ModCashflow, RequireModuleAccess},
    },
    models::cashflow::{CreateTransactionPayload, TransactionListQuery},
};

#[utoipa::path(
    post,
    path = "/api/cashflow",
    request_body = CreateTransactionPayload,
    responses(
        (status = 201, description = "Lançamento criado", body = crate::models::cashflow::CashflowTransaction),
        (status = 403, description = "Sem acesso ao módulo cashflow"),
    ),
    security(("bearer_auth" = [])),
    tag = "cashflow"
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModCashflow, ActEdit>,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state.cashflow_repo.create(agency.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    get,
    path = "/api/cashflow",
    params(
        ("from" = Option<String>, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Data final (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Lançamentos do período", body = [crate::models::cashflow::CashflowTransaction]),
    ),
    security(("bearer_auth" = [])),
    tag = "cashflow"
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModCashflow, ActView>,
    Query(query): Query<TransactionListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = app_state
        .cashflow_repo
        .list_by_agency(agency.0, query.from, query.to)
        .await?;

    Ok((StatusCode::OK, Json(transactions)))
}

#[utoipa::path(
    delete,
    path = "/api/cashflow/{id}",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 204, description = "Lançamento removido"),
        (status = 404, description = "Lançamento não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "cashflow"
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModCashflow, ActDelete>,
    Path(transaction_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.cashflow_repo.delete(agency.0, transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// O módulo "balances": totais derivados do caixa. Gate próprio — uma
/// agência pode ter cashflow habilitado e balances não (ou vice-versa).
#[utoipa::path(
    get,
    path = "/api/cashflow/balance",
    params(
        ("from" = Option<String>, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Data final (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Resumo de entradas/saídas", body = crate::models::cashflow::BalanceSummary),
        (status = 403, description = "Sem acesso ao módulo balances"),
    ),
    security(("bearer_auth" = [])),
    tag = "cashflow"
)]
pub async fn get_balance(
    State(app_state): State<AppState>,
    agency: AgencyContext,
    _gate: RequireModuleAccess<ModBalances, ActView>,
    Query(query): Query<TransactionListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .cashflow_repo
        .balance_summary(agency.0, query.from, query.to)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}
