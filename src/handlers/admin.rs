// src/handlers/admin.rs
//
// Painel da plataforma (super_admin): ciclo de vida das agências,
// assinaturas, habilitação de módulos e os registros de cobrança.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{field_validation_error, AppError},
    config::AppState,
    middleware::auth::RequireSuperAdmin,
    models::{
        agency::UpdateAgencyStatusPayload,
        billing::{
            GenerateDebtPayload, GenerateMonthPayload, GenerationResult,
            UpdatePaymentRecordPayload, UpsertSubscriptionPayload,
        },
        modules::ManagementModule,
    },
};

// ---
// Agências
// ---

#[utoipa::path(
    get,
    path = "/api/admin/agencies",
    responses(
        (status = 200, description = "Todas as agências", body = [crate::models::agency::Agency]),
        (status = 403, description = "Não é super_admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_agencies(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
) -> Result<impl IntoResponse, AppError> {
    let agencies = app_state.agency_repo.list_all().await?;
    Ok((StatusCode::OK, Json(agencies)))
}

/// Ativa ou bloqueia uma agência. É a única forma de sair de 'pending'.
#[utoipa::path(
    patch,
    path = "/api/admin/agencies/{id}/status",
    params(("id" = Uuid, Path, description = "ID da agência")),
    request_body = UpdateAgencyStatusPayload,
    responses(
        (status = 200, description = "Agência atualizada", body = crate::models::agency::Agency),
        (status = 404, description = "Agência não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn update_agency_status(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
    Path(agency_id): Path<Uuid>,
    Json(payload): Json<UpdateAgencyStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let agency = app_state
        .agency_repo
        .update_status(agency_id, payload.status)
        .await?;

    tracing::info!("🏢 Agência {} agora está {:?}", agency.id, agency.status);
    Ok((StatusCode::OK, Json(agency)))
}

// ---
// Assinaturas
// ---

#[utoipa::path(
    put,
    path = "/api/admin/agencies/{id}/subscription",
    params(("id" = Uuid, Path, description = "ID da agência")),
    request_body = UpsertSubscriptionPayload,
    responses(
        (status = 200, description = "Assinatura criada/atualizada", body = crate::models::billing::Subscription),
        (status = 404, description = "Agência não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn upsert_subscription(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
    Path(agency_id): Path<Uuid>,
    Json(payload): Json<UpsertSubscriptionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .agency_repo
        .find_by_id(agency_id)
        .await?
        .ok_or(AppError::AgencyNotFound)?;

    let subscription = app_state
        .billing_repo
        .upsert_subscription(
            agency_id,
            payload.plan,
            payload.billing_day,
            payload.payment_method.as_deref(),
            payload.is_active,
        )
        .await?;

    Ok((StatusCode::OK, Json(subscription)))
}

// ---
// Módulos
// ---

#[utoipa::path(
    post,
    path = "/api/admin/agencies/{id}/modules/{module}/enable",
    params(
        ("id" = Uuid, Path, description = "ID da agência"),
        ("module" = ManagementModule, Path, description = "Módulo do catálogo"),
    ),
    responses(
        (status = 200, description = "Módulo habilitado (idempotente)", body = crate::models::modules::AgencyModule),
        (status = 404, description = "Agência não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn enable_module(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
    Path((agency_id, module)): Path<(Uuid, ManagementModule)>,
) -> Result<impl IntoResponse, AppError> {
    let row = app_state
        .entitlement_service
        .enable_module(agency_id, module)
        .await?;
    Ok((StatusCode::OK, Json(row)))
}

/// Desabilitar não apaga dados do módulo: só passa a negar no gate.
#[utoipa::path(
    post,
    path = "/api/admin/agencies/{id}/modules/{module}/disable",
    params(
        ("id" = Uuid, Path, description = "ID da agência"),
        ("module" = ManagementModule, Path, description = "Módulo do catálogo"),
    ),
    responses(
        (status = 200, description = "Módulo desabilitado", body = crate::models::modules::AgencyModule),
        (status = 404, description = "Agência não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn disable_module(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
    Path((agency_id, module)): Path<(Uuid, ManagementModule)>,
) -> Result<impl IntoResponse, AppError> {
    let row = app_state
        .entitlement_service
        .disable_module(agency_id, module)
        .await?;
    Ok((StatusCode::OK, Json(row)))
}

/// O catálogo completo de módulos (fechado, definido em código).
#[utoipa::path(
    get,
    path = "/api/admin/modules",
    responses(
        (status = 200, description = "Catálogo de módulos", body = [ManagementModule]),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_module_catalog(_admin: RequireSuperAdmin) -> impl IntoResponse {
    (StatusCode::OK, Json(ManagementModule::ALL))
}

#[utoipa::path(
    get,
    path = "/api/admin/agencies/{id}/modules",
    params(("id" = Uuid, Path, description = "ID da agência")),
    responses(
        (status = 200, description = "Módulos habilitados", body = [crate::models::modules::AgencyModule]),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_agency_modules(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
    Path(agency_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let modules = app_state.entitlement_service.list_enabled(agency_id).await?;
    Ok((StatusCode::OK, Json(modules)))
}

// ---
// Registros de pagamento
// ---

#[utoipa::path(
    post,
    path = "/api/admin/payment-records/generate",
    request_body = GenerateMonthPayload,
    responses(
        (status = 200, description = "Quantidade de registros criados", body = GenerationResult),
        (status = 400, description = "Mês/ano inválidos"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn generate_payment_records(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
    Json(payload): Json<GenerateMonthPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let generated = app_state
        .billing_service
        .generate_for_month(payload.month, payload.year)
        .await?;

    Ok((StatusCode::OK, Json(GenerationResult { generated })))
}

#[utoipa::path(
    patch,
    path = "/api/admin/payment-records/{id}",
    params(("id" = Uuid, Path, description = "ID do registro")),
    request_body = UpdatePaymentRecordPayload,
    responses(
        (status = 200, description = "Registro atualizado", body = crate::models::billing::PaymentRecordView),
        (status = 404, description = "Registro não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn update_payment_record(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
    Path(record_id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentRecordPayload>,
) -> Result<impl IntoResponse, AppError> {
    // Ajustes não podem ser negativos (desconto já subtrai)
    if payload.extra_amount.is_some_and(|v| v.is_sign_negative()) {
        return Err(field_validation_error(
            "extraAmount",
            "range",
            "O valor extra não pode ser negativo.",
        ));
    }
    if payload.discount_amount.is_some_and(|v| v.is_sign_negative()) {
        return Err(field_validation_error(
            "discountAmount",
            "range",
            "O desconto não pode ser negativo.",
        ));
    }

    let record = app_state
        .billing_service
        .update_record(record_id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/admin/agencies/{id}/payment-records",
    params(("id" = Uuid, Path, description = "ID da agência")),
    responses(
        (status = 200, description = "Registros com status derivado", body = [crate::models::billing::PaymentRecordView]),
        (status = 404, description = "Agência não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_agency_payment_records(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
    Path(agency_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let records = app_state.billing_service.list_agency_records(agency_id).await?;
    Ok((StatusCode::OK, Json(records)))
}

#[utoipa::path(
    post,
    path = "/api/admin/agencies/{id}/debt",
    params(("id" = Uuid, Path, description = "ID da agência")),
    request_body = GenerateDebtPayload,
    responses(
        (status = 200, description = "Registros de dívida criados", body = [crate::models::billing::PaymentRecordView]),
        (status = 404, description = "Agência ou assinatura não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn generate_debt(
    State(app_state): State<AppState>,
    _admin: RequireSuperAdmin,
    Path(agency_id): Path<Uuid>,
    Json(payload): Json<GenerateDebtPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let records = app_state
        .billing_service
        .generate_debt_records(agency_id, &payload)
        .await?;

    Ok((StatusCode::OK, Json(records)))
}
