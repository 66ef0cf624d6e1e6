// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users ---
        handlers::users::create_agency_user,
        handlers::users::list_agency_users,
        handlers::users::deactivate_user,
        handlers::users::set_user_permission,
        handlers::users::list_user_permissions,

        // --- Admin ---
        handlers::admin::list_agencies,
        handlers::admin::update_agency_status,
        handlers::admin::upsert_subscription,
        handlers::admin::list_module_catalog,
        handlers::admin::enable_module,
        handlers::admin::disable_module,
        handlers::admin::list_agency_modules,
        handlers::admin::generate_payment_records,
        handlers::admin::update_payment_record,
        handlers::admin::list_agency_payment_records,
        handlers::admin::generate_debt,

        // --- Stock ---
        handlers::vehicles::create_vehicle,
        handlers::vehicles::list_vehicles,
        handlers::vehicles::get_vehicle,
        handlers::vehicles::update_vehicle,
        handlers::vehicles::delete_vehicle,

        // --- Settings ---
        handlers::settings::get_stock_settings,
        handlers::settings::update_stock_settings,

        // --- Clients ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Cashflow ---
        handlers::cashflow::create_transaction,
        handlers::cashflow::list_transactions,
        handlers::cashflow::delete_transaction,
        handlers::cashflow::get_balance,

        // --- Financing ---
        handlers::financing::create_financing,
        handlers::financing::list_financing,
        handlers::financing::get_financing,
        handlers::financing::update_financing,

        // --- Inspections ---
        handlers::inspections::create_inspection,
        handlers::inspections::list_inspections,
        handlers::inspections::update_inspection,

        // --- Invoices ---
        handlers::invoices::create_invoice,
        handlers::invoices::list_invoices,
        handlers::invoices::get_invoice,
        handlers::invoices::update_invoice,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterAgencyPayload,
            models::auth::LoginUserPayload,
            models::auth::CreateAgencyUserPayload,
            models::auth::AuthResponse,

            // --- Agências ---
            models::agency::AgencyStatus,
            models::agency::Agency,
            models::agency::AgencySettings,
            models::agency::UpdateAgencyStatusPayload,
            models::agency::UpdateStockSettingsPayload,

            // --- Módulos ---
            models::modules::ManagementModule,
            models::modules::ModuleAction,
            models::modules::AgencyModule,
            models::modules::UserModulePermission,
            models::modules::SetPermissionPayload,

            // --- Cobrança ---
            models::billing::SubscriptionPlan,
            models::billing::PaymentStatus,
            models::billing::Subscription,
            models::billing::PaymentRecord,
            models::billing::PaymentRecordView,
            models::billing::UpsertSubscriptionPayload,
            models::billing::GenerateMonthPayload,
            models::billing::UpdatePaymentRecordPayload,
            models::billing::GenerateDebtPayload,
            models::billing::GenerationResult,

            // --- Estoque ---
            models::vehicle::VehicleStatus,
            models::vehicle::StockAgeStatus,
            models::vehicle::Vehicle,
            models::vehicle::VehicleView,
            models::vehicle::CreateVehiclePayload,
            models::vehicle::UpdateVehiclePayload,

            // --- Clientes ---
            models::client::Client,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,

            // --- Caixa ---
            models::cashflow::TransactionKind,
            models::cashflow::CashflowTransaction,
            models::cashflow::CreateTransactionPayload,
            models::cashflow::BalanceSummary,

            // --- Financiamentos ---
            models::financing::FinancingStatus,
            models::financing::FinancingRecord,
            models::financing::CreateFinancingPayload,
            models::financing::UpdateFinancingPayload,

            // --- Peritagens ---
            models::inspection::Inspection,
            models::inspection::CreateInspectionPayload,
            models::inspection::UpdateInspectionPayload,

            // --- Faturas ---
            models::invoice::InvoiceType,
            models::invoice::InvoiceStatus,
            models::invoice::Invoice,
            models::invoice::CreateInvoicePayload,
            models::invoice::UpdateInvoicePayload,
        )
    ),
    tags(
        (name = "auth", description = "Cadastro de agências e login"),
        (name = "users", description = "Usuários da agência e permissões finas"),
        (name = "admin", description = "Painel da plataforma (super_admin)"),
        (name = "stock", description = "Estoque de veículos e semáforo de envelhecimento"),
        (name = "settings", description = "Configurações da agência"),
        (name = "clients", description = "Cadastro de clientes"),
        (name = "cashflow", description = "Caixa e balanços"),
        (name = "financing", description = "Vendas financiadas"),
        (name = "inspections", description = "Peritagens de veículos"),
        (name = "invoices", description = "Faturação eletrônica"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
