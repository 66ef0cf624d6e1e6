// src/models/modules.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O catálogo fechado de módulos de gestão. Não é extensível em runtime:
// habilitar/desabilitar por agência é estado, o catálogo em si é código.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "management_module", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ManagementModule {
    Stock,
    Clients,
    Cashflow,
    Financing,
    Invoicing,
    Metrics,
    Balances,
    Statistics,
    SalesPlatforms,
}

impl ManagementModule {
    pub const ALL: [ManagementModule; 9] = [
        ManagementModule::Stock,
        ManagementModule::Clients,
        ManagementModule::Cashflow,
        ManagementModule::Financing,
        ManagementModule::Invoicing,
        ManagementModule::Metrics,
        ManagementModule::Balances,
        ManagementModule::Statistics,
        ManagementModule::SalesPlatforms,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ManagementModule::Stock => "stock",
            ManagementModule::Clients => "clients",
            ManagementModule::Cashflow => "cashflow",
            ManagementModule::Financing => "financing",
            ManagementModule::Invoicing => "invoicing",
            ManagementModule::Metrics => "metrics",
            ManagementModule::Balances => "balances",
            ManagementModule::Statistics => "statistics",
            ManagementModule::SalesPlatforms => "sales_platforms",
        }
    }
}

// A ação que o chamador quer executar sobre um módulo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ModuleAction {
    View,
    Edit,
    Delete,
}

// Uma linha por par (agência, módulo); ausência de linha = desabilitado.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgencyModule {
    pub agency_id: Uuid,
    pub module: ManagementModule,
    pub is_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

// Permissão fina de um agency_user sobre um módulo.
// Ignorada para agency_admin e super_admin (acesso implícito).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserModulePermission {
    pub user_id: Uuid,
    pub module: ManagementModule,
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub updated_at: DateTime<Utc>,
}

impl UserModulePermission {
    pub fn grants(&self, action: ModuleAction) -> bool {
        match action {
            ModuleAction::View => self.can_view,
            ModuleAction::Edit => self.can_edit,
            ModuleAction::Delete => self.can_delete,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SetPermissionPayload {
    pub module: ManagementModule,
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}
