// src/middleware/gate.rs
//
// O gate de autorização: a ÚNICA função que decide allow/deny, em vez de
// espalhar checagens de papel pelos handlers. A decisão é pura; o extrator
// em volta busca os insumos frescos no banco a cada requisição.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{agency::AgencyContext, auth::AuthenticatedUser},
    models::{
        auth::UserRole,
        modules::{ManagementModule, ModuleAction, UserModulePermission},
    },
};

/// A decisão em si. Sem efeitos colaterais:
/// 1. super_admin passa sempre;
/// 2. agency_admin passa se o módulo estiver habilitado para a agência
///    (o gate de módulo vale até para admins);
/// 3. agency_user precisa do módulo habilitado E de uma linha de
///    permissão concedendo a ação. Sem linha = negado (fail-closed).
pub fn decide(
    role: UserRole,
    module_enabled: bool,
    permission: Option<&UserModulePermission>,
    action: ModuleAction,
) -> bool {
    match role {
        UserRole::SuperAdmin => true,
        UserRole::AgencyAdmin => module_enabled,
        UserRole::AgencyUser => {
            module_enabled && permission.map(|p| p.grants(action)).unwrap_or(false)
        }
    }
}

/// 1. O Trait que define qual módulo a rota protege
pub trait ModuleDef: Send + Sync + 'static {
    const MODULE: ManagementModule;
}

/// 2. O Trait que define a ação exigida
pub trait ActionDef: Send + Sync + 'static {
    const ACTION: ModuleAction;
}

/// 3. O Extractor (Guardião)
pub struct RequireModuleAccess<M, A>(PhantomData<(M, A)>);

impl<M, A, S> FromRequestParts<S> for RequireModuleAccess<M, A>
where
    M: ModuleDef,
    A: ActionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Extrai Usuário
        let AuthenticatedUser(user) = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        // super_admin não depende de habilitação de módulo
        if user.role == UserRole::SuperAdmin {
            return Ok(RequireModuleAccess(PhantomData));
        }

        // B. Resolve a agência do chamador
        let AgencyContext(agency_id) = AgencyContext::from_request_parts(parts, state).await?;

        // C. Consulta fresca: módulo habilitado para a agência?
        let module_enabled = app_state
            .module_repo
            .is_enabled(agency_id, M::MODULE)
            .await?;

        // D. Permissão fina, só relevante para agency_user
        let permission = match user.role {
            UserRole::AgencyUser => {
                app_state
                    .module_repo
                    .find_permission(user.id, M::MODULE)
                    .await?
            }
            _ => None,
        };

        if !decide(user.role, module_enabled, permission.as_ref(), A::ACTION) {
            return Err(AppError::Forbidden(format!(
                "Você não tem acesso ao módulo '{}' para esta ação.",
                M::MODULE.slug()
            )));
        }

        Ok(RequireModuleAccess(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS MÓDULOS (TIPOS)
// ---

macro_rules! module_def {
    ($name:ident, $module:expr) => {
        pub struct $name;
        impl ModuleDef for $name {
            const MODULE: ManagementModule = $module;
        }
    };
}

module_def!(ModStock, ManagementModule::Stock);
module_def!(ModClients, ManagementModule::Clients);
module_def!(ModCashflow, ManagementModule::Cashflow);
module_def!(ModFinancing, ManagementModule::Financing);
module_def!(ModInvoicing, ManagementModule::Invoicing);
module_def!(ModBalances, ManagementModule::Balances);

// ---
// DEFINIÇÃO DAS AÇÕES (TIPOS)
// ---

pub struct ActView;
impl ActionDef for ActView {
    const ACTION: ModuleAction = ModuleAction::View;
}

pub struct ActEdit;
impl ActionDef for ActEdit {
    const ACTION: ModuleAction = ModuleAction::Edit;
}

pub struct ActDelete;
impl ActionDef for ActDelete {
    const ACTION: ModuleAction = ModuleAction::Delete;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn permission(view: bool, edit: bool, delete: bool) -> UserModulePermission {
        UserModulePermission {
            user_id: Uuid::new_v4(),
            module: ManagementModule::Cashflow,
            can_view: view,
            can_edit: edit,
            can_delete: delete,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn super_admin_passa_sempre_mesmo_com_modulo_desabilitado() {
        for action in [ModuleAction::View, ModuleAction::Edit, ModuleAction::Delete] {
            assert!(decide(UserRole::SuperAdmin, false, None, action));
            assert!(decide(UserRole::SuperAdmin, true, None, action));
        }
    }

    #[test]
    fn agency_admin_depende_da_habilitacao_do_modulo() {
        assert!(decide(UserRole::AgencyAdmin, true, None, ModuleAction::Delete));
        // Cenário do cashflow desabilitado: nega até para o admin
        assert!(!decide(UserRole::AgencyAdmin, false, None, ModuleAction::View));
    }

    #[test]
    fn agency_user_sem_linha_de_permissao_e_negado() {
        for action in [ModuleAction::View, ModuleAction::Edit, ModuleAction::Delete] {
            assert!(!decide(UserRole::AgencyUser, true, None, action));
        }
    }

    #[test]
    fn agency_user_respeita_a_permissao_por_acao() {
        let p = permission(true, false, false);
        assert!(decide(UserRole::AgencyUser, true, Some(&p), ModuleAction::View));
        assert!(!decide(UserRole::AgencyUser, true, Some(&p), ModuleAction::Edit));
        assert!(!decide(UserRole::AgencyUser, true, Some(&p), ModuleAction::Delete));
    }

    #[test]
    fn modulo_desabilitado_nega_mesmo_com_permissao_concedida() {
        let p = permission(true, true, true);
        assert!(!decide(UserRole::AgencyUser, false, Some(&p), ModuleAction::View));
    }
}
