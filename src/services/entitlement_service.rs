// src/services/entitlement_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AgencyRepository, ModuleRepository, UserRepository},
    models::{
        auth::UserRole,
        modules::{AgencyModule, ManagementModule, UserModulePermission},
    },
};

// O registro de habilitações: quais módulos cada agência contratou e
// quais permissões finas cada agency_user recebeu. Habilitar/desabilitar
// nunca apaga dados dos módulos; só muda o que o gate responde.
#[derive(Clone)]
pub struct EntitlementService {
    module_repo: ModuleRepository,
    agency_repo: AgencyRepository,
    user_repo: UserRepository,
}

impl EntitlementService {
    pub fn new(
        module_repo: ModuleRepository,
        agency_repo: AgencyRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            module_repo,
            agency_repo,
            user_repo,
        }
    }

    pub async fn enable_module(
        &self,
        agency_id: Uuid,
        module: ManagementModule,
    ) -> Result<AgencyModule, AppError> {
        self.agency_repo
            .find_by_id(agency_id)
            .await?
            .ok_or(AppError::AgencyNotFound)?;

        let row = self.module_repo.enable(agency_id, module).await?;
        tracing::info!("🧩 Módulo '{}' habilitado para a agência {}", module.slug(), agency_id);
        Ok(row)
    }

    pub async fn disable_module(
        &self,
        agency_id: Uuid,
        module: ManagementModule,
    ) -> Result<AgencyModule, AppError> {
        self.agency_repo
            .find_by_id(agency_id)
            .await?
            .ok_or(AppError::AgencyNotFound)?;

        let row = self.module_repo.disable(agency_id, module).await?;
        tracing::info!("🧩 Módulo '{}' desabilitado para a agência {}", module.slug(), agency_id);
        Ok(row)
    }

    pub async fn list_enabled(&self, agency_id: Uuid) -> Result<Vec<AgencyModule>, AppError> {
        self.module_repo.list_enabled(agency_id).await
    }

    /// O agency_admin concede/revoga permissões finas de um agency_user da
    /// própria agência. Permissões só têm significado para agency_user:
    /// admins têm acesso implícito e não recebem linhas aqui.
    pub async fn set_user_permission(
        &self,
        acting_agency_id: Uuid,
        target_user_id: Uuid,
        module: ManagementModule,
        can_view: bool,
        can_edit: bool,
        can_delete: bool,
    ) -> Result<UserModulePermission, AppError> {
        let target = self
            .user_repo
            .find_by_id(target_user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if target.agency_id != Some(acting_agency_id) {
            return Err(AppError::UserNotFound);
        }

        if target.role != UserRole::AgencyUser {
            return Err(AppError::Forbidden(
                "Permissões finas só se aplicam a usuários com papel agency_user.".into(),
            ));
        }

        self.module_repo
            .set_permission(target_user_id, module, can_view, can_edit, can_delete)
            .await
    }

    pub async fn list_user_permissions(
        &self,
        acting_agency_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<Vec<UserModulePermission>, AppError> {
        let target = self
            .user_repo
            .find_by_id(target_user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // Usuário de outra agência é indistinguível de inexistente
        if target.agency_id != Some(acting_agency_id) {
            return Err(AppError::UserNotFound);
        }

        self.module_repo.list_permissions(target_user_id).await
    }
}
