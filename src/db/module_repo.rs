// src/db/module_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::modules::{AgencyModule, ManagementModule, UserModulePermission},
};

#[derive(Clone)]
pub struct ModuleRepository {
    pool: PgPool,
}

impl ModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Habilitação por agência
    // ---

    /// Habilita um módulo. UPSERT idempotente: habilitar de novo é no-op.
    pub async fn enable(
        &self,
        agency_id: Uuid,
        module: ManagementModule,
    ) -> Result<AgencyModule, AppError> {
        let row = sqlx::query_as::<_, AgencyModule>(
            r#"
            INSERT INTO agency_modules (agency_id, module, is_enabled)
            VALUES ($1, $2, true)
            ON CONFLICT (agency_id, module)
            DO UPDATE SET is_enabled = true, updated_at = now()
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(module)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Desabilita um módulo. Não apaga dados dependentes: só bloqueia o
    /// acesso futuro através do gate.
    pub async fn disable(
        &self,
        agency_id: Uuid,
        module: ManagementModule,
    ) -> Result<AgencyModule, AppError> {
        let row = sqlx::query_as::<_, AgencyModule>(
            r#"
            INSERT INTO agency_modules (agency_id, module, is_enabled)
            VALUES ($1, $2, false)
            ON CONFLICT (agency_id, module)
            DO UPDATE SET is_enabled = false, updated_at = now()
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(module)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Ausência de linha = desabilitado.
    pub async fn is_enabled(
        &self,
        agency_id: Uuid,
        module: ManagementModule,
    ) -> Result<bool, AppError> {
        let enabled: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT is_enabled FROM agency_modules
            WHERE agency_id = $1 AND module = $2
            "#,
        )
        .bind(agency_id)
        .bind(module)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enabled.unwrap_or(false))
    }

    pub async fn list_enabled(&self, agency_id: Uuid) -> Result<Vec<AgencyModule>, AppError> {
        let rows = sqlx::query_as::<_, AgencyModule>(
            r#"
            SELECT * FROM agency_modules
            WHERE agency_id = $1 AND is_enabled = true
            ORDER BY module
            "#,
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ---
    // Permissões finas por usuário (papel agency_user)
    // ---

    /// Sempre consultada fresca, por requisição. Sem cache: um módulo
    /// desabilitado no meio da sessão nega imediatamente.
    pub async fn find_permission(
        &self,
        user_id: Uuid,
        module: ManagementModule,
    ) -> Result<Option<UserModulePermission>, AppError> {
        let permission = sqlx::query_as::<_, UserModulePermission>(
            r#"
            SELECT * FROM user_module_permissions
            WHERE user_id = $1 AND module = $2
            "#,
        )
        .bind(user_id)
        .bind(module)
        .fetch_optional(&self.pool)
        .await?;

        Ok(permission)
    }

    pub async fn set_permission(
        &self,
        user_id: Uuid,
        module: ManagementModule,
        can_view: bool,
        can_edit: bool,
        can_delete: bool,
    ) -> Result<UserModulePermission, AppError> {
        let permission = sqlx::query_as::<_, UserModulePermission>(
            r#"
            INSERT INTO user_module_permissions (user_id, module, can_view, can_edit, can_delete)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, module)
            DO UPDATE SET
                can_view = $3,
                can_edit = $4,
                can_delete = $5,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(module)
        .bind(can_view)
        .bind(can_edit)
        .bind(can_delete)
        .fetch_one(&self.pool)
        .await?;

        Ok(permission)
    }

    pub async fn list_permissions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserModulePermission>, AppError> {
        let permissions = sqlx::query_as::<_, UserModulePermission>(
            "SELECT * FROM user_module_permissions WHERE user_id = $1 ORDER BY module",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }
}
