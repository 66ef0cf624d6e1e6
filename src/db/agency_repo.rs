// src/db/agency_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::agency::{Agency, AgencySettings, AgencyStatus},
};

#[derive(Clone)]
pub struct AgencyRepository {
    pool: PgPool,
}

impl AgencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_agency<'e, E>(
        &self,
        executor: E,
        name: &str,
        legal_name: Option<&str>,
        tax_id: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Agency, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agency = sqlx::query_as::<_, Agency>(
            r#"
            INSERT INTO agencies (name, legal_name, tax_id, email, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(legal_name)
        .bind(tax_id)
        .bind(email)
        .bind(phone)
        .bind(address)
        .fetch_one(executor)
        .await?;

        Ok(agency)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Agency>, AppError> {
        let agency = sqlx::query_as::<_, Agency>("SELECT * FROM agencies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(agency)
    }

    pub async fn list_all(&self) -> Result<Vec<Agency>, AppError> {
        let agencies =
            sqlx::query_as::<_, Agency>("SELECT * FROM agencies ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(agencies)
    }

    /// Transição de status feita apenas pelo super_admin.
    pub async fn update_status(
        &self,
        agency_id: Uuid,
        status: AgencyStatus,
    ) -> Result<Agency, AppError> {
        sqlx::query_as::<_, Agency>(
            r#"
            UPDATE agencies
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::AgencyNotFound)
    }

    // ---
    // Configurações (limiares do semáforo de estoque)
    // ---

    /// Devolve as configurações da agência, ou os padrões se nunca salvou.
    pub async fn get_settings(&self, agency_id: Uuid) -> Result<AgencySettings, AppError> {
        let settings = sqlx::query_as::<_, AgencySettings>(
            "SELECT * FROM agency_settings WHERE agency_id = $1",
        )
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings.unwrap_or_else(|| AgencySettings::defaults(agency_id)))
    }

    pub async fn upsert_settings(
        &self,
        agency_id: Uuid,
        stock_yellow_days: i32,
        stock_red_days: i32,
    ) -> Result<AgencySettings, AppError> {
        let settings = sqlx::query_as::<_, AgencySettings>(
            r#"
            INSERT INTO agency_settings (agency_id, stock_yellow_days, stock_red_days)
            VALUES ($1, $2, $3)
            ON CONFLICT (agency_id)
            DO UPDATE SET
                stock_yellow_days = $2,
                stock_red_days = $3,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(stock_yellow_days)
        .bind(stock_red_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
