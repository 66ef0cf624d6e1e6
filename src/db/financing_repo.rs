// src/db/financing_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::financing::{CreateFinancingPayload, FinancingRecord, UpdateFinancingPayload},
};

#[derive(Clone)]
pub struct FinancingRepository {
    pool: PgPool,
}

impl FinancingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        agency_id: Uuid,
        payload: &CreateFinancingPayload,
    ) -> Result<FinancingRecord, AppError> {
        sqlx::query_as::<_, FinancingRecord>(
            r#"
            INSERT INTO financing_records
                (agency_id, client_id, vehicle_id, total_amount, installments,
                 installment_amount, start_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(payload.client_id)
        .bind(payload.vehicle_id)
        .bind(payload.total_amount)
        .bind(payload.installments)
        .bind(payload.installment_amount)
        .bind(payload.start_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::ResourceNotFound("Cliente ou veículo");
                }
            }
            e.into()
        })
    }

    pub async fn list_by_agency(&self, agency_id: Uuid) -> Result<Vec<FinancingRecord>, AppError> {
        let records = sqlx::query_as::<_, FinancingRecord>(
            "SELECT * FROM financing_records WHERE agency_id = $1 ORDER BY start_date DESC",
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn find_by_id(
        &self,
        agency_id: Uuid,
        record_id: Uuid,
    ) -> Result<Option<FinancingRecord>, AppError> {
        let record = sqlx::query_as::<_, FinancingRecord>(
            "SELECT * FROM financing_records WHERE id = $1 AND agency_id = $2",
        )
        .bind(record_id)
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn update(
        &self,
        agency_id: Uuid,
        record_id: Uuid,
        payload: &UpdateFinancingPayload,
    ) -> Result<FinancingRecord, AppError> {
        sqlx::query_as::<_, FinancingRecord>(
            r#"
            UPDATE financing_records
            SET status             = COALESCE($3, status),
                installment_amount = COALESCE($4, installment_amount),
                updated_at         = now()
            WHERE id = $1 AND agency_id = $2
            RETURNING *
            "#,
        )
        .bind(record_id)
        .bind(agency_id)
        .bind(payload.status)
        .bind(payload.installment_amount)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ResourceNotFound("Financiamento"))
    }
}
