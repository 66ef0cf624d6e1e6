// src/db/cashflow_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::cashflow::{BalanceSummary, CashflowTransaction, CreateTransactionPayload},
};

#[derive(Clone)]
pub struct CashflowRepository {
    pool: PgPool,
}

impl CashflowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        agency_id: Uuid,
        payload: &CreateTransactionPayload,
    ) -> Result<CashflowTransaction, AppError> {
        let transaction = sqlx::query_as::<_, CashflowTransaction>(
            r#"
            INSERT INTO cashflow_transactions
                (agency_id, kind, amount, currency, category, description, occurred_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(payload.kind)
        .bind(payload.amount)
        .bind(&payload.currency)
        .bind(&payload.category)
        .bind(&payload.description)
        .bind(payload.occurred_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Listagem com intervalo de datas opcional em ambas as pontas.
    pub async fn list_by_agency(
        &self,
        agency_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<CashflowTransaction>, AppError> {
        let transactions = sqlx::query_as::<_, CashflowTransaction>(
            r#"
            SELECT * FROM cashflow_transactions
            WHERE agency_id = $1
              AND ($2::date IS NULL OR occurred_on >= $2)
              AND ($3::date IS NULL OR occurred_on <= $3)
            ORDER BY occurred_on DESC, created_at DESC
            "#,
        )
        .bind(agency_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    pub async fn delete(&self, agency_id: Uuid, transaction_id: Uuid) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM cashflow_transactions WHERE id = $1 AND agency_id = $2")
                .bind(transaction_id)
                .bind(agency_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound("Lançamento"));
        }
        Ok(())
    }

    /// Módulo "balances": totais derivados das transações, calculado
    /// pelo banco a cada consulta.
    pub async fn balance_summary(
        &self,
        agency_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<BalanceSummary, AppError> {
        let summary = sqlx::query_as::<_, BalanceSummary>(
            r#"
            SELECT
                COALESCE(SUM(amount) FILTER (WHERE kind = 'income'), 0)  AS total_income,
                COALESCE(SUM(amount) FILTER (WHERE kind = 'expense'), 0) AS total_expense,
                COALESCE(SUM(amount) FILTER (WHERE kind = 'income'), 0)
                  - COALESCE(SUM(amount) FILTER (WHERE kind = 'expense'), 0) AS net
            FROM cashflow_transactions
            WHERE agency_id = $1
              AND ($2::date IS NULL OR occurred_on >= $2)
              AND ($3::date IS NULL OR occurred_on <= $3)
            "#,
        )
        .bind(agency_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
