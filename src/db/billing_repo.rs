// src/db/billing_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::billing::{PaymentRecord, Subscription, SubscriptionPlan},
};

#[derive(Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Assinaturas
    // ---

    /// Uma assinatura por agência (UNIQUE agency_id): criar ou atualizar
    /// é a mesma operação.
    pub async fn upsert_subscription(
        &self,
        agency_id: Uuid,
        plan: SubscriptionPlan,
        billing_day: i32,
        payment_method: Option<&str>,
        is_active: bool,
    ) -> Result<Subscription, AppError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (agency_id, plan, billing_day, payment_method, is_active)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (agency_id)
            DO UPDATE SET
                plan = $2,
                billing_day = $3,
                payment_method = $4,
                is_active = $5,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(plan)
        .bind(billing_day)
        .bind(payment_method)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    pub async fn find_subscription_by_agency(
        &self,
        agency_id: Uuid,
    ) -> Result<Option<Subscription>, AppError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE agency_id = $1",
        )
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(subscription)
    }

    pub async fn list_active_subscriptions(&self) -> Result<Vec<Subscription>, AppError> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE is_active = true ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(subscriptions)
    }

    // ---
    // Registros de pagamento
    // ---

    /// Insere um registro do mês se ainda não existir.
    /// A constraint UNIQUE (agency_id, year, month) é a fonte da verdade:
    /// perder a corrida vira `None` (pulado), nunca erro — é isso que torna
    /// a geração idempotente sob chamadas concorrentes.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_record_if_absent<'e, E>(
        &self,
        executor: E,
        agency_id: Uuid,
        subscription_id: Uuid,
        year: i32,
        month: i32,
        amount: Decimal,
        due_date: NaiveDate,
        payment_method: Option<&str>,
    ) -> Result<Option<PaymentRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, PaymentRecord>(
            r#"
            INSERT INTO payment_records
                (agency_id, subscription_id, year, month, amount, total_amount, due_date, payment_method)
            VALUES ($1, $2, $3, $4, $5, $5, $6, $7)
            ON CONFLICT (agency_id, year, month) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(subscription_id)
        .bind(year)
        .bind(month)
        .bind(amount)
        .bind(due_date)
        .bind(payment_method)
        .fetch_optional(executor)
        .await?;

        Ok(record)
    }

    pub async fn find_record_by_id(&self, id: Uuid) -> Result<Option<PaymentRecord>, AppError> {
        let record =
            sqlx::query_as::<_, PaymentRecord>("SELECT * FROM payment_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(record)
    }

    /// Persiste o resultado de um patch já resolvido pelo serviço
    /// (total recalculado, paid_at ajustado). Registros nunca são deletados.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_record(
        &self,
        id: Uuid,
        extra_amount: Decimal,
        discount_amount: Decimal,
        total_amount: Decimal,
        is_paid: bool,
        paid_at: Option<DateTime<Utc>>,
        payment_method: Option<&str>,
        notes: Option<&str>,
    ) -> Result<PaymentRecord, AppError> {
        sqlx::query_as::<_, PaymentRecord>(
            r#"
            UPDATE payment_records
            SET extra_amount = $2,
                discount_amount = $3,
                total_amount = $4,
                is_paid = $5,
                paid_at = $6,
                payment_method = $7,
                notes = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(extra_amount)
        .bind(discount_amount)
        .bind(total_amount)
        .bind(is_paid)
        .bind(paid_at)
        .bind(payment_method)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::PaymentRecordNotFound)
    }

    pub async fn list_records_by_agency(
        &self,
        agency_id: Uuid,
    ) -> Result<Vec<PaymentRecord>, AppError> {
        let records = sqlx::query_as::<_, PaymentRecord>(
            r#"
            SELECT * FROM payment_records
            WHERE agency_id = $1
            ORDER BY year DESC, month DESC
            "#,
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// O registro mais recente (ano, mês) de uma agência, se houver.
    /// Ponto de partida do backfill de dívida.
    pub async fn latest_record_for_agency(
        &self,
        agency_id: Uuid,
    ) -> Result<Option<PaymentRecord>, AppError> {
        let record = sqlx::query_as::<_, PaymentRecord>(
            r#"
            SELECT * FROM payment_records
            WHERE agency_id = $1
            ORDER BY year DESC, month DESC
            LIMIT 1
            "#,
        )
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }
}
