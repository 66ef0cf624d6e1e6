// src/db/invoice_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::invoice::{CreateInvoicePayload, Invoice, UpdateInvoicePayload},
};

#[derive(Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Criação explícita: duplicar (tipo, ponto de venda, número) é
    /// Conflict para o chamador, diferente da geração idempotente de cobrança.
    pub async fn create(
        &self,
        agency_id: Uuid,
        payload: &CreateInvoicePayload,
        total_amount: Decimal,
    ) -> Result<Invoice, AppError> {
        sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices
                (agency_id, client_id, invoice_type, point_of_sale, number,
                 client_tax_id, net_amount, tax_amount, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(payload.client_id)
        .bind(payload.invoice_type)
        .bind(payload.point_of_sale)
        .bind(payload.number)
        .bind(&payload.client_tax_id)
        .bind(payload.net_amount)
        .bind(payload.tax_amount)
        .bind(total_amount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe uma fatura com esse número para esse ponto de venda.".into(),
                    );
                }
            }
            e.into()
        })
    }

    pub async fn list_by_agency(&self, agency_id: Uuid) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE agency_id = $1
            ORDER BY invoice_type, point_of_sale, number DESC
            "#,
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(invoices)
    }

    pub async fn find_by_id(
        &self,
        agency_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT * FROM invoices WHERE id = $1 AND agency_id = $2",
        )
        .bind(invoice_id)
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(invoice)
    }

    /// Recebe o resultado da autorização AFIP (CAE + vencimento + status).
    pub async fn update(
        &self,
        agency_id: Uuid,
        invoice_id: Uuid,
        payload: &UpdateInvoicePayload,
    ) -> Result<Invoice, AppError> {
        sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET cae        = COALESCE($3, cae),
                cae_expiry = COALESCE($4, cae_expiry),
                status     = COALESCE($5, status)
            WHERE id = $1 AND agency_id = $2
            RETURNING *
            "#,
        )
        .bind(invoice_id)
        .bind(agency_id)
        .bind(&payload.cae)
        .bind(payload.cae_expiry)
        .bind(payload.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ResourceNotFound("Fatura"))
    }
}
