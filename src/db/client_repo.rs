// src/db/client_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{Client, CreateClientPayload, UpdateClientPayload},
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        agency_id: Uuid,
        payload: &CreateClientPayload,
    ) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (agency_id, name, document_number, email, phone, address, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(&payload.name)
        .bind(&payload.document_number)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(&payload.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn list_by_agency(&self, agency_id: Uuid) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE agency_id = $1 ORDER BY name ASC",
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    pub async fn find_by_id(
        &self,
        agency_id: Uuid,
        client_id: Uuid,
    ) -> Result<Option<Client>, AppError> {
        let client =
            sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1 AND agency_id = $2")
                .bind(client_id)
                .bind(agency_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(client)
    }

    /// Patch parcial via COALESCE: campos ausentes mantêm o valor atual.
    pub async fn update(
        &self,
        agency_id: Uuid,
        client_id: Uuid,
        payload: &UpdateClientPayload,
    ) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name            = COALESCE($3, name),
                document_number = COALESCE($4, document_number),
                email           = COALESCE($5, email),
                phone           = COALESCE($6, phone),
                address         = COALESCE($7, address),
                notes           = COALESCE($8, notes),
                updated_at      = now()
            WHERE id = $1 AND agency_id = $2
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(agency_id)
        .bind(&payload.name)
        .bind(&payload.document_number)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(&payload.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ResourceNotFound("Cliente"))
    }

    pub async fn delete(&self, agency_id: Uuid, client_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND agency_id = $2")
            .bind(client_id)
            .bind(agency_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound("Cliente"));
        }
        Ok(())
    }
}
