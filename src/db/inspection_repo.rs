// src/db/inspection_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inspection::{CreateInspectionPayload, Inspection, UpdateInspectionPayload},
};

#[derive(Clone)]
pub struct InspectionRepository {
    pool: PgPool,
}

impl InspectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        agency_id: Uuid,
        payload: &CreateInspectionPayload,
    ) -> Result<Inspection, AppError> {
        sqlx::query_as::<_, Inspection>(
            r#"
            INSERT INTO inspections
                (agency_id, vehicle_id, inspector_name, inspected_at, notes, photo_urls)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(payload.vehicle_id)
        .bind(&payload.inspector_name)
        .bind(payload.inspected_at)
        .bind(&payload.notes)
        .bind(&payload.photo_urls)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::ResourceNotFound("Veículo");
                }
            }
            e.into()
        })
    }

    pub async fn list_by_agency(
        &self,
        agency_id: Uuid,
        vehicle_id: Option<Uuid>,
    ) -> Result<Vec<Inspection>, AppError> {
        let inspections = sqlx::query_as::<_, Inspection>(
            r#"
            SELECT * FROM inspections
            WHERE agency_id = $1
              AND ($2::uuid IS NULL OR vehicle_id = $2)
            ORDER BY inspected_at DESC
            "#,
        )
        .bind(agency_id)
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(inspections)
    }

    pub async fn update(
        &self,
        agency_id: Uuid,
        inspection_id: Uuid,
        payload: &UpdateInspectionPayload,
    ) -> Result<Inspection, AppError> {
        sqlx::query_as::<_, Inspection>(
            r#"
            UPDATE inspections
            SET notes      = COALESCE($3, notes),
                photo_urls = COALESCE($4, photo_urls),
                pdf_url    = COALESCE($5, pdf_url)
            WHERE id = $1 AND agency_id = $2
            RETURNING *
            "#,
        )
        .bind(inspection_id)
        .bind(agency_id)
        .bind(&payload.notes)
        .bind(&payload.photo_urls)
        .bind(&payload.pdf_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ResourceNotFound("Peritagem"))
    }
}
