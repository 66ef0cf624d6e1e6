// src/db/vehicle_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::vehicle::{CreateVehiclePayload, UpdateVehiclePayload, Vehicle},
};

#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        agency_id: Uuid,
        payload: &CreateVehiclePayload,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles
                (agency_id, brand, model, year, plate, vin, price, mileage, color, photo_urls)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(&payload.brand)
        .bind(&payload.model)
        .bind(payload.year)
        .bind(&payload.plate)
        .bind(&payload.vin)
        .bind(payload.price)
        .bind(payload.mileage)
        .bind(&payload.color)
        .bind(&payload.photo_urls)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn list_by_agency(&self, agency_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE agency_id = $1 ORDER BY created_at ASC",
        )
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    pub async fn find_by_id(
        &self,
        agency_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND agency_id = $2",
        )
        .bind(vehicle_id)
        .bind(agency_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vehicle)
    }

    /// Patch parcial via COALESCE: campos ausentes mantêm o valor atual.
    pub async fn update(
        &self,
        agency_id: Uuid,
        vehicle_id: Uuid,
        payload: &UpdateVehiclePayload,
    ) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand      = COALESCE($3, brand),
                model      = COALESCE($4, model),
                year       = COALESCE($5, year),
                plate      = COALESCE($6, plate),
                vin        = COALESCE($7, vin),
                price      = COALESCE($8, price),
                mileage    = COALESCE($9, mileage),
                color      = COALESCE($10, color),
                status     = COALESCE($11, status),
                photo_urls = COALESCE($12, photo_urls),
                updated_at = now()
            WHERE id = $1 AND agency_id = $2
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(agency_id)
        .bind(&payload.brand)
        .bind(&payload.model)
        .bind(payload.year)
        .bind(&payload.plate)
        .bind(&payload.vin)
        .bind::<Option<Decimal>>(payload.price)
        .bind(payload.mileage)
        .bind(&payload.color)
        .bind(payload.status)
        .bind(&payload.photo_urls)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ResourceNotFound("Veículo"))
    }

    pub async fn delete(&self, agency_id: Uuid, vehicle_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1 AND agency_id = $2")
            .bind(vehicle_id)
            .bind(agency_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound("Veículo"));
        }
        Ok(())
    }
}
