// src/services/stock_service.rs
//
// O "semáforo" de envelhecimento de estoque: classifica cada veículo em
// verde/amarelo/vermelho pelos dias desde a entrada em estoque, contra os
// limiares configuráveis da agência. Sempre derivado na leitura.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::{field_validation_error, AppError},
    db::{AgencyRepository, VehicleRepository},
    models::{
        agency::{AgencySettings, UpdateStockSettingsPayload},
        vehicle::{StockAgeStatus, Vehicle, VehicleView},
    },
};

// ---
// Classificação pura
// ---

fn days_in_stock(entered_at: DateTime<Utc>, today: NaiveDate) -> i64 {
    (today - entered_at.date_naive()).num_days()
}

fn classify(days: i64, yellow_days: i32, red_days: i32) -> StockAgeStatus {
    if days > red_days as i64 {
        StockAgeStatus::Red
    } else if days > yellow_days as i64 {
        StockAgeStatus::Yellow
    } else {
        StockAgeStatus::Green
    }
}

fn to_view(vehicle: Vehicle, settings: &AgencySettings, today: NaiveDate) -> VehicleView {
    let days = days_in_stock(vehicle.created_at, today);
    let stock_age = classify(days, settings.stock_yellow_days, settings.stock_red_days);
    VehicleView {
        vehicle,
        days_in_stock: days,
        stock_age,
    }
}

// ---
// O serviço
// ---

#[derive(Clone)]
pub struct StockService {
    vehicle_repo: VehicleRepository,
    agency_repo: AgencyRepository,
}

impl StockService {
    pub fn new(vehicle_repo: VehicleRepository, agency_repo: AgencyRepository) -> Self {
        Self {
            vehicle_repo,
            agency_repo,
        }
    }

    /// Lista o estoque com o semáforo calculado, com filtro opcional por
    /// cor. Recalculado a cada consulta: mudar os limiares reclassifica
    /// tudo imediatamente.
    pub async fn list_vehicles(
        &self,
        agency_id: Uuid,
        stock_age_filter: Option<StockAgeStatus>,
    ) -> Result<Vec<VehicleView>, AppError> {
        let settings = self.agency_repo.get_settings(agency_id).await?;
        let vehicles = self.vehicle_repo.list_by_agency(agency_id).await?;

        let today = Utc::now().date_naive();
        let views = vehicles
            .into_iter()
            .map(|v| to_view(v, &settings, today))
            .filter(|v| stock_age_filter.is_none_or(|f| v.stock_age == f))
            .collect();

        Ok(views)
    }

    pub async fn get_vehicle(
        &self,
        agency_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<VehicleView, AppError> {
        let settings = self.agency_repo.get_settings(agency_id).await?;
        let vehicle = self
            .vehicle_repo
            .find_by_id(agency_id, vehicle_id)
            .await?
            .ok_or(AppError::ResourceNotFound("Veículo"))?;

        Ok(to_view(vehicle, &settings, Utc::now().date_naive()))
    }

    pub async fn get_settings(&self, agency_id: Uuid) -> Result<AgencySettings, AppError> {
        self.agency_repo.get_settings(agency_id).await
    }

    /// Atualiza os limiares. Rejeita red <= yellow: aceitar tornaria a
    /// faixa amarela inalcançável em silêncio.
    pub async fn update_settings(
        &self,
        agency_id: Uuid,
        payload: &UpdateStockSettingsPayload,
    ) -> Result<AgencySettings, AppError> {
        if payload.stock_yellow_days < 1 {
            return Err(field_validation_error(
                "stockYellowDays",
                "range",
                "O limiar amarelo deve ser ao menos 1 dia.",
            ));
        }
        if payload.stock_red_days <= payload.stock_yellow_days {
            return Err(field_validation_error(
                "stockRedDays",
                "threshold_order",
                "O limiar vermelho deve ser maior que o amarelo.",
            ));
        }

        self.agency_repo
            .upsert_settings(agency_id, payload.stock_yellow_days, payload.stock_red_days)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classificacao_usa_os_limiares_exclusivos() {
        // Limiares padrão: amarelo 60, vermelho 90
        assert_eq!(classify(0, 60, 90), StockAgeStatus::Green);
        assert_eq!(classify(60, 60, 90), StockAgeStatus::Green);
        assert_eq!(classify(61, 60, 90), StockAgeStatus::Yellow);
        assert_eq!(classify(90, 60, 90), StockAgeStatus::Yellow);
        assert_eq!(classify(91, 60, 90), StockAgeStatus::Red);
    }

    #[test]
    fn dias_em_estoque_arredonda_para_baixo() {
        let entered = DateTime::parse_from_rfc3339("2025-01-01T18:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let today = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(days_in_stock(entered, today), 2);
    }
}
