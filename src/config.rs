// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AgencyRepository, BillingRepository, CashflowRepository, ClientRepository,
        FinancingRepository, InspectionRepository, InvoiceRepository, ModuleRepository,
        UserRepository, VehicleRepository,
    },
    services::{AuthService, BillingService, EntitlementService, StockService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    // Repositórios (o gate e o contexto de agência consultam direto)
    pub agency_repo: AgencyRepository,
    pub user_repo: UserRepository,
    pub module_repo: ModuleRepository,
    pub billing_repo: BillingRepository,
    pub vehicle_repo: VehicleRepository,
    pub client_repo: ClientRepository,
    pub cashflow_repo: CashflowRepository,
    pub financing_repo: FinancingRepository,
    pub inspection_repo: InspectionRepository,
    pub invoice_repo: InvoiceRepository,

    // Serviços (regra de negócio)
    pub auth_service: AuthService,
    pub billing_service: BillingService,
    pub entitlement_service: EntitlementService,
    pub stock_service: StockService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let agency_repo = AgencyRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());
        let module_repo = ModuleRepository::new(db_pool.clone());
        let billing_repo = BillingRepository::new(db_pool.clone());
        let vehicle_repo = VehicleRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let cashflow_repo = CashflowRepository::new(db_pool.clone());
        let financing_repo = FinancingRepository::new(db_pool.clone());
        let inspection_repo = InspectionRepository::new(db_pool.clone());
        let invoice_repo = InvoiceRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            agency_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let billing_service = BillingService::new(
            billing_repo.clone(),
            agency_repo.clone(),
            db_pool.clone(),
        );
        let entitlement_service = EntitlementService::new(
            module_repo.clone(),
            agency_repo.clone(),
            user_repo.clone(),
        );
        let stock_service = StockService::new(vehicle_repo.clone(), agency_repo.clone());

        Ok(Self {
            db_pool,
            agency_repo,
            user_repo,
            module_repo,
            billing_repo,
            vehicle_repo,
            client_repo,
            cashflow_repo,
            financing_repo,
            inspection_repo,
            invoice_repo,
            auth_service,
            billing_service,
            entitlement_service,
            stock_service,
        })
    }
}
