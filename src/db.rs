pub mod agency_repo;
pub use agency_repo::AgencyRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod module_repo;
pub use module_repo::ModuleRepository;
pub mod billing_repo;
pub use billing_repo::BillingRepository;
pub mod vehicle_repo;
pub use vehicle_repo::VehicleRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod cashflow_repo;
pub use cashflow_repo::CashflowRepository;
pub mod financing_repo;
pub use financing_repo::FinancingRepository;
pub mod inspection_repo;
pub use inspection_repo::InspectionRepository;
pub mod invoice_repo;
pub use invoice_repo::InvoiceRepository;
