pub mod auth_service;
pub use auth_service::AuthService;
pub mod billing_service;
pub use billing_service::BillingService;
pub mod entitlement_service;
pub use entitlement_service::EntitlementService;
pub mod stock_service;
pub use stock_service::StockService;
