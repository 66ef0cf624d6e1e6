pub mod admin;
pub mod auth;
pub mod cashflow;
pub mod clients;
pub mod financing;
pub mod inspections;
pub mod invoices;
pub mod settings;
pub mod users;
pub mod vehicles;
