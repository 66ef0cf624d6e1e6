pub mod agency;
pub mod auth;
pub mod billing;
pub mod cashflow;
pub mod client;
pub mod financing;
pub mod inspection;
pub mod invoice;
pub mod modules;
pub mod vehicle;
