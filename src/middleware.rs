pub mod agency;
pub mod auth;
pub mod gate;
