pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod markup;
pub mod state;
pub mod telemetry;
pub mod views;
