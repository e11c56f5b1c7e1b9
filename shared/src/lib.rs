//! Shared types and logic for the air quality dashboard
//!
//! This crate holds the AQI classifier and the models and view models that
//! the API client, the dashboard binary and the browser (via WASM) all use.

pub mod aqi;
pub mod breakpoints;
pub mod display;
pub mod models;
pub mod types;
pub mod validation;

pub use aqi::{advisory, classify, AqiCategory, Severity, SeverityBand};
pub use display::*;
pub use models::*;
pub use types::*;
pub use validation::*;
