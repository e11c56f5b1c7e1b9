//! Air quality dashboard client
//!
//! Talks to the air quality backend on behalf of the dashboard and turns
//! its responses into the view models defined in `shared`.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod endpoint;
pub mod error;
pub mod session;

pub use api::ApiClient;
pub use config::{ApiConfig, Config, DashboardConfig};
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use endpoint::Endpoint;
pub use error::{ClientError, ClientResult};
pub use session::Session;
