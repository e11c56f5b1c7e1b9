//! Air Quality Dashboard - command-line snapshot
//!
//! Loads the configured location, fetches current conditions, forecast and
//! history from the backend, and logs what the dashboard would render.

use air_quality_client::{ApiClient, Config, DashboardService, Session};
use shared::ForecastSeries;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Load configuration
    let config = Config::load()?;

    tracing::info!("Starting Air Quality Dashboard");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Backend: {}", config.api.base_url);

    let client = ApiClient::new(&config.api, Session::anonymous())?;
    let service = DashboardService::new(client);

    let location = config.dashboard.location();
    let snapshot = service
        .snapshot(location, config.dashboard.alert_threshold, config.dashboard.history_days)
        .await;

    match &snapshot.card {
        Ok(card) => {
            tracing::info!(
                "{}: AQI {} ({}, {})",
                card.location_name,
                card.aqi,
                card.band.label,
                card.band.color
            );
            tracing::info!("{}", card.advisory);
            for cell in &card.pollutants {
                tracing::info!("  {}: {}", cell.label, cell.display);
            }
        }
        Err(message) => tracing::warn!("{}", message),
    }

    if let Some(alert) = &snapshot.alert {
        tracing::warn!("{} - {}", alert.title, alert.message);
    }

    match &snapshot.forecast {
        ForecastSeries::NoData => tracing::info!("No forecast data available"),
        ForecastSeries::Points(points) => {
            if let Some(peak) = snapshot.forecast.peak() {
                tracing::info!(
                    "Forecast: {} hours, peak AQI {} at {} ({})",
                    points.len(),
                    peak.aqi,
                    peak.label,
                    peak.band.label
                );
            }
        }
    }

    if let Some(average) = snapshot.history.average_aqi() {
        tracing::info!(
            "History: {} days, average AQI {:.0}",
            snapshot.history.points().len(),
            average
        );
    }

    Ok(())
}

/// Initialize tracing; `AQD_LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aqi_dashboard=debug,air_quality_client=debug".into());

    let json = std::env::var("AQD_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
