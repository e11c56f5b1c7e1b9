//! Dashboard assembly: fetch everything one location needs and build the view models

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    AlertBanner, AqiForecast, AqiReading, ForecastSeries, HistoricalData, HistorySeries, Location,
    ReadingCard, UserSettings,
};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ClientResult;

/// Everything rendered on the main dashboard for one location
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub location: Location,
    /// The card, or the message its error placeholder shows
    pub card: Result<ReadingCard, String>,
    pub forecast: ForecastSeries,
    pub history: HistorySeries,
    pub alert: Option<AlertBanner>,
    pub generated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Build a snapshot from whatever the three fetches returned
    pub fn assemble(
        location: Location,
        current: ClientResult<AqiReading>,
        forecast: ClientResult<AqiForecast>,
        history: ClientResult<HistoricalData>,
        threshold: i32,
        now: DateTime<Utc>,
    ) -> Self {
        let (card, alert) = match current {
            Ok(reading) => (
                Ok(ReadingCard::from_reading(&reading, &location.name)),
                AlertBanner::evaluate(&reading, &location.name, threshold),
            ),
            Err(e) => {
                warn!(location = %location.name, error = %e, "current air quality unavailable");
                (Err(e.user_message()), None)
            }
        };

        let forecast = match forecast {
            Ok(f) => ForecastSeries::from_forecast(Some(&f), now),
            Err(e) => {
                warn!(location = %location.name, error = %e, "forecast unavailable");
                ForecastSeries::NoData
            }
        };

        let history = match history {
            Ok(h) => HistorySeries::from_history(Some(&h)),
            Err(e) => {
                warn!(location = %location.name, error = %e, "history unavailable");
                HistorySeries::NoData
            }
        };

        Self {
            location,
            card,
            forecast,
            history,
            alert,
            generated_at: now,
        }
    }
}

/// Loads dashboard snapshots through an [`ApiClient`]
#[derive(Clone, Debug)]
pub struct DashboardService {
    client: ApiClient,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Alert threshold for a user's settings
    pub fn threshold_for(settings: &UserSettings) -> i32 {
        settings.aqi_threshold
    }

    /// Fetch current, forecast and history concurrently and assemble them
    pub async fn snapshot(&self, location: Location, threshold: i32, history_days: u32) -> DashboardSnapshot {
        let coords = location.coordinates();
        let (current, forecast, history) = tokio::join!(
            self.client.current_air_quality(&coords),
            self.client.forecast(&coords),
            self.client.historical(&coords, history_days),
        );

        let snapshot = DashboardSnapshot::assemble(location, current, forecast, history, threshold, Utc::now());
        info!(
            location = %snapshot.location.name,
            aqi = ?snapshot.card.as_ref().map(|c| c.aqi).ok(),
            alert = snapshot.alert.is_some(),
            forecast_points = snapshot.forecast.points().len(),
            "dashboard snapshot assembled"
        );
        snapshot
    }

    /// Threshold from the signed-in user's settings, or the default
    pub async fn alert_threshold(&self) -> i32 {
        Self::threshold_for(&self.client.settings().await)
    }

    /// Snapshot using the signed-in user's threshold (defaults when signed out)
    pub async fn snapshot_for_user(&self, location: Location, history_days: u32) -> DashboardSnapshot {
        let threshold = self.alert_threshold().await;
        self.snapshot(location, threshold, history_days).await
    }
}
