//! View models for the dashboard's display surfaces
//!
//! Card, map popup, chart tooltip, legend and alert banner all build their
//! text and colors from these, which in turn go through [`crate::aqi`].

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aqi::{self, Severity, SeverityBand};
use crate::breakpoints;
use crate::models::{AqiForecast, AqiReading, HistoricalData, Pollutant};

/// Alert banner shows when the current AQI is above this, unless the user set their own
pub const DEFAULT_ALERT_THRESHOLD: i32 = 100;

/// Placeholder for a pollutant the backend did not report
pub const NOT_AVAILABLE: &str = "N/A";

/// Render a concentration with its unit, or "N/A" when absent.
///
/// A reported zero is a real measurement and is rendered as such.
pub fn format_concentration(value: Option<Decimal>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v.normalize(), unit),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PollutantCell {
    pub pollutant: Pollutant,
    pub label: &'static str,
    pub display: String,
}

/// Everything the current-conditions card and map popup render
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReadingCard {
    pub location_name: String,
    pub aqi: i32,
    pub band: &'static SeverityBand,
    pub advisory: &'static str,
    pub pollutants: Vec<PollutantCell>,
    /// Particulate driving the headline number, when it can be derived
    pub dominant_pollutant: Option<Pollutant>,
}

impl ReadingCard {
    pub fn from_reading(reading: &AqiReading, location_name: &str) -> Self {
        let band = reading.band();
        let pollutants = Pollutant::CARD
            .iter()
            .map(|p| PollutantCell {
                pollutant: *p,
                label: p.label(),
                display: format_concentration(p.value_in(reading), p.unit()),
            })
            .collect();

        Self {
            location_name: location_name.to_string(),
            aqi: reading.aqi,
            band,
            advisory: band.advisory,
            pollutants,
            dominant_pollutant: breakpoints::dominant_pollutant(reading).map(|(p, _)| p),
        }
    }
}

/// A single hourly point on the forecast chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastPoint {
    pub time: DateTime<Utc>,
    /// `HH:MM` axis label
    pub label: String,
    pub aqi: i32,
    pub band: &'static SeverityBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Forecast chart data, or an explicit absence of it
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", content = "points", rename_all = "snake_case")]
pub enum ForecastSeries {
    NoData,
    Points(Vec<ForecastPoint>),
}

impl ForecastSeries {
    /// One point per value the backend sent, at hourly offsets.
    ///
    /// Hours are counted from the forecast's own timestamp when present,
    /// otherwise from `now`. Missing hours are not filled in.
    pub fn from_forecast(forecast: Option<&AqiForecast>, now: DateTime<Utc>) -> Self {
        let forecast = match forecast {
            Some(f) if !f.is_empty() => f,
            _ => return ForecastSeries::NoData,
        };
        let start = forecast.timestamp.unwrap_or(now);

        let points = forecast
            .forecast
            .iter()
            .enumerate()
            .map(|(offset, &aqi)| {
                let time = start + Duration::hours(offset as i64);
                ForecastPoint {
                    time,
                    label: time.format("%H:%M").to_string(),
                    aqi,
                    band: aqi::classify(f64::from(aqi)),
                    confidence: forecast.confidence_at(offset),
                }
            })
            .collect();
        ForecastSeries::Points(points)
    }

    pub fn points(&self) -> &[ForecastPoint] {
        match self {
            ForecastSeries::NoData => &[],
            ForecastSeries::Points(points) => points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    /// Worst hour in the forecast
    pub fn peak(&self) -> Option<&ForecastPoint> {
        self.points().iter().max_by_key(|p| p.aqi)
    }
}

/// A single day on the history chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryPoint {
    /// `Mon DD` axis label
    pub label: String,
    pub aqi: i32,
    pub band: &'static SeverityBand,
    pub pm25: Option<Decimal>,
    pub pm10: Option<Decimal>,
    pub o3: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", content = "points", rename_all = "snake_case")]
pub enum HistorySeries {
    NoData,
    Points(Vec<HistoryPoint>),
}

impl HistorySeries {
    pub fn from_history(history: Option<&HistoricalData>) -> Self {
        let history = match history {
            Some(h) if !h.data.is_empty() => h,
            _ => return HistorySeries::NoData,
        };

        let points = history
            .data
            .iter()
            .map(|day| HistoryPoint {
                label: day.date.format("%b %d").to_string(),
                aqi: day.aqi,
                band: aqi::classify(f64::from(day.aqi)),
                pm25: day.pm25,
                pm10: day.pm10,
                o3: day.o3,
            })
            .collect();
        HistorySeries::Points(points)
    }

    pub fn points(&self) -> &[HistoryPoint] {
        match self {
            HistorySeries::NoData => &[],
            HistorySeries::Points(points) => points,
        }
    }

    /// Mean AQI over the covered days
    pub fn average_aqi(&self) -> Option<f64> {
        let points = self.points();
        if points.is_empty() {
            return None;
        }
        let total: i64 = points.iter().map(|p| i64::from(p.aqi)).sum();
        Some(total as f64 / points.len() as f64)
    }
}

/// Banner shown above the dashboard when air quality crosses the threshold
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertBanner {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub color: &'static str,
}

impl AlertBanner {
    /// `Some` when `reading.aqi` is strictly above `threshold`
    pub fn evaluate(reading: &AqiReading, location_name: &str, threshold: i32) -> Option<Self> {
        if reading.aqi <= threshold {
            return None;
        }
        let band = reading.band();
        Some(Self {
            title: format!("Air Quality Alert for {}", location_name),
            message: format!("Current AQI: {} - {}", reading.aqi, band.label),
            severity: band.severity,
            color: band.color,
        })
    }
}
