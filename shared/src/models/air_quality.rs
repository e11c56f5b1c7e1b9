//! Air quality readings, forecasts and history as served by the backend

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aqi::{self, SeverityBand};

/// Current air quality at a location.
///
/// Pollutant fields are optional; a missing value means "not available"
/// and must never be read as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AqiReading {
    pub aqi: i32,
    /// PM2.5 in µg/m³
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm25: Option<Decimal>,
    /// PM10 in µg/m³
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm10: Option<Decimal>,
    /// Ozone in ppb
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o3: Option<Decimal>,
    /// Nitrogen dioxide in ppb
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no2: Option<Decimal>,
    /// Carbon monoxide in ppm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co: Option<Decimal>,
    /// Sulphur dioxide in ppb
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub so2: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "super::timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AqiReading {
    pub fn new(aqi: i32) -> Self {
        Self {
            aqi,
            ..Self::default()
        }
    }

    pub fn band(&self) -> &'static SeverityBand {
        aqi::classify(f64::from(self.aqi))
    }

    pub fn advisory(&self) -> &'static str {
        aqi::advisory(f64::from(self.aqi))
    }
}

/// Hourly AQI forecast, first value is the current hour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AqiForecast {
    #[serde(default)]
    pub forecast: Vec<i32>,
    /// Model confidence per hour, 0-1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Vec<f64>>,
    #[serde(
        default,
        deserialize_with = "super::timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AqiForecast {
    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }

    /// Confidence for hour `offset`, if the backend sent one
    pub fn confidence_at(&self, offset: usize) -> Option<f64> {
        self.confidence.as_ref().and_then(|c| c.get(offset).copied())
    }
}

/// One day of history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub aqi: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm25: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm10: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o3: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no2: Option<Decimal>,
}

/// Daily history, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HistoricalData {
    #[serde(default)]
    pub data: Vec<HistoricalPoint>,
}

/// Pollutants reported on a reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Pollutant {
    Pm25,
    Pm10,
    O3,
    No2,
    Co,
    So2,
}

impl Pollutant {
    /// Pollutants shown on the reading card, in display order
    pub const CARD: [Pollutant; 4] = [Pollutant::Pm25, Pollutant::Pm10, Pollutant::O3, Pollutant::No2];

    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::O3 => "O₃",
            Pollutant::No2 => "NO₂",
            Pollutant::Co => "CO",
            Pollutant::So2 => "SO₂",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => "µg/m³",
            Pollutant::O3 | Pollutant::No2 | Pollutant::So2 => "ppb",
            Pollutant::Co => "ppm",
        }
    }

    pub fn value_in(&self, reading: &AqiReading) -> Option<Decimal> {
        match self {
            Pollutant::Pm25 => reading.pm25,
            Pollutant::Pm10 => reading.pm10,
            Pollutant::O3 => reading.o3,
            Pollutant::No2 => reading.no2,
            Pollutant::Co => reading.co,
            Pollutant::So2 => reading.so2,
        }
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
