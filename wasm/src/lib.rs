//! WebAssembly module for the Air Quality Dashboard
//!
//! Exposes the shared AQI classifier to the browser so cards, charts and
//! the legend render the same label, color and advisory as the client.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::aqi::{self, SeverityBand};
use shared::breakpoints;
use wasm_bindgen::prelude::*;

/// Band as handed to JavaScript
#[derive(Serialize)]
struct BandView<'a> {
    category: shared::AqiCategory,
    label: &'a str,
    color: &'a str,
    severity: &'a str,
    advisory: &'a str,
    range: String,
}

impl<'a> From<&'a SeverityBand> for BandView<'a> {
    fn from(band: &'a SeverityBand) -> Self {
        Self {
            category: band.category,
            label: band.label,
            color: band.color,
            severity: band.severity.as_str(),
            advisory: band.advisory,
            range: band.range_label(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Classify an AQI value, returned as a JSON object
#[wasm_bindgen]
pub fn classify_aqi(aqi: f64) -> String {
    to_json(&BandView::from(aqi::classify(aqi)))
}

#[wasm_bindgen]
pub fn aqi_label(aqi: f64) -> String {
    aqi::classify(aqi).label.to_string()
}

/// Hex color for charts and badges
#[wasm_bindgen]
pub fn aqi_color(aqi: f64) -> String {
    aqi::classify(aqi).color.to_string()
}

/// "success", "warning" or "error"
#[wasm_bindgen]
pub fn aqi_severity(aqi: f64) -> String {
    aqi::classify(aqi).severity.as_str().to_string()
}

#[wasm_bindgen]
pub fn aqi_advisory(aqi: f64) -> String {
    aqi::advisory(aqi).to_string()
}

/// Position on the legend, 0 (Good) to 5 (Hazardous)
#[wasm_bindgen]
pub fn aqi_band_index(aqi: f64) -> usize {
    aqi::band_index(aqi)
}

/// Every band in ascending order, as a JSON array
#[wasm_bindgen]
pub fn aqi_legend() -> String {
    let bands: Vec<BandView<'_>> = aqi::legend().iter().map(BandView::from).collect();
    to_json(&bands)
}

/// Format a concentration; absent or non-finite values render as "N/A"
#[wasm_bindgen]
pub fn format_pollutant(value: Option<f64>, unit: &str) -> String {
    let value = value.and_then(|v| Decimal::try_from(v).ok());
    shared::format_concentration(value, unit)
}

/// Whether the alert banner shows for this AQI
#[wasm_bindgen]
pub fn should_alert(aqi: i32, threshold: i32) -> bool {
    shared::AlertBanner::evaluate(&shared::AqiReading::new(aqi), "", threshold).is_some()
}

/// Headline AQI from particulate concentrations (µg/m³)
#[wasm_bindgen]
pub fn compute_aqi_from_pm(pm25: Option<f64>, pm10: Option<f64>) -> Option<i32> {
    let pm25 = pm25.and_then(|v| Decimal::try_from(v).ok());
    let pm10 = pm10.and_then(|v| Decimal::try_from(v).ok());
    breakpoints::compute_aqi(pm25, pm10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_color() {
        assert_eq!(aqi_label(35.0), "Good");
        assert_eq!(aqi_color(156.0), "#cc0033");
        assert_eq!(aqi_severity(120.0), "warning");
        assert_eq!(aqi_band_index(500.0), 5);
    }

    #[test]
    fn test_classify_json() {
        let value: serde_json::Value = serde_json::from_str(&classify_aqi(75.0)).unwrap();
        assert_eq!(value["label"], "Moderate");
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["advisory"], aqi_advisory(75.0));
    }

    #[test]
    fn test_legend_json() {
        let value: serde_json::Value = serde_json::from_str(&aqi_legend()).unwrap();
        let bands = value.as_array().unwrap();
        assert_eq!(bands.len(), 6);
        assert_eq!(bands[0]["label"], "Good");
        assert_eq!(bands[5]["label"], "Hazardous");
    }

    #[test]
    fn test_format_pollutant() {
        assert_eq!(format_pollutant(None, "ppb"), "N/A");
        assert_eq!(format_pollutant(Some(f64::NAN), "ppb"), "N/A");
        assert_eq!(format_pollutant(Some(0.0), "ppb"), "0 ppb");
    }

    #[test]
    fn test_alert_and_pm() {
        assert!(should_alert(101, 100));
        assert!(!should_alert(100, 100));
        assert_eq!(compute_aqi_from_pm(None, None), None);
        assert_eq!(compute_aqi_from_pm(Some(30.0), None), Some(50));
    }
}
