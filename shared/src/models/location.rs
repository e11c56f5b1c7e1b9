//! Locations: search results, saved locations and the Indian city catalog

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::GpsCoordinates;

/// A named point the dashboard can show air quality for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    pub lat: Decimal,
    pub lng: Decimal,
}

impl Location {
    pub fn new(name: impl Into<String>, lat: Decimal, lng: Decimal) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.lat, self.lng)
    }
}

/// Payload for saving a location to the user's list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewLocation {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "validate_latitude")]
    pub latitude: Decimal,
    #[validate(custom = "validate_longitude")]
    pub longitude: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl From<&Location> for NewLocation {
    fn from(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            latitude: location.lat,
            longitude: location.lng,
            city: None,
            state: None,
            country: None,
        }
    }
}

fn validate_latitude(latitude: &Decimal) -> Result<(), ValidationError> {
    crate::validation::validate_latitude(*latitude).map_err(|_| ValidationError::new("latitude"))
}

fn validate_longitude(longitude: &Decimal) -> Result<(), ValidationError> {
    crate::validation::validate_longitude(*longitude).map_err(|_| ValidationError::new("longitude"))
}

/// A location saved by the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedLocation {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SavedLocation {
    pub fn to_location(&self) -> Location {
        Location::new(self.name.clone(), self.latitude, self.longitude)
    }
}

/// Administrative kind of a catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CityKind {
    District,
    Town,
}

/// An entry of the backend's Indian city catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndianCity {
    pub name: String,
    pub state: String,
    pub lat: Decimal,
    pub lng: Decimal,
    #[serde(rename = "type")]
    pub kind: CityKind,
}

impl IndianCity {
    pub fn to_location(&self) -> Location {
        Location::new(format!("{}, {}", self.name, self.state), self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IndianCitiesResponse {
    pub cities: Vec<IndianCity>,
    pub total_count: usize,
}

/// Filters for the Indian city catalog; both are optional
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IndianCityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_location_validation() {
        let valid = NewLocation::from(&Location::new("New Delhi", dec("28.6139"), dec("77.2090")));
        assert!(valid.validate().is_ok());

        let bad_lat = NewLocation {
            latitude: dec("91"),
            ..valid.clone()
        };
        assert!(bad_lat.validate().is_err());

        let empty_name = NewLocation {
            name: String::new(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_indian_city_decodes_type_field() {
        let json = r#"{"name": "Pune", "state": "Maharashtra", "lat": 18.5204, "lng": 73.8567, "type": "district"}"#;
        let city: IndianCity = serde_json::from_str(json).unwrap();
        assert_eq!(city.kind, CityKind::District);
        assert_eq!(city.to_location().name, "Pune, Maharashtra");
    }

    #[test]
    fn test_saved_location_accepts_mongo_id() {
        let json = r#"{"_id": "65f0c0ffee", "name": "Home", "latitude": 12.97, "longitude": 77.59}"#;
        let saved: SavedLocation = serde_json::from_str(json).unwrap();
        assert_eq!(saved.id, "65f0c0ffee");
        assert_eq!(saved.to_location().lat, dec("12.97"));
    }

    #[test]
    fn test_saved_location_backend_created_at() {
        let json = r#"{"_id": "65f0c0ffee", "name": "Office", "latitude": 19.07, "longitude": 72.87,
            "city": "Mumbai", "created_at": "2024-05-01T10:00:00.123456"}"#;
        let saved: SavedLocation = serde_json::from_str(json).unwrap();
        let created = saved.created_at.unwrap();
        assert_eq!(created.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-01 10:00:00");
    }

    #[test]
    fn test_city_query_omits_empty_filters() {
        let query = IndianCityQuery {
            state: Some("Kerala".into()),
            search: None,
        };
        assert_eq!(serde_json::to_string(&query).unwrap(), r#"{"state":"Kerala"}"#);
    }
}
