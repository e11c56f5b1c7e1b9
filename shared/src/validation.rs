//! Validation utilities for dashboard inputs
//!
//! Checks run before a request leaves the browser so the user gets a
//! message next to the field instead of a backend error.

use rust_decimal::Decimal;

use crate::types::GpsCoordinates;

/// Longest history the dashboard will request, in days
pub const MAX_HISTORY_DAYS: u32 = 90;

// ============================================================================
// Location Validations
// ============================================================================

pub fn validate_latitude(latitude: Decimal) -> Result<(), &'static str> {
    if latitude < Decimal::from(-90) || latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

pub fn validate_longitude(longitude: Decimal) -> Result<(), &'static str> {
    if longitude < Decimal::from(-180) || longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a coordinate pair
pub fn validate_coordinates(coords: &GpsCoordinates) -> Result<(), &'static str> {
    validate_latitude(coords.latitude)?;
    validate_longitude(coords.longitude)
}

/// Validate a free-text location search
pub fn validate_search_query(query: &str) -> Result<(), &'static str> {
    if query.trim().is_empty() {
        return Err("Search query cannot be empty");
    }
    Ok(())
}

// ============================================================================
// Air Quality Validations
// ============================================================================

/// Validate a user's alert threshold (AQI scale)
pub fn validate_aqi_threshold(threshold: i32) -> Result<(), &'static str> {
    if !(0..=500).contains(&threshold) {
        return Err("AQI threshold must be between 0 and 500");
    }
    Ok(())
}

/// Validate the number of days of history requested
pub fn validate_history_days(days: u32) -> Result<(), &'static str> {
    if days == 0 {
        return Err("History must cover at least one day");
    }
    if days > MAX_HISTORY_DAYS {
        return Err("History is limited to 90 days");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// One `@`, a non-empty local part, and a dotted domain without blanks
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let (local, domain) = email.split_once('@').ok_or("Invalid email format")?;
    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .collect::<Vec<_>>()
            .windows(2)
            .all(|pair| !pair[0].is_empty() && !pair[1].is_empty())
        && domain.contains('.');
    if well_formed {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let length = username.chars().count();
    if length < 3 {
        return Err("Username must be at least 3 characters");
    }
    if length > 50 {
        return Err("Username must be at most 50 characters");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(&GpsCoordinates::new(dec("28.6139"), dec("77.2090"))).is_ok());
        assert!(validate_coordinates(&GpsCoordinates::new(dec("-90"), dec("180"))).is_ok());
        assert!(validate_coordinates(&GpsCoordinates::new(dec("90.1"), dec("0"))).is_err());
        assert!(validate_coordinates(&GpsCoordinates::new(dec("0"), dec("-180.5"))).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert!(validate_search_query("Pune").is_ok());
        assert!(validate_search_query("   ").is_err());
    }

    #[test]
    fn test_validate_aqi_threshold() {
        assert!(validate_aqi_threshold(0).is_ok());
        assert!(validate_aqi_threshold(100).is_ok());
        assert!(validate_aqi_threshold(500).is_ok());
        assert!(validate_aqi_threshold(-1).is_err());
        assert!(validate_aqi_threshold(501).is_err());
    }

    #[test]
    fn test_validate_history_days() {
        assert!(validate_history_days(7).is_ok());
        assert!(validate_history_days(90).is_ok());
        assert!(validate_history_days(0).is_err());
        assert!(validate_history_days(91).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("priya@example.co.in").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@@example.com").is_err());
        assert!(validate_email("a@example..com").is_err());
        assert!(validate_email("a@.com").is_err());
        assert!(validate_email("first last@example.com").is_err());
    }

    #[test]
    fn test_validate_username_and_password() {
        assert!(validate_username("asha").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("short").is_err());
    }
}
