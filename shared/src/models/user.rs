//! User accounts, tokens and dashboard settings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::Language;

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(custom = "validate_email")]
    pub email: String,
    #[validate(custom = "validate_username")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[validate(custom = "validate_password")]
    pub password: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginCredentials {
    #[validate(custom = "validate_email")]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    crate::validation::validate_email(email).map_err(|_| ValidationError::new("email"))
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    crate::validation::validate_username(username).map_err(|_| ValidationError::new("username"))
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    crate::validation::validate_password(password).map_err(|_| ValidationError::new("password"))
}

/// A user as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial profile update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_username")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: UserProfile,
}

fn default_true() -> bool {
    true
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// How often the backend may send AQI notifications
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFrequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
}

/// Unit system for temperatures and distances
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

/// Per-user dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct UserSettings {
    /// Alert when the current AQI rises above this value
    #[validate(range(min = 0, max = 500))]
    pub aqi_threshold: i32,
    pub enable_notifications: bool,
    pub notification_frequency: NotificationFrequency,
    pub preferred_units: Units,
    pub theme: Theme,
    pub language: Language,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            aqi_threshold: crate::display::DEFAULT_ALERT_THRESHOLD,
            enable_notifications: true,
            notification_frequency: NotificationFrequency::Daily,
            preferred_units: Units::Metric,
            theme: Theme::Light,
            language: Language::English,
        }
    }
}
