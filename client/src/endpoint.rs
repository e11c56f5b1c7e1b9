//! Backend routes the dashboard calls

use reqwest::Method;
use shared::{GpsCoordinates, IndianCityQuery};

/// One backend route with its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint<'a> {
    CurrentAirQuality(&'a GpsCoordinates),
    Forecast(&'a GpsCoordinates),
    Historical(&'a GpsCoordinates, u32),
    IndianCities(&'a IndianCityQuery),
    SearchLocations(&'a str),
    SavedLocations,
    SaveLocation,
    DeleteSavedLocation(&'a str),
    Register,
    Login,
    CurrentUser,
    UpdateProfile,
    Settings,
    UpdateSettings,
    Notifications,
    UnreadCount,
    MarkNotificationRead(&'a str),
    DeleteNotification(&'a str),
}

impl<'a> Endpoint<'a> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::SaveLocation | Endpoint::Register | Endpoint::Login => Method::POST,
            Endpoint::UpdateProfile | Endpoint::UpdateSettings | Endpoint::MarkNotificationRead(_) => {
                Method::PUT
            }
            Endpoint::DeleteSavedLocation(_) | Endpoint::DeleteNotification(_) => Method::DELETE,
            _ => Method::GET,
        }
    }

    /// Path segments below the base URL; each is percent-encoded when joined
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Endpoint::CurrentAirQuality(_) => vec!["air-quality", "current"],
            Endpoint::Forecast(_) => vec!["air-quality", "forecast"],
            Endpoint::Historical(..) => vec!["air-quality", "historical"],
            Endpoint::IndianCities(_) => vec!["air-quality", "indian-cities"],
            Endpoint::SearchLocations(_) => vec!["locations", "search"],
            Endpoint::SavedLocations => vec!["locations", "saved"],
            Endpoint::SaveLocation => vec!["locations", "save"],
            Endpoint::DeleteSavedLocation(id) => vec!["locations", "saved", id],
            Endpoint::Register => vec!["users", "register"],
            Endpoint::Login => vec!["users", "login"],
            Endpoint::CurrentUser | Endpoint::UpdateProfile => vec!["users", "me"],
            Endpoint::Settings | Endpoint::UpdateSettings => vec!["users", "settings"],
            Endpoint::Notifications => vec!["notifications"],
            Endpoint::UnreadCount => vec!["notifications", "unread-count"],
            Endpoint::MarkNotificationRead(id) => vec!["notifications", id, "read"],
            Endpoint::DeleteNotification(id) => vec!["notifications", id],
        }
    }

    /// Display form of the path, used in logs and `NotFound` errors
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::CurrentAirQuality(coords) | Endpoint::Forecast(coords) => {
                coords.query_pairs().to_vec()
            }
            Endpoint::Historical(coords, days) => {
                let mut pairs = coords.query_pairs().to_vec();
                pairs.push(("days", days.to_string()));
                pairs
            }
            Endpoint::IndianCities(filter) => {
                let mut pairs = Vec::new();
                if let Some(state) = filter.state.as_deref().filter(|s| !s.is_empty()) {
                    pairs.push(("state", state.to_string()));
                }
                if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
                    pairs.push(("search", search.to_string()));
                }
                pairs
            }
            Endpoint::SearchLocations(q) => vec![("q", q.to_string())],
            _ => Vec::new(),
        }
    }

    /// Whether the backend rejects this route without a bearer token
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Endpoint::SavedLocations
                | Endpoint::SaveLocation
                | Endpoint::DeleteSavedLocation(_)
                | Endpoint::CurrentUser
                | Endpoint::UpdateProfile
                | Endpoint::Settings
                | Endpoint::UpdateSettings
                | Endpoint::Notifications
                | Endpoint::UnreadCount
                | Endpoint::MarkNotificationRead(_)
                | Endpoint::DeleteNotification(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_paths() {
        let coords = GpsCoordinates::new(Decimal::new(19076, 3), Decimal::new(728777, 4));
        assert_eq!(Endpoint::CurrentAirQuality(&coords).path(), "/air-quality/current");
        assert_eq!(Endpoint::MarkNotificationRead("abc").path(), "/notifications/abc/read");
        assert_eq!(Endpoint::DeleteSavedLocation("42").method(), Method::DELETE);
        assert_eq!(Endpoint::Login.method(), Method::POST);
        assert_eq!(Endpoint::UpdateSettings.method(), Method::PUT);
        assert_eq!(Endpoint::UnreadCount.path(), "/notifications/unread-count");
        assert_eq!(Endpoint::UnreadCount.method(), Method::GET);
    }

    #[test]
    fn test_historical_query_includes_days() {
        let coords = GpsCoordinates::new(Decimal::new(19076, 3), Decimal::new(728777, 4));
        assert_eq!(
            Endpoint::Historical(&coords, 7).query(),
            vec![
                ("lat", "19.076".to_string()),
                ("lng", "72.8777".to_string()),
                ("days", "7".to_string())
            ]
        );
    }

    #[test]
    fn test_city_query_skips_empty_filters() {
        let filter = IndianCityQuery {
            state: Some(String::new()),
            search: Some("pur".into()),
        };
        assert_eq!(
            Endpoint::IndianCities(&filter).query(),
            vec![("search", "pur".to_string())]
        );
    }

    #[test]
    fn test_session_requirements() {
        assert!(!Endpoint::Login.requires_session());
        assert!(!Endpoint::SearchLocations("x").requires_session());
        assert!(Endpoint::SavedLocations.requires_session());
        assert!(Endpoint::Notifications.requires_session());
        assert!(Endpoint::UnreadCount.requires_session());
    }
}
