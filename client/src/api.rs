//! HTTP client for the air quality backend

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    validate_coordinates, validate_history_days, validate_search_query, AqiForecast, AqiReading,
    ApiMessage, GpsCoordinates, HistoricalData, IndianCitiesResponse, IndianCityQuery,
    Location, LoginCredentials, NewLocation, Notification, ProfileUpdate, RegisterUser, SavedLocation,
    TokenResponse, UnreadCount, UserProfile, UserSettings,
};
use tracing::{debug, warn};
use validator::Validate;

use crate::config::ApiConfig;
use crate::endpoint::Endpoint;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Air quality backend client
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Create a client for `config.base_url` acting as `session`
    pub fn new(config: &ApiConfig, session: Session) -> ClientResult<Self> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Same connection pool, different session
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Absolute URL for an endpoint, query included
    pub fn url_for(&self, endpoint: &Endpoint<'_>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        let query = endpoint.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// Request builder with auth applied; fails early when a session is required but absent
    pub fn prepare(&self, endpoint: &Endpoint<'_>) -> ClientResult<RequestBuilder> {
        if endpoint.requires_session() && !self.session.is_authenticated() {
            return Err(ClientError::MissingSession);
        }

        let mut builder = self
            .http
            .request(endpoint.method(), self.url_for(endpoint))
            .header(ACCEPT, "application/json");
        if let Some(bearer) = self.session.bearer() {
            builder = builder.header(AUTHORIZATION, bearer);
        }
        Ok(builder)
    }

    async fn call<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> ClientResult<T> {
        let builder = self.prepare(&endpoint)?;
        self.execute(builder, &endpoint).await
    }

    async fn call_with_body<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint<'_>,
        body: &B,
    ) -> ClientResult<T> {
        let builder = self.prepare(&endpoint)?.json(body);
        self.execute(builder, &endpoint).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: &Endpoint<'_>,
    ) -> ClientResult<T> {
        let path = endpoint.path();
        debug!(method = %endpoint.method(), path = %path, "sending request");

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(path = %path, status = %status, "backend returned an error");
        }
        decode_response(status, &path, &body)
    }

    // ------------------------------------------------------------------------
    // Air quality
    // ------------------------------------------------------------------------

    /// Fetch the current reading at a point
    pub async fn current_air_quality(&self, coords: &GpsCoordinates) -> ClientResult<AqiReading> {
        validate_coordinates(coords).map_err(|e| ClientError::Validation(e.into()))?;
        self.call(Endpoint::CurrentAirQuality(coords)).await
    }

    /// Fetch the hourly forecast at a point
    pub async fn forecast(&self, coords: &GpsCoordinates) -> ClientResult<AqiForecast> {
        validate_coordinates(coords).map_err(|e| ClientError::Validation(e.into()))?;
        self.call(Endpoint::Forecast(coords)).await
    }

    /// Fetch `days` days of history at a point
    pub async fn historical(&self, coords: &GpsCoordinates, days: u32) -> ClientResult<HistoricalData> {
        validate_coordinates(coords).map_err(|e| ClientError::Validation(e.into()))?;
        validate_history_days(days).map_err(|e| ClientError::Validation(e.into()))?;
        self.call(Endpoint::Historical(coords, days)).await
    }

    /// Browse the Indian city catalog
    pub async fn indian_cities(&self, query: &IndianCityQuery) -> ClientResult<IndianCitiesResponse> {
        self.call(Endpoint::IndianCities(query)).await
    }

    // ------------------------------------------------------------------------
    // Locations
    // ------------------------------------------------------------------------

    /// Search locations by name. Search is best-effort: failures give an empty list.
    pub async fn search_locations(&self, query: &str) -> Vec<Location> {
        if validate_search_query(query).is_err() {
            return Vec::new();
        }
        match self.call(Endpoint::SearchLocations(query.trim())).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "location search failed");
                Vec::new()
            }
        }
    }

    pub async fn saved_locations(&self) -> ClientResult<Vec<SavedLocation>> {
        self.call(Endpoint::SavedLocations).await
    }

    pub async fn save_location(&self, location: &NewLocation) -> ClientResult<SavedLocation> {
        location.validate()?;
        self.call_with_body(Endpoint::SaveLocation, location).await
    }

    pub async fn delete_saved_location(&self, id: &str) -> ClientResult<ApiMessage> {
        self.call(Endpoint::DeleteSavedLocation(record_id(id)?)).await
    }

    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    /// Register an account. Build a new client with [`Session::from_token_response`] to use it.
    pub async fn register(&self, user: &RegisterUser) -> ClientResult<TokenResponse> {
        user.validate()?;
        self.call_with_body(Endpoint::Register, user).await
    }

    /// Exchange credentials for a token
    pub async fn login(&self, credentials: &LoginCredentials) -> ClientResult<TokenResponse> {
        credentials.validate()?;
        self.call_with_body(Endpoint::Login, credentials).await
    }

    pub async fn current_user(&self) -> ClientResult<UserProfile> {
        self.call(Endpoint::CurrentUser).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<UserProfile> {
        update.validate()?;
        self.call_with_body(Endpoint::UpdateProfile, update).await
    }

    /// The user's settings, or defaults when signed out or the backend fails
    pub async fn settings(&self) -> UserSettings {
        if !self.session.is_authenticated() {
            return UserSettings::default();
        }
        match self.call(Endpoint::Settings).await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "falling back to default settings");
                UserSettings::default()
            }
        }
    }

    pub async fn update_settings(&self, settings: &UserSettings) -> ClientResult<UserSettings> {
        settings.validate()?;
        self.call_with_body(Endpoint::UpdateSettings, settings).await
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    pub async fn notifications(&self) -> ClientResult<Vec<Notification>> {
        self.call(Endpoint::Notifications).await
    }

    /// Unread total for the header badge
    pub async fn unread_count(&self) -> ClientResult<u64> {
        let count: UnreadCount = self.call(Endpoint::UnreadCount).await?;
        Ok(count.unread_count)
    }

    pub async fn mark_notification_read(&self, id: &str) -> ClientResult<Notification> {
        self.call(Endpoint::MarkNotificationRead(record_id(id)?)).await
    }

    pub async fn delete_notification(&self, id: &str) -> ClientResult<ApiMessage> {
        self.call(Endpoint::DeleteNotification(record_id(id)?)).await
    }
}

/// A record id must name one record; a blank one would address the collection
fn record_id(id: &str) -> ClientResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ClientError::Validation("Record id must not be empty".to_string()));
    }
    Ok(id)
}

/// Turn a status and body into a typed result
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, path: &str, body: &str) -> ClientResult<T> {
    if !status.is_success() {
        return Err(ClientError::from_status(status, path, body.to_string()));
    }
    serde_json::from_str(body).map_err(|e| ClientError::Decode(format!("{}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn client(session: Session) -> ApiClient {
        ApiClient::new(&ApiConfig::default(), session).unwrap()
    }

    fn delhi() -> GpsCoordinates {
        GpsCoordinates::new(Decimal::new(286139, 4), Decimal::new(772090, 4))
    }

    #[test]
    fn test_url_for_current() {
        let coords = delhi();
        let url = client(Session::anonymous()).url_for(&Endpoint::CurrentAirQuality(&coords));
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/air-quality/current?lat=28.6139&lng=77.2090"
        );
    }

    #[test]
    fn test_url_keeps_base_path_and_encodes_segments() {
        let config = ApiConfig {
            base_url: "https://aq.example.in/api/".into(),
            ..ApiConfig::default()
        };
        let api = ApiClient::new(&config, Session::anonymous()).unwrap();
        assert_eq!(
            api.url_for(&Endpoint::DeleteNotification("a/b")).as_str(),
            "https://aq.example.in/api/notifications/a%2Fb"
        );
        assert_eq!(
            api.url_for(&Endpoint::SearchLocations("New Delhi")).as_str(),
            "https://aq.example.in/api/locations/search?q=New+Delhi"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".into(),
            ..ApiConfig::default()
        };
        let err = ApiClient::new(&config, Session::anonymous()).unwrap_err();
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_prepare_requires_session() {
        let anonymous = client(Session::anonymous());
        assert!(matches!(
            anonymous.prepare(&Endpoint::SavedLocations),
            Err(ClientError::MissingSession)
        ));
        assert!(anonymous.prepare(&Endpoint::Login).is_ok());
    }

    #[test]
    fn test_prepare_attaches_bearer() {
        let api = client(Session::authenticated("tok"));
        let request = api.prepare(&Endpoint::Notifications).unwrap().build().unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer tok")
        );

        let signed_out = api.with_session(Session::anonymous());
        let request = signed_out.prepare(&Endpoint::Login).unwrap().build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_decode_response() {
        let reading: AqiReading =
            decode_response(StatusCode::OK, "/air-quality/current", r#"{"aqi": 156, "pm25": 80.2}"#).unwrap();
        assert_eq!(reading.band().label, "Unhealthy");
        assert_eq!(reading.pm10, None);

        let err = decode_response::<AqiReading>(StatusCode::OK, "/air-quality/current", "{").unwrap_err();
        assert_eq!(err.code(), "DECODE_ERROR");

        let err = decode_response::<AqiReading>(StatusCode::UNAUTHORIZED, "/users/me", "").unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[tokio::test]
    async fn test_settings_default_when_signed_out() {
        let settings = client(Session::anonymous()).settings().await;
        assert_eq!(settings, UserSettings::default());
    }

    #[tokio::test]
    async fn test_blank_search_makes_no_request() {
        let results = client(Session::anonymous()).search_locations("   ").await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_coordinates_rejected_before_request() {
        let coords = GpsCoordinates::new(Decimal::from(120), Decimal::ZERO);
        let err = client(Session::anonymous()).current_air_quality(&coords).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_blank_record_ids_rejected_before_request() {
        let api = client(Session::authenticated("tok"));
        for result in [
            api.delete_saved_location("").await.map(|_| ()),
            api.mark_notification_read("  ").await.map(|_| ()),
            api.delete_notification("").await.map(|_| ()),
        ] {
            assert!(matches!(result, Err(ClientError::Validation(_))));
        }
    }

    #[test]
    fn test_record_id_trims() {
        assert_eq!(record_id(" 65f0 ").unwrap(), "65f0");
        assert!(record_id("").is_err());
    }

    #[tokio::test]
    async fn test_unread_count_requires_session() {
        let err = client(Session::anonymous()).unread_count().await.unwrap_err();
        assert!(matches!(err, ClientError::MissingSession));
    }

    #[tokio::test]
    async fn test_update_profile_validated_before_session_check() {
        let api = client(Session::anonymous());
        let update = ProfileUpdate {
            username: Some("ab".into()),
            full_name: None,
        };
        let err = api.update_profile(&update).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let update = ProfileUpdate {
            username: Some("asha_k".into()),
            full_name: Some("Asha K".into()),
        };
        let err = api.update_profile(&update).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingSession));
    }

    #[tokio::test]
    async fn test_history_days_validated() {
        let coords = delhi();
        let err = client(Session::anonymous()).historical(&coords, 0).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
