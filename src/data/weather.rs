//! OpenWeatherMap current-weather client
//!
//! This module fetches the current conditions for a city and classifies every
//! failure into a [`FetchError`] so front ends can tell network, server and
//! parsing problems apart.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use super::WeatherReading;

/// Base URL for the OpenWeatherMap current-weather endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Message used when a non-200 response carries no readable `message`
const UNKNOWN_SERVER_MESSAGE: &str = "Unknown error";

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service could not be reached at all
    #[error("Unable to connect to the weather service: {0}")]
    NetworkUnavailable(#[source] reqwest::Error),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The service answered with a non-200 status
    #[error("Error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Anything else, including malformed responses
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Classifies a transport-level reqwest error
    fn from_transport(err: reqwest::Error) -> Self {
        // connect timeouts report both flags; timeout wins
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::NetworkUnavailable(err)
        } else if err.is_decode() {
            FetchError::Unexpected(format!("malformed response: {}", err))
        } else {
            FetchError::Unexpected(err.to_string())
        }
    }
}

/// Connection settings for [`WeatherClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OpenWeatherMap API key sent as `appid`
    pub api_key: String,
    /// Endpoint URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a config for the public endpoint with the default timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the endpoint URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Anything that can produce a reading for a city
///
/// Front ends depend on this rather than on [`WeatherClient`] directly so
/// they can be driven by a fixed source in tests.
#[allow(async_fn_in_trait)]
pub trait WeatherSource {
    /// Fetches the current reading for `city`
    async fn current_weather(&self, city: &str) -> Result<WeatherReading, FetchError>;
}

/// Client for fetching weather data from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    config: ClientConfig,
}

impl WeatherClient {
    /// Create a new WeatherClient from explicit configuration
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Unexpected(format!("unable to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Fetch current weather for the given city
    ///
    /// The server is always asked for metric units; conversion to the user's
    /// unit happens at display time.
    ///
    /// # Returns
    /// * `Ok(WeatherReading)` - Current conditions for the city
    /// * `Err(FetchError)` - Classified failure; never retried
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, FetchError> {
        tracing::debug!(city, url = %self.config.base_url, "requesting current weather");

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            let message = server_message(&text);
            tracing::warn!(city, status = status.as_u16(), %message, "weather service returned an error");
            return Err(FetchError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let reading: WeatherReading = response.json().await.map_err(FetchError::from_transport)?;
        tracing::debug!(city = %reading.city, "received current weather");
        Ok(reading)
    }
}

impl WeatherSource for WeatherClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherReading, FetchError> {
        self.fetch_weather(city).await
    }
}

/// Error body returned by the API, e.g. `{"cod":"404","message":"city not found"}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extracts the server-supplied message from an error body
fn server_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| UNKNOWN_SERVER_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SAMPLE_PAYLOAD;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WEATHER_PATH: &str = "/data/2.5/weather";

    fn client_for(server: &MockServer) -> WeatherClient {
        WeatherClient::new(
            ClientConfig::new("test-key")
                .with_base_url(format!("{}{}", server.uri(), WEATHER_PATH))
                .with_timeout(Duration::from_secs(5)),
        )
        .expect("Failed to build client")
    }

    /// Mounts a response for any lookup of `city`
    async fn mount_response(server: &MockServer, city: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .and(query_param("q", city))
            .and(query_param("units", "metric"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_success_parses_reading_and_sends_query() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .and(query_param("q", "San Francisco"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_PAYLOAD))
            .expect(1)
            .mount(&mock_server)
            .await;

        let reading = client_for(&mock_server)
            .fetch_weather("San Francisco")
            .await
            .expect("fetch should succeed");

        assert_eq!(reading.city, "Testville");
        assert!((reading.temperature - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fetch_not_found_carries_server_message() {
        let mock_server = MockServer::start().await;
        mount_response(
            &mock_server,
            "Atlantis",
            ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })),
        )
        .await;

        let err = client_for(&mock_server).fetch_weather("Atlantis").await.unwrap_err();

        match err {
            FetchError::ServerError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "city not found");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_error_without_message_uses_fallback() {
        let mock_server = MockServer::start().await;
        mount_response(
            &mock_server,
            "London",
            ResponseTemplate::new(500).set_body_string("oops"),
        )
        .await;

        let err = client_for(&mock_server).fetch_weather("London").await.unwrap_err();

        match err {
            FetchError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Unknown error");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_unexpected() {
        let mock_server = MockServer::start().await;
        mount_response(
            &mock_server,
            "London",
            ResponseTemplate::new(200).set_body_string("{ not json"),
        )
        .await;

        let err = client_for(&mock_server).fetch_weather("London").await.unwrap_err();

        assert!(matches!(err, FetchError::Unexpected(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_unavailable() {
        // Bind then drop to get a port nobody is listening on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = WeatherClient::new(
            ClientConfig::new("test-key").with_base_url(format!("http://{}/weather", addr)),
        )
        .unwrap();

        let err = client.fetch_weather("London").await.unwrap_err();

        assert!(matches!(err, FetchError::NetworkUnavailable(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_slow_server_times_out() {
        let mock_server = MockServer::start().await;
        mount_response(
            &mock_server,
            "London",
            ResponseTemplate::new(200)
                .set_body_string(SAMPLE_PAYLOAD)
                .set_delay(Duration::from_secs(5)),
        )
        .await;

        let client = WeatherClient::new(
            ClientConfig::new("test-key")
                .with_base_url(format!("{}{}", mock_server.uri(), WEATHER_PATH))
                .with_timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let err = client.fetch_weather("London").await.unwrap_err();

        assert!(matches!(err, FetchError::Timeout), "got {:?}", err);
    }

    #[test]
    fn test_server_message_extraction() {
        assert_eq!(
            server_message(r#"{"cod":401,"message":"Invalid API key"}"#),
            "Invalid API key"
        );
        assert_eq!(server_message(r#"{"cod":401}"#), "Unknown error");
        assert_eq!(server_message(""), "Unknown error");
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new("abc");
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::ServerError {
            status: 404,
            message: "city not found".to_string(),
        };
        assert_eq!(err.to_string(), "Error 404: city not found");
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
    }
}
