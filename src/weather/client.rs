//! Open-Meteo HTTP client implementation.
//!
//! This module provides `WeatherClient` for making synchronous requests to
//! the Open-Meteo forecast endpoint, along with error types and a builder
//! for configuration.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Errors that can occur when fetching a weather reading.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network-related errors (connection failures, DNS resolution, timeouts)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP errors with status code
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// The response body did not match the expected shape
    #[error("Malformed weather response: {0}")]
    Malformed(#[source] reqwest::Error),

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Typed subset of the Open-Meteo forecast response.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature_2m: f64,
    #[allow(dead_code)]
    wind_speed_10m: Option<f64>,
}

/// Builder for constructing `WeatherClient` instances.
///
/// # Examples
///
/// ```
/// use jot::weather::WeatherClientBuilder;
///
/// let client = WeatherClientBuilder::new()
///     .base_url("https://api.open-meteo.com")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct WeatherClientBuilder {
    base_url: Option<String>,
}

impl WeatherClientBuilder {
    /// Creates a new `WeatherClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for the forecast API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the `WeatherClient` with the configured settings.
    ///
    /// # Environment Variables
    ///
    /// If `base_url()` was not called, this method checks the
    /// `OPEN_METEO_URL` environment variable and falls back to the public
    /// Open-Meteo endpoint.
    pub fn build(self) -> Result<WeatherClient, WeatherError> {
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            std::env::var("OPEN_METEO_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
        };

        reqwest::Url::parse(&base_url)
            .map_err(|e| WeatherError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(WeatherError::Network)?;

        Ok(WeatherClient { client, base_url })
    }
}

/// Synchronous HTTP client for the Open-Meteo forecast API.
///
/// Should be constructed using `WeatherClientBuilder`.
pub struct WeatherClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

/// Trait for weather lookup operations.
///
/// Enables mocking in unit tests and keeps the UI layers independent of the
/// concrete HTTP client.
pub trait WeatherProvider {
    /// Returns the current temperature in degrees Celsius at the coordinate.
    fn current_temperature(&self, latitude: f64, longitude: f64) -> Result<f64, WeatherError>;
}

impl WeatherClient {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch_current(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", "temperature_2m,wind_speed_10m".to_string()),
            ])
            .send()
            .map_err(WeatherError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Http {
                status: status.as_u16(),
            });
        }

        response.json().map_err(WeatherError::Malformed)
    }
}

impl WeatherProvider for WeatherClient {
    fn current_temperature(&self, latitude: f64, longitude: f64) -> Result<f64, WeatherError> {
        let forecast = self.fetch_current(latitude, longitude)?;
        Ok(forecast.current.temperature_2m)
    }
}
