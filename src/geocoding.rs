use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::UNKNOWN_ADDRESS;
use crate::coordinate::Coordinate;
use crate::settings::Settings;

/// Why a reverse lookup produced no address
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("geocoder answered with status {0}")]
    Status(StatusCode),

    #[error("response is not valid JSON: {0}")]
    Json(#[source] reqwest::Error),

    #[error("response has no display_name")]
    MissingDisplayName,
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeocodeError::Timeout
        } else if e.is_decode() {
            GeocodeError::Json(e)
        } else {
            GeocodeError::Request(e)
        }
    }
}

// Only the field we need; Nominatim sends a lot more
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// Client for a Nominatim-compatible `/reverse` endpoint
pub struct ReverseGeocoder {
    client: Client,
    endpoint: String,
}

impl ReverseGeocoder {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, &settings.geocoder_url))
    }

    /// Uses a preconfigured client (user agent, timeout and proxy are taken from it)
    pub fn with_client(client: Client, endpoint: &str) -> Self {
        ReverseGeocoder {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// One GET to the endpoint; every failure mode is reported separately.
    pub async fn lookup(&self, coord: Coordinate) -> Result<String, GeocodeError> {
        let lat = coord.lat.to_string();
        let lon = coord.lon.to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GeocodeError::Status(status));
        }

        let body: ReverseResponse = response.json().await?;
        body.display_name.ok_or(GeocodeError::MissingDisplayName)
    }

    /// Best-effort address: any failure yields [`UNKNOWN_ADDRESS`].
    pub async fn address_for(&self, coord: Coordinate) -> String {
        match self.lookup(coord).await {
            Ok(address) => {
                info!(lat = coord.lat, lon = coord.lon, "resolved address");
                address
            }
            Err(e) => {
                debug!(lat = coord.lat, lon = coord.lon, error = %e, "reverse geocoding failed");
                UNKNOWN_ADDRESS.to_string()
            }
        }
    }
}
