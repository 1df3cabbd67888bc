// NominatimGeocoder - reverse geocoding via the OpenStreetMap Nominatim API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::provider::{Address, ReverseGeocoder};
use crate::media::Coordinates;
use crate::settings::GeocodingSettings;

/// Public Nominatim reverse endpoint
pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

/// Building/POI-level detail
pub const DEFAULT_ZOOM: u8 = 18;

/// Reverse geocoder backed by Nominatim's `/reverse` endpoint.
///
/// Nominatim's usage policy requires an identifying User-Agent, which is
/// set on every request.
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
    zoom: u8,
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>, user_agent: &str, zoom: u8, timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        let endpoint = endpoint.into();
        tracing::info!(endpoint = %endpoint, zoom, "Nominatim: geocoder initialized");

        Ok(Self {
            client,
            endpoint,
            zoom,
        })
    }

    pub fn from_settings(settings: &GeocodingSettings) -> Result<Self, String> {
        Self::new(
            settings.endpoint.clone(),
            &settings.user_agent,
            settings.zoom,
            Duration::from_secs(settings.timeout_secs),
        )
    }
}

// ── Nominatim response shape ──

#[derive(Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> Result<Address, String> {
        tracing::debug!(lat = coordinates.lat, lng = coordinates.lng, "Nominatim: reverse lookup");

        let response = self.client
            .get(&self.endpoint)
            .query(&[
                ("format", "json".to_string()),
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lng.to_string()),
                ("zoom", self.zoom.to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| format!("Nominatim request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, "Nominatim: non-success response");
            return Err(format!("Failed to fetch POI data: Nominatim returned {}", status));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Nominatim response: {}", e))?;

        // Nominatim answers 200 with {"error": ...} and no address for open sea etc.
        Ok(body.address.unwrap_or_default())
    }
}
