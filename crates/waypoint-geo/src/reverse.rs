//! Reverse geocoding: convert coordinates to address components.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::types::{AddressParts, GeocodeError};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Waypoint/0.1.0 (https://github.com/waypoint)";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    county: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    /// Prefer city > town > village > municipality for the locality,
    /// state > county for the region.
    fn into_parts(self) -> AddressParts {
        AddressParts {
            city: self.city.or(self.town).or(self.village).or(self.municipality),
            region: self.state.or(self.county),
            country: self.country,
        }
    }
}

/// Client for coordinate-to-address lookups.
#[derive(Debug)]
pub struct ReverseGeocoder {
    client: Client,
    base_url: String,
}

impl ReverseGeocoder {
    /// Create a client against the given reverse endpoint, e.g.
    /// `https://nominatim.openstreetmap.org/reverse`.
    ///
    /// # Errors
    /// Returns `GeocodeError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Reverse geocode coordinates to address components.
    ///
    /// Returns `None` on any failure (transport, non-2xx, parse, or an
    /// addressless response); reverse geocoding is best-effort and the
    /// caller falls back to a literal name.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Option<AddressParts> {
        let response = match self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
                ("zoom", "10".to_string()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Reverse geocode request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return None;
        }

        let body: NominatimResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Reverse geocode parse error: {}", e);
                return None;
            }
        };

        let parts = body.address?.into_parts();
        tracing::debug!("Reverse geocoded ({}, {}) to {:?}", latitude, longitude, parts);
        Some(parts)
    }
}
