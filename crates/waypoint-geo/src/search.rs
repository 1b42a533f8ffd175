//! Forward geocoding: free-text place search.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::types::{GeocodeError, SearchResult};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Waypoint/0.1.0 (https://github.com/waypoint)";

/// Default number of candidates requested per search.
pub const DEFAULT_RESULT_CAP: u8 = 5;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Absent entirely when the query matched nothing.
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Client for the place-search service.
///
/// Stateless apart from an in-flight counter that callers can surface
/// as a "searching" indicator. Results are returned in service order.
#[derive(Debug)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    language: String,
    result_cap: u8,
    in_flight: AtomicUsize,
}

impl GeocodingClient {
    /// Create a client against the given search endpoint, e.g.
    /// `https://geocoding-api.open-meteo.com/v1/search`.
    ///
    /// # Errors
    /// Returns `GeocodeError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str, language: &str, result_cap: u8) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            language: language.to_string(),
            result_cap,
            in_flight: AtomicUsize::new(0),
        })
    }

    /// True while at least one search request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Search for places matching `name`.
    ///
    /// Returns candidates in service order, capped at the configured
    /// result count. Callers own staleness handling for overlapping
    /// requests; this client only tracks how many are outstanding.
    ///
    /// # Errors
    /// Returns `GeocodeError::Network` on transport failure and
    /// `GeocodeError::Status` on a non-2xx response.
    pub async fn search(&self, name: &str) -> Result<Vec<SearchResult>, GeocodeError> {
        tracing::debug!("Searching places for {:?}", name);
        let _flight = FlightGuard::enter(&self.in_flight);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", name),
                ("count", &self.result_cap.to_string()),
                ("language", &self.language),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        tracing::debug!("Search for {:?} returned {} candidates", name, body.results.len());
        Ok(body.results)
    }
}

/// Increments the counter on entry, decrements on drop, so every exit
/// path (including `?`) clears the indicator.
struct FlightGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> FlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
