//! Place-search controller: query text, result staleness, indicator.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use waypoint_geo::{GeocodingClient, SearchResult};

/// Queries shorter than this issue no service call at all.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    results: Vec<SearchResult>,
}

/// Owns the search box state for the Add-Location panel.
///
/// Every issued request is tagged with a monotonic token; a response
/// is applied only while its token is still the latest issued, so a
/// slow response for a superseded query can never clobber the results
/// of a newer one. There is no cancellation: stale responses complete
/// and are discarded.
pub struct SearchController {
    geocoder: Arc<GeocodingClient>,
    state: Mutex<SearchState>,
    seq: AtomicU64,
}

impl SearchController {
    pub fn new(geocoder: Arc<GeocodingClient>) -> Self {
        Self {
            geocoder,
            state: Mutex::new(SearchState::default()),
            seq: AtomicU64::new(0),
        }
    }

    /// Current query text.
    pub fn query(&self) -> String {
        self.state.lock().query.clone()
    }

    /// Current visible result set, in service order.
    pub fn results(&self) -> Vec<SearchResult> {
        self.state.lock().results.clone()
    }

    /// True while a search request is outstanding.
    pub fn is_searching(&self) -> bool {
        self.geocoder.is_in_flight()
    }

    /// Update the query. Queries shorter than `MIN_QUERY_CHARS` clear
    /// the results synchronously without touching the service;
    /// anything longer issues a search. Search failures collapse to an
    /// empty result set because search is best-effort.
    pub async fn set_query(&self, text: &str) {
        let token = self.bump_token();
        {
            let mut state = self.state.lock();
            state.query = text.to_string();
            if text.chars().count() < MIN_QUERY_CHARS {
                state.results.clear();
                return;
            }
        }

        let results = match self.geocoder.search(text).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Place search for {:?} failed: {}", text, e);
                Vec::new()
            }
        };

        // Discard if another query was issued while this one was in
        // flight; only the most recently issued query may land.
        if self.seq.load(Ordering::SeqCst) == token {
            self.state.lock().results = results;
        } else {
            tracing::debug!("Discarding stale search response for {:?}", text);
        }
    }

    /// Drop query text and results, invalidating any in-flight
    /// request. Used when the Add-Location panel opens or closes.
    pub fn reset(&self) {
        self.bump_token();
        let mut state = self.state.lock();
        state.query.clear();
        state.results.clear();
    }

    /// Drop the results only, invalidating any in-flight request.
    /// Used after a candidate is selected.
    pub fn clear_results(&self) {
        self.bump_token();
        self.state.lock().results.clear();
    }

    fn bump_token(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn candidate(name: &str, country: &str, lat: f64, lon: f64) -> serde_json::Value {
        serde_json::json!({
            "name": name, "country": country, "latitude": lat, "longitude": lon
        })
    }

    fn controller_for(server: &MockServer) -> Arc<SearchController> {
        let geocoder =
            GeocodingClient::new(&format!("{}/v1/search", server.uri()), "en", 5).unwrap();
        Arc::new(SearchController::new(Arc::new(geocoder)))
    }

    #[tokio::test]
    async fn test_short_query_issues_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let controller = controller_for(&server);
        controller.set_query("p").await;

        assert_eq!(controller.query(), "p");
        assert!(controller.results().is_empty());
    }

    #[tokio::test]
    async fn test_short_query_clears_previous_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [candidate("Paris", "France", 48.8566, 2.3522)]
            })))
            .mount(&server)
            .await;

        let controller = controller_for(&server);
        controller.set_query("paris").await;
        assert_eq!(controller.results().len(), 1);

        controller.set_query("").await;
        assert!(controller.results().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_collapses_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let controller = controller_for(&server);
        controller.set_query("paris").await;
        assert!(controller.results().is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let server = MockServer::start().await;
        // The first query's response arrives long after the second's.
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "paris"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "results": [candidate("Paris", "France", 48.8566, 2.3522)]
                    }))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "tokyo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [candidate("Tokyo", "Japan", 35.6762, 139.6503)]
            })))
            .mount(&server)
            .await;

        let controller = controller_for(&server);
        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.set_query("paris").await })
        };
        // Let the first request get issued before superseding it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.set_query("tokyo").await;
        slow.await.unwrap();

        let results = controller.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Tokyo");
    }

    #[tokio::test]
    async fn test_reset_discards_in_flight_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "results": [candidate("Paris", "France", 48.8566, 2.3522)]
                    }))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let controller = controller_for(&server);
        let pending = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.set_query("paris").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.reset();
        pending.await.unwrap();

        assert_eq!(controller.query(), "");
        assert!(controller.results().is_empty());
    }
}
