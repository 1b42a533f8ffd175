//! Integration tests for the current-location capture flow.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use waypoint_app::{
    CurrentLocationCapture, NoticeSink, SavedLocationRegistry, FALLBACK_NAME,
};
use waypoint_core::AppError;
use waypoint_geo::{GeoPoint, LocationError, LocationProvider, Permission, ReverseGeocoder};
use waypoint_store::LocationStoreClient;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FakeProvider {
    permission: Permission,
    // None simulates a failed fix (service unavailable).
    position: Option<GeoPoint>,
}

#[async_trait]
impl LocationProvider for FakeProvider {
    async fn request_permission(&self) -> Result<Permission, LocationError> {
        Ok(self.permission)
    }

    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        self.position.ok_or(LocationError::ServiceUnavailable)
    }
}

fn granted_at(latitude: f64, longitude: f64) -> Arc<FakeProvider> {
    Arc::new(FakeProvider {
        permission: Permission::Granted,
        position: Some(GeoPoint {
            latitude,
            longitude,
        }),
    })
}

/// Store mock that accepts one insert and serves the refreshed list.
async fn mount_store(server: &MockServer, expected_writes: u64) {
    Mock::given(method("POST"))
        .and(path("/users/user-1/locations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "loc-1",
            "user_id": "user-1",
            "name": "whatever the request said",
            "latitude": 47.6062,
            "longitude": -122.3321,
            "created_at": "2026-08-30T12:00:00Z"
        })))
        .expect(expected_writes)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/user-1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(server)
        .await;
}

fn capture_for(
    server: &MockServer,
    reverse_server: &MockServer,
    provider: Arc<dyn LocationProvider>,
) -> (CurrentLocationCapture, std::sync::mpsc::Receiver<waypoint_app::Notice>) {
    let store = LocationStoreClient::new(&server.uri(), "token".into()).unwrap();
    let (notices, rx) = NoticeSink::channel();
    let registry = Arc::new(SavedLocationRegistry::new(
        Arc::new(store),
        notices.clone(),
    ));
    let reverse =
        Arc::new(ReverseGeocoder::new(&format!("{}/reverse", reverse_server.uri())).unwrap());
    (
        CurrentLocationCapture::new(provider, reverse, registry, notices),
        rx,
    )
}

#[tokio::test]
async fn test_capture_saves_reverse_geocoded_name() {
    let store_server = MockServer::start().await;
    let reverse_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": {"city": "Seattle", "state": "Washington", "country": "United States"}
        })))
        .mount(&reverse_server)
        .await;
    // The derived name must reach the store verbatim.
    Mock::given(method("POST"))
        .and(path("/users/user-1/locations"))
        .and(body_partial_json(serde_json::json!({
            "name": "Seattle, Washington, United States"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "loc-1",
            "user_id": "user-1",
            "name": "Seattle, Washington, United States",
            "latitude": 47.6062,
            "longitude": -122.3321,
            "created_at": "2026-08-30T12:00:00Z"
        })))
        .expect(1)
        .mount(&store_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/user-1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&store_server)
        .await;

    let (capture, _rx) = capture_for(
        &store_server,
        &reverse_server,
        granted_at(47.6062, -122.3321),
    );
    let saved = capture.capture_and_save("user-1").await.unwrap();
    assert_eq!(saved.name, "Seattle, Washington, United States");
}

#[tokio::test]
async fn test_capture_falls_back_when_no_address() {
    let store_server = MockServer::start().await;
    let reverse_server = MockServer::start().await;
    // Addressless spot: Nominatim reports an error member instead.
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "Unable to geocode"
        })))
        .mount(&reverse_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/user-1/locations"))
        .and(body_partial_json(serde_json::json!({"name": FALLBACK_NAME})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "loc-1",
            "user_id": "user-1",
            "name": FALLBACK_NAME,
            "latitude": 0.0,
            "longitude": -150.0,
            "created_at": "2026-08-30T12:00:00Z"
        })))
        .expect(1)
        .mount(&store_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/user-1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&store_server)
        .await;

    let (capture, _rx) = capture_for(&store_server, &reverse_server, granted_at(0.0, -150.0));
    let saved = capture.capture_and_save("user-1").await.unwrap();
    assert_eq!(saved.name, FALLBACK_NAME);
}

#[tokio::test]
async fn test_permission_denied_writes_nothing() {
    let store_server = MockServer::start().await;
    let reverse_server = MockServer::start().await;
    mount_store(&store_server, 0).await;

    let provider = Arc::new(FakeProvider {
        permission: Permission::Denied,
        position: Some(GeoPoint {
            latitude: 0.0,
            longitude: 0.0,
        }),
    });
    let (capture, rx) = capture_for(&store_server, &reverse_server, provider);

    let err = capture.capture_and_save("user-1").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Location(LocationError::PermissionDenied)
    ));
    assert_eq!(rx.try_iter().count(), 1);
}

#[tokio::test]
async fn test_position_failure_writes_nothing() {
    let store_server = MockServer::start().await;
    let reverse_server = MockServer::start().await;
    mount_store(&store_server, 0).await;

    let provider = Arc::new(FakeProvider {
        permission: Permission::Granted,
        position: None,
    });
    let (capture, _rx) = capture_for(&store_server, &reverse_server, provider);

    let err = capture.capture_and_save("user-1").await.unwrap_err();
    assert!(matches!(err, AppError::Location(_)));
}

#[tokio::test]
async fn test_missing_identity_is_reported_before_permission() {
    let store_server = MockServer::start().await;
    let reverse_server = MockServer::start().await;
    mount_store(&store_server, 0).await;

    let (capture, rx) = capture_for(
        &store_server,
        &reverse_server,
        granted_at(47.6062, -122.3321),
    );
    let err = capture.capture_and_save("").await.unwrap_err();

    assert!(matches!(err, AppError::Session(_)));
    let notices: Vec<_> = rx.try_iter().collect();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("signed in"));
}
