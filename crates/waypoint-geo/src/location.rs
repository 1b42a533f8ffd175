//! Device location boundary: foreground permission and position fix.

use async_trait::async_trait;

use crate::types::{GeoPoint, LocationError};

/// Outcome of a foreground-permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Platform location/permission primitives.
///
/// Implementations wrap the OS geolocation stack; tests substitute
/// fakes. Both calls are one-shot; there is no subscription API.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Request foreground location permission from the user.
    async fn request_permission(&self) -> Result<Permission, LocationError>;

    /// Obtain a single current-position fix.
    async fn current_position(&self) -> Result<GeoPoint, LocationError>;
}

/// Default provider backed by the platform geolocation service.
///
/// Platform backends are not wired up yet; permission resolves as
/// granted and the position fix reports the service as unavailable,
/// which capture flows surface as a user-visible error.
#[derive(Debug, Default)]
pub struct SystemLocationProvider;

#[async_trait]
impl LocationProvider for SystemLocationProvider {
    async fn request_permission(&self) -> Result<Permission, LocationError> {
        Ok(Permission::Granted)
    }

    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}
