//! One-shot capture of the device's current position as a new entry.

use std::sync::Arc;

use waypoint_core::{AppError, SessionError};
use waypoint_geo::{LocationProvider, Permission, ReverseGeocoder};
use waypoint_store::SavedLocation;

use crate::notice::NoticeSink;
use crate::registry::SavedLocationRegistry;

/// Name used when reverse geocoding yields no address components.
pub const FALLBACK_NAME: &str = "Current Location";

/// Capture-and-save flow: permission, position fix, reverse-geocoded
/// name, persist.
///
/// The flow is a single transaction from the caller's perspective:
/// nothing is written unless permission, capture, and persistence all
/// complete. Reverse geocoding is the one soft step; its failure only
/// downgrades the name to [`FALLBACK_NAME`].
pub struct CurrentLocationCapture {
    provider: Arc<dyn LocationProvider>,
    reverse: Arc<ReverseGeocoder>,
    registry: Arc<SavedLocationRegistry>,
    notices: NoticeSink,
}

impl CurrentLocationCapture {
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        reverse: Arc<ReverseGeocoder>,
        registry: Arc<SavedLocationRegistry>,
        notices: NoticeSink,
    ) -> Self {
        Self {
            provider,
            reverse,
            registry,
            notices,
        }
    }

    /// Capture the current position and save it for `user_id`.
    ///
    /// Missing identity and a denied permission are distinct, each
    /// reported on its own; neither reaches the store.
    ///
    /// # Errors
    /// Returns `AppError::Session` with no identity,
    /// `AppError::Location` when permission is denied or the fix
    /// fails, and whatever the registry create reports.
    pub async fn capture_and_save(&self, user_id: &str) -> Result<SavedLocation, AppError> {
        if user_id.is_empty() {
            let err = AppError::from(SessionError::NoIdentity);
            self.notices.error(err.user_message());
            return Err(err);
        }

        match self.provider.request_permission().await {
            Ok(Permission::Granted) => {}
            Ok(Permission::Denied) => {
                let err = AppError::from(waypoint_geo::LocationError::PermissionDenied);
                self.notices.error(err.user_message());
                return Err(err);
            }
            Err(e) => {
                let err = AppError::from(e);
                self.notices.error(err.user_message());
                return Err(err);
            }
        }

        let position = match self.provider.current_position().await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Position fix failed: {}", e);
                let err = AppError::from(e);
                self.notices.error(err.user_message());
                return Err(err);
            }
        };

        let name = self
            .reverse
            .reverse(position.latitude, position.longitude)
            .await
            .and_then(|parts| parts.display_name())
            .unwrap_or_else(|| FALLBACK_NAME.to_string());

        tracing::info!(
            "Captured current location ({}, {}) as {:?}",
            position.latitude,
            position.longitude,
            name
        );

        self.registry
            .create(user_id, &name, position.latitude, position.longitude)
            .await
    }
}
