//! Authoritative in-memory list of the user's saved locations.

use std::sync::Arc;

use parking_lot::Mutex;

use waypoint_core::{AppError, SessionError, ValidationError};
use waypoint_store::{LocationStoreClient, SavedLocation, SavedLocationCreate};

use crate::notice::NoticeSink;

#[derive(Debug, Default)]
struct RegistryState {
    locations: Vec<SavedLocation>,
    refreshing: bool,
}

/// Owns the saved-location list and every mutation of it.
///
/// The list is only ever replaced wholesale with the full authoritative
/// set from the store, never patched, so overlapping refreshes cannot
/// interleave partial states: last completion wins. Every mutation is
/// followed by a full re-fetch rather than an optimistic local edit,
/// trading latency for consistency with the remote store.
pub struct SavedLocationRegistry {
    store: Arc<LocationStoreClient>,
    state: Mutex<RegistryState>,
    notices: NoticeSink,
}

impl SavedLocationRegistry {
    pub fn new(store: Arc<LocationStoreClient>, notices: NoticeSink) -> Self {
        Self {
            store,
            state: Mutex::new(RegistryState::default()),
            notices,
        }
    }

    /// Snapshot of the current list, newest first.
    pub fn locations(&self) -> Vec<SavedLocation> {
        self.state.lock().locations.clone()
    }

    /// True while a list fetch is outstanding (pull-to-refresh spinner).
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Re-fetch the full list for `user_id`.
    ///
    /// On failure the previously held list is preserved and a notice
    /// is posted; the refreshing indicator clears either way.
    pub async fn refresh(&self, user_id: &str) {
        self.state.lock().refreshing = true;

        let fetched = self.store.list_locations(user_id).await;

        let mut state = self.state.lock();
        state.refreshing = false;
        match fetched {
            Ok(rows) => {
                state.locations = rows;
            }
            Err(e) => {
                drop(state);
                tracing::error!("Failed to refresh saved locations: {}", e);
                self.notices.error(AppError::from(e).user_message());
            }
        }
    }

    /// Persist one location, then refresh the list.
    ///
    /// On store failure nothing is refreshed and the list is unchanged;
    /// the create either fully succeeds (write + refresh) or fully
    /// fails.
    ///
    /// # Errors
    /// Returns `AppError::Session` when no identity is given,
    /// `AppError::Validation` for an empty name or out-of-range
    /// coordinates, and `AppError::Store` when the write fails.
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<SavedLocation, AppError> {
        self.validate_save(user_id, name, latitude, longitude)
            .inspect_err(|e| self.notices.error(e.user_message()))?;

        let request = SavedLocationCreate {
            user_id: user_id.to_string(),
            name: name.trim().to_string(),
            latitude,
            longitude,
        };

        match self.store.create_location(request).await {
            Ok(created) => {
                self.notices.info(format!("Saved {}", created.name));
                self.refresh(user_id).await;
                Ok(created)
            }
            Err(e) => {
                tracing::error!("Failed to save location {:?}: {}", name, e);
                let err = AppError::from(e);
                self.notices.error(err.user_message());
                Err(err)
            }
        }
    }

    /// Delete one location by id, then refresh the list.
    ///
    /// The destructive-action confirmation is owned by the caller; by
    /// the time this runs the user has already confirmed.
    ///
    /// # Errors
    /// Returns `AppError::Store` when the delete fails, including for
    /// an unknown id; the list is left unchanged in that case.
    pub async fn delete(&self, user_id: &str, location_id: &str) -> Result<(), AppError> {
        match self.store.delete_location(location_id).await {
            Ok(()) => {
                self.refresh(user_id).await;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to delete location {}: {}", location_id, e);
                let err = AppError::from(e);
                self.notices.error(err.user_message());
                Err(err)
            }
        }
    }

    fn validate_save(
        &self,
        user_id: &str,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), AppError> {
        if user_id.is_empty() {
            return Err(SessionError::NoIdentity.into());
        }
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::Latitude(latitude).into());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::Longitude(longitude).into());
        }
        Ok(())
    }
}
