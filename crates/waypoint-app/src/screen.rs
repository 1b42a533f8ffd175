//! Saved-locations screen: wires search, registry, capture, and the
//! panel state machine to the shell seams.

use std::sync::Arc;

use parking_lot::Mutex;

use waypoint_core::AppError;
use waypoint_geo::SearchResult;
use waypoint_store::SavedLocation;

use crate::capture::CurrentLocationCapture;
use crate::panels::{PanelCoordinator, PanelEvent};
use crate::registry::SavedLocationRegistry;
use crate::search::SearchController;
use crate::shell::{ConfirmPrompt, Navigator};

/// Top-level coordinator for the saved-locations screen.
///
/// The session identity is not held here; every operation takes the
/// user id explicitly so the components stay independently testable.
pub struct LocationsScreen {
    pub search: Arc<SearchController>,
    pub registry: Arc<SavedLocationRegistry>,
    pub capture: Arc<CurrentLocationCapture>,
    panels: Mutex<PanelCoordinator>,
    navigator: Arc<dyn Navigator>,
    confirm: Arc<dyn ConfirmPrompt>,
}

impl LocationsScreen {
    pub fn new(
        search: Arc<SearchController>,
        registry: Arc<SavedLocationRegistry>,
        capture: Arc<CurrentLocationCapture>,
        navigator: Arc<dyn Navigator>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        let panels = Mutex::new(PanelCoordinator::new(search.clone()));
        Self {
            search,
            registry,
            capture,
            panels,
            navigator,
            confirm,
        }
    }

    /// Persist a chosen search candidate under its display name
    /// (e.g. "Paris, France") and drop the candidate list.
    ///
    /// # Errors
    /// Propagates the registry create error; the candidate list is
    /// only cleared on success.
    pub async fn save_search_result(
        &self,
        user_id: &str,
        result: &SearchResult,
    ) -> Result<SavedLocation, AppError> {
        let saved = self
            .registry
            .create(
                user_id,
                &result.display_name(),
                result.latitude,
                result.longitude,
            )
            .await?;
        self.search.clear_results();
        Ok(saved)
    }

    /// Confirm, then delete. A declined prompt is a successful no-op.
    ///
    /// # Errors
    /// Propagates the registry delete error after a confirmed prompt.
    pub async fn delete_location(
        &self,
        user_id: &str,
        location: &SavedLocation,
    ) -> Result<(), AppError> {
        let message = format!("Delete {}?", location.name);
        if !self.confirm.confirm(&message).await {
            tracing::debug!("Delete of {} declined", location.id);
            return Ok(());
        }
        self.registry.delete(user_id, &location.id).await
    }

    /// Hand a saved location to the weather feature.
    pub fn open_weather(&self, location: &SavedLocation) {
        self.navigator
            .open_weather(location.latitude, location.longitude, &location.name);
    }

    /// Hand control to the authentication flow.
    pub fn sign_out(&self) {
        self.navigator.sign_out();
    }

    // Panel pass-throughs; the coordinator itself stays private so the
    // screen is the only writer of panel state.

    pub fn open_add_panel(&self) -> PanelEvent {
        self.panels.lock().open_add()
    }

    pub fn close_add_panel(&self) -> PanelEvent {
        self.panels.lock().close_add()
    }

    pub fn toggle_add_panel(&self) -> PanelEvent {
        self.panels.lock().toggle_add()
    }

    pub fn open_map_panel(&self, target: Option<SavedLocation>) -> PanelEvent {
        self.panels.lock().open_map(target)
    }

    pub fn close_map_panel(&self) -> PanelEvent {
        self.panels.lock().close_map()
    }

    pub fn is_add_panel_visible(&self) -> bool {
        self.panels.lock().is_add_visible()
    }

    pub fn is_map_panel_visible(&self) -> bool {
        self.panels.lock().is_map_visible()
    }

    pub fn selected_location(&self) -> Option<SavedLocation> {
        self.panels.lock().selected().cloned()
    }
}
