//! Two-panel overlay state machine (Add-Location / Map).
//!
//! Two orthogonal hidden/visible sub-machines. The rendering layer
//! consumes the discrete transitions and runs its own 0-to-1
//! interpolation; only the start and end states live here.

use std::sync::Arc;

use waypoint_store::SavedLocation;

use crate::search::SearchController;

/// Discrete transition emitted to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    AddOpened,
    AddClosed,
    MapOpened,
    MapClosed,
    /// The requested transition was already satisfied.
    NoChange,
}

/// Owns visibility and map-target selection for both overlays.
///
/// The panels are independent: both may be visible at once and
/// toggling one never implicitly closes the other. The selected
/// location is only ever set while the map panel is visible and is
/// cleared on every close path.
pub struct PanelCoordinator {
    search: Arc<SearchController>,
    add_visible: bool,
    map_visible: bool,
    selected: Option<SavedLocation>,
}

impl PanelCoordinator {
    pub fn new(search: Arc<SearchController>) -> Self {
        Self {
            search,
            add_visible: false,
            map_visible: false,
            selected: None,
        }
    }

    pub fn is_add_visible(&self) -> bool {
        self.add_visible
    }

    pub fn is_map_visible(&self) -> bool {
        self.map_visible
    }

    /// Map target, valid only while the map panel is visible.
    pub fn selected(&self) -> Option<&SavedLocation> {
        self.selected.as_ref()
    }

    /// Show the Add-Location panel with a fresh search box.
    pub fn open_add(&mut self) -> PanelEvent {
        if self.add_visible {
            return PanelEvent::NoChange;
        }
        self.search.reset();
        self.add_visible = true;
        PanelEvent::AddOpened
    }

    /// Hide the Add-Location panel, discarding any pending search.
    pub fn close_add(&mut self) -> PanelEvent {
        if !self.add_visible {
            return PanelEvent::NoChange;
        }
        self.search.reset();
        self.add_visible = false;
        PanelEvent::AddClosed
    }

    pub fn toggle_add(&mut self) -> PanelEvent {
        if self.add_visible {
            self.close_add()
        } else {
            self.open_add()
        }
    }

    /// Show the map panel. With a target the map centers on it; with
    /// none this is the generic "view map" entry and selection stays
    /// unset.
    pub fn open_map(&mut self, target: Option<SavedLocation>) -> PanelEvent {
        self.selected = target;
        if self.map_visible {
            return PanelEvent::NoChange;
        }
        self.map_visible = true;
        PanelEvent::MapOpened
    }

    /// Hide the map panel; always clears the selection.
    pub fn close_map(&mut self) -> PanelEvent {
        self.selected = None;
        if !self.map_visible {
            return PanelEvent::NoChange;
        }
        self.map_visible = false;
        PanelEvent::MapClosed
    }

    pub fn toggle_map(&mut self) -> PanelEvent {
        if self.map_visible {
            self.close_map()
        } else {
            self.open_map(None)
        }
    }
}
