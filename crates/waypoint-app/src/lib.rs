//! Saved-location lifecycle manager for Waypoint.
//!
//! Coordinates place search, the authoritative saved-location list,
//! current-location capture, and the two-panel overlay state machine.
//! Rendering, routing, and authentication live outside this crate and
//! connect through the seams in [`shell`] and [`notice`].

pub mod capture;
pub mod notice;
pub mod panels;
pub mod registry;
pub mod screen;
pub mod search;
pub mod shell;

pub use capture::{CurrentLocationCapture, FALLBACK_NAME};
pub use notice::{Notice, NoticeLevel, NoticeSink};
pub use panels::{PanelCoordinator, PanelEvent};
pub use registry::SavedLocationRegistry;
pub use screen::LocationsScreen;
pub use search::SearchController;
pub use shell::{ConfirmPrompt, Navigator};
