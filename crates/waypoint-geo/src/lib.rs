//! Geocoding and device location services for Waypoint
//!
//! Provides forward place search via the Open-Meteo geocoding API,
//! reverse geocoding via Nominatim, and the device location provider
//! boundary used by current-location capture.

pub mod location;
pub mod reverse;
pub mod search;
pub mod types;

pub use location::{LocationProvider, Permission, SystemLocationProvider};
pub use reverse::ReverseGeocoder;
pub use search::GeocodingClient;
pub use types::*;
