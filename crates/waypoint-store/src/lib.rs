//! Remote persistent store client for Waypoint.
//!
//! Wraps the authenticated REST API holding the `saved_locations`
//! table (full CRUD, scoped to the owning user) and the read-only
//! `user_details` table.

pub mod client;
pub mod types;

pub use client::LocationStoreClient;
pub use types::{SavedLocation, SavedLocationCreate, StoreError, UserProfile};
