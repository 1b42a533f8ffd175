//! Row types for the remote store tables.

use serde::{Deserialize, Serialize};

/// A persisted, user-owned record of a named point on Earth.
///
/// `id` and `created_at` are assigned by the store on insert;
/// `created_at` is monotonic per insert, which is what list ordering
/// relies on. Rows are never mutated in place: created by a save,
/// destroyed by an explicit delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Request to insert one saved location.
#[derive(Debug, Clone, Serialize)]
pub struct SavedLocationCreate {
    pub user_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Read-only profile row from `user_details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Store API errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Location not found: {0}")]
    NotFound(String),
    #[error("Invalid store URL: {0}")]
    Url(#[from] url::ParseError),
}
