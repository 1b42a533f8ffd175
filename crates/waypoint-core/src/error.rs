//! Centralized error types for the Waypoint application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI notices
//! - Preserves full error context for debugging/logging

use thiserror::Error;

pub use waypoint_geo::types::{GeocodeError, LocationError};
pub use waypoint_store::StoreError;

/// Top-level application error type.
///
/// All errors in the Waypoint application should be convertible to
/// this type. Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Geocoding error: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Store(e) => store_user_message(e),
            AppError::Geocode(e) => geocode_user_message(e),
            AppError::Location(e) => location_user_message(e),
            AppError::Session(e) => e.user_message(),
            AppError::Validation(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }

    /// True for session errors, which are fatal to the screen and must
    /// redirect to the external auth flow rather than show a notice.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, AppError::Session(_))
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

fn store_user_message(error: &StoreError) -> &'static str {
    match error {
        StoreError::Network(_) => "Unable to reach your saved locations. Check your connection.",
        StoreError::Api { status, .. } if *status >= 500 => {
            "The location store is experiencing issues. Please try again later."
        }
        StoreError::Api { .. } => "Saving your locations failed. Please try again.",
        StoreError::NotFound(_) => "That saved location no longer exists.",
        StoreError::Url(_) => "The location store is misconfigured. Check your settings.",
    }
}

fn geocode_user_message(error: &GeocodeError) -> &'static str {
    match error {
        GeocodeError::Network(_) => "Place search is unreachable. Check your connection.",
        GeocodeError::Status(_) => "Place search failed. Please try again.",
        GeocodeError::Parse(_) => "Place search returned unexpected data. Please try again.",
    }
}

fn location_user_message(error: &LocationError) -> &'static str {
    match error {
        LocationError::PermissionDenied => {
            "Location permission was denied. Enable it in system settings to use this."
        }
        LocationError::ServiceUnavailable => "Location services are unavailable on this device.",
        LocationError::Timeout => "Couldn't get a position fix in time. Please try again.",
        LocationError::Other(_) => "Couldn't determine your location. Please try again.",
    }
}

/// Session/identity errors: no usable identity is fatal to the screen
/// and redirects to the external auth flow.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No signed-in user")]
    NoIdentity,

    #[error("Session expired")]
    Expired,
}

impl SessionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::NoIdentity => "You're not signed in. Please sign in to continue.",
            SessionError::Expired => "Your session has expired. Please sign in again.",
        }
    }
}

/// Input validation errors for save operations.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Location name cannot be empty")]
    EmptyName,

    #[error("Latitude out of range: {0}")]
    Latitude(f64),

    #[error("Longitude out of range: {0}")]
    Longitude(f64),
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "Please give the location a name.",
            ValidationError::Latitude(_) | ValidationError::Longitude(_) => {
                "Those coordinates aren't valid."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let session_err = SessionError::NoIdentity;
        let app_err: AppError = session_err.into();
        assert!(matches!(app_err, AppError::Session(SessionError::NoIdentity)));
        assert!(app_err.requires_sign_in());
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Session(SessionError::Expired);
        assert_eq!(
            app_err.user_message(),
            "Your session has expired. Please sign in again."
        );
    }

    #[test]
    fn test_store_not_found_message() {
        let app_err = AppError::Store(StoreError::NotFound("loc-1".into()));
        assert_eq!(app_err.user_message(), "That saved location no longer exists.");
        assert!(!app_err.requires_sign_in());
    }

    #[test]
    fn test_permission_denied_message_mentions_settings() {
        let app_err = AppError::Location(LocationError::PermissionDenied);
        assert!(app_err.user_message().contains("system settings"));
    }

    #[test]
    fn test_validation_messages_are_non_empty() {
        for err in [
            ValidationError::EmptyName,
            ValidationError::Latitude(91.0),
            ValidationError::Longitude(-181.0),
        ] {
            assert!(!err.user_message().is_empty());
        }
    }
}
