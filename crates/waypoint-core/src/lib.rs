pub mod config;
pub mod error;

pub use config::{Config, GeocodingConfig, PanelConfig, StoreConfig, ValidationResult};
pub use error::{
    AppError, ConfigError, NetworkError, ReqwestErrorExt, SessionError, ValidationError,
};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Waypoint core initialized");
    Ok(())
}
