use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Remote saved-locations store
    pub store: StoreConfig,

    /// Geocoding endpoints and search tuning
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Panel/overlay preferences
    #[serde(default)]
    pub panels: PanelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL for the saved-locations store API
    pub api_url: String,

    /// Bearer token for the store API (optional, can be set via environment)
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Forward search endpoint (Open-Meteo geocoding shape)
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Reverse geocoding endpoint (Nominatim shape)
    #[serde(default = "default_reverse_url")]
    pub reverse_url: String,

    /// Response language for search candidates
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum candidates per search
    #[serde(default = "default_result_cap")]
    pub result_cap: u8,
}

fn default_search_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_reverse_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_result_cap() -> u8 {
    5
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            reverse_url: default_reverse_url(),
            language: default_language(),
            result_cap: default_result_cap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Open/close interpolation duration in milliseconds.
    /// Purely a rendering knob; the panel state machine is discrete.
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u32,
}

fn default_animation_ms() -> u32 {
    250
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            animation_ms: default_animation_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("waypoint");

        Self {
            config_dir,
            store: StoreConfig {
                api_url: "http://localhost:8008".to_string(),
                api_token: std::env::var("WAYPOINT_STORE_TOKEN").ok(),
            },
            geocoding: GeocodingConfig::default(),
            panels: PanelConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.store.api_url, "store.api_url", &mut result);
        self.validate_url(&self.geocoding.search_url, "geocoding.search_url", &mut result);
        self.validate_url(&self.geocoding.reverse_url, "geocoding.reverse_url", &mut result);

        if self.geocoding.language.is_empty() {
            result.add_error("geocoding.language", "Language must not be empty");
        }

        if self.geocoding.result_cap == 0 {
            result.add_error("geocoding.result_cap", "Result cap must be greater than 0");
        } else if self.geocoding.result_cap > 20 {
            result.add_warning(
                "geocoding.result_cap",
                "Result cap is unusually large (>20)",
            );
        }

        if self.panels.animation_ms > 5000 {
            result.add_warning(
                "panels.animation_ms",
                "Panel animation is longer than 5 seconds",
            );
        }

        result
    }

    fn validate_url(&self, value: &str, field: &str, result: &mut ValidationResult) {
        match Url::parse(value) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(field, format!("URL must be http or https: {}", value));
                }
            }
            Err(e) => {
                result.add_error(field, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("waypoint");
        Ok(config_dir.join("config.toml"))
    }

    /// Effective store token: environment variable wins over the file.
    pub fn store_token(&self) -> Option<String> {
        std::env::var("WAYPOINT_STORE_TOKEN")
            .ok()
            .or_else(|| self.store.api_token.clone())
    }
}
