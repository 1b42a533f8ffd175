//! Outbound seams owned by the surrounding application shell.
//!
//! Navigation and modal confirmation are external capabilities this
//! screen depends on but does not implement; they are injected so the
//! flows stay independently testable.

use async_trait::async_trait;

/// Outbound navigation handoffs.
pub trait Navigator: Send + Sync {
    /// Hand a saved location to the weather-display feature.
    fn open_weather(&self, latitude: f64, longitude: f64, name: &str);

    /// Hand control to the authentication flow.
    fn sign_out(&self);
}

/// Modal yes/no prompt for destructive actions.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    /// Present `message` and resolve to true only on explicit
    /// confirmation; dismissal counts as a refusal.
    async fn confirm(&self, message: &str) -> bool;
}
