//! Error taxonomy for the Sonar client.
//!
//! Every failure is surfaced to the caller as-is; nothing here is retried or
//! downgraded. Transport, decode and IO failures are wrapped transparently so
//! the underlying error is what the caller sees.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T, E = SonarError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SonarError {
    /// The discovery file (`coreProps.json`) does not exist.
    #[error("SteelSeries Engine 3 not installed or not in the default location! ({})", .0.display())]
    InstallationNotFound(PathBuf),

    /// An HTTP call returned something other than 200.
    #[error("SteelSeries server not accessible! Status code: {0}")]
    ServiceNotAccessible(u16),

    #[error("SteelSeries Sonar is not enabled!")]
    ServiceNotEnabled,

    #[error("SteelSeries Sonar is not ready yet!")]
    ServiceNotReady,

    #[error("SteelSeries Sonar is not running!")]
    ServiceNotRunning,

    /// `webServerAddress` missing, empty or `"null"` in the sub-app metadata.
    #[error("Web server address not found")]
    EndpointNotFound,

    #[error("Channel '{0}' not found")]
    ChannelNotFound(String),

    #[error("Slider '{0}' not found")]
    SliderNotFound(String),

    #[error("Invalid volume '{0}'! Value must be between 0 and 1!")]
    InvalidVolume(f64),

    #[error("Invalid mix volume '{0}'! Value must be between -1 and 1!")]
    InvalidMixVolume(f64),

    /// `discovery_scheme` is neither `http` nor `https`.
    #[error("Invalid discovery scheme '{0}' (expected http or https)")]
    InvalidScheme(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SonarError {
    /// HTTP status carried by `ServiceNotAccessible`, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SonarError::ServiceNotAccessible(code) => Some(*code),
            _ => None,
        }
    }
}
