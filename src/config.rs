use crate::error::SonarError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the user config dir
const APP_NAME_LOWER: &str = "sonar-control";

/// Client settings. Every field has a default so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SonarConfig {
    /// Override for the `coreProps.json` location
    pub core_props_path: Option<PathBuf>,
    /// Force a mode instead of asking the service
    pub streamer_mode: Option<bool>,
    /// Scheme used to reach the GG directory service (`http` or `https`)
    pub discovery_scheme: String,
    /// The GG service presents a self-signed certificate on loopback
    pub accept_invalid_certs: bool,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self {
            core_props_path: None,
            streamer_mode: None,
            discovery_scheme: "https".to_string(),
            accept_invalid_certs: true,
            timeout_ms: 5000,
        }
    }
}

impl SonarConfig {
    /// Reject settings the client cannot work with
    pub fn validate(&self) -> std::result::Result<(), SonarError> {
        if !matches!(self.discovery_scheme.as_str(), "http" | "https") {
            return Err(SonarError::InvalidScheme(self.discovery_scheme.clone()));
        }
        Ok(())
    }
}

/// Returns the path to the config file: ~/.config/sonar-control/config.toml
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME_LOWER).join("config.toml"))
}

/// Load the config file, or return defaults if it doesn't exist.
pub fn load_config() -> Result<SonarConfig> {
    let Some(path) = config_path() else {
        return Ok(SonarConfig::default());
    };

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(SonarConfig::default());
    }

    load_from_path(&path)
}

/// Load config from a specific path
pub fn load_from_path(path: &Path) -> Result<SonarConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: SonarConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}
