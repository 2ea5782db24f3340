//! Locating the Sonar web API.
//!
//! SteelSeries GG writes `coreProps.json` on startup with the address of its
//! directory service. That service lists sub-applications; the `sonar` entry
//! carries the dynamic `webServerAddress` used for every mixer call.

use crate::error::{Result, SonarError};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Key of the mixer entry in the sub-app directory
pub const SONAR_SUB_APP: &str = "sonar";

/// Metadata key holding the mixer's web endpoint
const WEB_SERVER_ADDRESS_KEY: &str = "webServerAddress";

/// Used when `ProgramData` is unset
const PROGRAM_DATA_FALLBACK: &str = "C:\\ProgramData";

/// Contents of `coreProps.json` that we care about
#[derive(Debug, Clone, Deserialize)]
pub struct CoreProps {
    #[serde(rename = "ggEncryptedAddress")]
    pub gg_encrypted_address: String,
}

/// Response of `GET {base}/subApps`.
///
/// Entries stay untyped; only the one we look up is decoded, so a malformed
/// sibling sub-app cannot break discovery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubApps {
    #[serde(rename = "subApps", default, deserialize_with = "null_as_default")]
    pub sub_apps: Map<String, Value>,
}

impl SubApps {
    /// Decode the entry stored under `key`, if present
    pub fn get(&self, key: &str) -> Result<Option<SubApp>> {
        match self.sub_apps.get(key) {
            Some(Value::Null) => Ok(Some(SubApp::default())),
            Some(entry) => Ok(Some(SubApp::deserialize(entry)?)),
            None => Ok(None),
        }
    }
}

/// A `null` flag or metadata map reads as false / empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubApp {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_ready: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_running: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Default `coreProps.json` location: `%ProgramData%\SteelSeries\SteelSeries Engine 3\coreProps.json`
pub fn default_core_props_path() -> PathBuf {
    let program_data = std::env::var("ProgramData").ok();
    core_props_path_under(program_data.as_deref())
}

fn core_props_path_under(program_data: Option<&str>) -> PathBuf {
    let base = match program_data {
        Some(dir) if !dir.is_empty() => dir,
        _ => PROGRAM_DATA_FALLBACK,
    };
    Path::new(base)
        .join("SteelSeries")
        .join("SteelSeries Engine 3")
        .join("coreProps.json")
}

/// Read the discovery file
pub fn read_core_props(path: &Path) -> Result<CoreProps> {
    if !path.exists() {
        return Err(SonarError::InstallationNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let props = serde_json::from_reader(BufReader::new(file))?;
    Ok(props)
}

/// Build the directory service URL from the discovery file
pub fn base_url(scheme: &str, props: &CoreProps) -> String {
    format!("{}://{}", scheme, props.gg_encrypted_address)
}

/// Check the Sonar sub-app lifecycle and pull out its web endpoint.
///
/// Gates are checked in order: enabled, ready, running, then the address.
pub fn web_server_address(sub_apps: &SubApps) -> Result<String> {
    let sonar = sub_apps
        .get(SONAR_SUB_APP)?
        .ok_or(SonarError::ServiceNotEnabled)?;

    if !sonar.is_enabled {
        return Err(SonarError::ServiceNotEnabled);
    }
    if !sonar.is_ready {
        return Err(SonarError::ServiceNotReady);
    }
    if !sonar.is_running {
        return Err(SonarError::ServiceNotRunning);
    }

    match sonar.metadata.get(WEB_SERVER_ADDRESS_KEY) {
        Some(Value::String(addr)) if !addr.is_empty() && addr != "null" => Ok(addr.clone()),
        _ => Err(SonarError::EndpointNotFound),
    }
}
