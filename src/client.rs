//! SteelSeries Sonar API client
//!
//! Controls the Sonar mixer through its local web API.
//! Directory: {scheme}://{ggEncryptedAddress}/subApps
//! Mixer endpoint: metadata.webServerAddress of the `sonar` sub-app

use crate::channel::{Channel, Mode, Slider};
use crate::config::SonarConfig;
use crate::discovery::{self, SubApps};
use crate::error::{Result, SonarError};
use reqwest::blocking::{Client, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A connected Sonar mixer.
///
/// Reads take `&self`; switching modes takes `&mut self`, so a mode change
/// can never interleave with a volume or mute call on the same client.
#[derive(Debug)]
pub struct Sonar {
    core_props_path: PathBuf,
    base_url: String,
    web_server_address: String,
    mode: Mode,
    http: Client,
}

impl Sonar {
    /// Discover the running Sonar instance.
    ///
    /// `core_props_path` overrides the default `coreProps.json` location and
    /// `streamer_mode` skips asking the service for its current mode.
    pub fn new(core_props_path: Option<PathBuf>, streamer_mode: Option<bool>) -> Result<Self> {
        let config = SonarConfig {
            core_props_path,
            streamer_mode,
            ..SonarConfig::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: SonarConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        let core_props_path = config
            .core_props_path
            .unwrap_or_else(discovery::default_core_props_path);
        tracing::debug!("Reading GG discovery file {}", core_props_path.display());

        let props = discovery::read_core_props(&core_props_path)?;
        let base_url = discovery::base_url(&config.discovery_scheme, &props);

        let sub_apps: SubApps = fetch_json(&http, Method::GET, &format!("{}/subApps", base_url))?;
        let web_server_address = discovery::web_server_address(&sub_apps)?;
        tracing::info!("Sonar web server at {}", web_server_address);

        let mut sonar = Self {
            core_props_path,
            base_url,
            web_server_address,
            mode: Mode::Classic,
            http,
        };

        let streamer = match config.streamer_mode {
            Some(streamer) => streamer,
            None => sonar.is_streamer_mode()?,
        };
        sonar.mode = Mode::from_streamer(streamer);
        tracing::info!("Sonar in {} mode", sonar.mode);

        Ok(sonar)
    }

    /// Ask the service which mode it is in
    pub fn is_streamer_mode(&self) -> Result<bool> {
        let mode: String = self.request(Method::GET, "/mode/")?;
        Ok(mode == Mode::Streamer.as_str())
    }

    /// Switch the mixer to streamer or classic mode.
    ///
    /// The local mode follows the mode the service reports back, which is
    /// not necessarily the one requested. Returns the resulting streamer flag.
    pub fn set_streamer_mode(&mut self, streamer_mode: bool) -> Result<bool> {
        let requested = Mode::from_streamer(streamer_mode);
        let echoed: String = self.request(Method::PUT, &format!("/mode/{}", requested))?;

        self.mode = Mode::from_streamer(echoed == Mode::Streamer.as_str());
        if self.mode != requested {
            tracing::warn!("Requested {} mode, Sonar reports {}", requested, self.mode);
        }
        Ok(self.mode.is_streamer())
    }

    /// Current volume settings for every channel in the active mode
    pub fn volume_data(&self) -> Result<Value> {
        self.request(Method::GET, self.volume_path())
    }

    /// Set a channel's volume (0.0 to 1.0).
    ///
    /// `streamer_slider` defaults to `"streaming"` and only matters in
    /// streamer mode.
    pub fn set_volume(&self, channel: &str, volume: f64, streamer_slider: Option<&str>) -> Result<Value> {
        let target = self.channel_path(channel, streamer_slider)?;

        if !(0.0..=1.0).contains(&volume) {
            return Err(SonarError::InvalidVolume(volume));
        }

        let path = format!("{}/Volume/{}", target, url_number(volume)?);
        self.request(Method::PUT, &path)
    }

    /// Mute or unmute a channel. Slider handling matches `set_volume`.
    pub fn mute_channel(&self, channel: &str, muted: bool, streamer_slider: Option<&str>) -> Result<Value> {
        let target = self.channel_path(channel, streamer_slider)?;
        let path = format!("{}/{}/{}", target, self.mode.mute_keyword(), muted);
        self.request(Method::PUT, &path)
    }

    pub fn chat_mix_data(&self) -> Result<Value> {
        self.request(Method::GET, "/chatMix")
    }

    /// Set the game/chat balance (-1.0 to 1.0)
    pub fn set_chat_mix(&self, mix_volume: f64) -> Result<Value> {
        if !(-1.0..=1.0).contains(&mix_volume) {
            return Err(SonarError::InvalidMixVolume(mix_volume));
        }

        let path = format!("/chatMix?balance={}", url_number(mix_volume)?);
        self.request(Method::PUT, &path)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn streamer_mode(&self) -> bool {
        self.mode.is_streamer()
    }

    /// Active volume settings sub-path, e.g. `/volumeSettings/classic`
    pub fn volume_path(&self) -> &'static str {
        self.mode.volume_path()
    }

    pub fn web_server_address(&self) -> &str {
        &self.web_server_address
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn core_props_path(&self) -> &Path {
        &self.core_props_path
    }

    /// Validate channel and slider, returning `{volumePath}[/{slider}]/{channel}`
    fn channel_path(&self, channel: &str, streamer_slider: Option<&str>) -> Result<String> {
        let channel: Channel = channel.parse()?;

        if self.mode.is_streamer() {
            let slider: Slider = match streamer_slider {
                Some(name) => name.parse()?,
                None => Slider::default(),
            };
            Ok(format!("{}/{}/{}", self.volume_path(), slider, channel))
        } else {
            Ok(format!("{}/{}", self.volume_path(), channel))
        }
    }

    fn request<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T> {
        let url = format!("{}{}", self.web_server_address, path);
        fetch_json(&self.http, method, &url)
    }
}

/// JSON rendering of a number for a path or query segment.
///
/// Whole numbers are sent without a fractional part (`1`, not `1.0`).
fn url_number(value: f64) -> Result<String> {
    let rendered = serde_json::to_string(&value)?;
    Ok(match rendered.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => rendered,
    })
}

/// Issue one request and decode a 200 response body
fn fetch_json<T: DeserializeOwned>(http: &Client, method: Method, url: &str) -> Result<T> {
    tracing::debug!("{} {}", method, url);
    let response = http.request(method, url).send()?;
    decode(response)
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!("Sonar returned {} for {}", status, response.url());
        return Err(SonarError::ServiceNotAccessible(status.as_u16()));
    }

    let body = response.bytes()?;
    Ok(serde_json::from_slice(&body)?)
}
