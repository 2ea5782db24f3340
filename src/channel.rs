//! Mixer identifiers: channels, streamer sliders and routing modes.
//!
//! The Sonar web API addresses everything by its camelCase wire name, so each
//! enum round-trips through `as_str` / `FromStr` with those names.

use crate::error::SonarError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sub-path for volume settings in classic mode
pub const CLASSIC_VOLUME_PATH: &str = "/volumeSettings/classic";

/// Sub-path for volume settings in streamer mode
pub const STREAMER_VOLUME_PATH: &str = "/volumeSettings/streamer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Master,
    Game,
    ChatRender,
    Media,
    Aux,
    ChatCapture,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Master,
        Channel::Game,
        Channel::ChatRender,
        Channel::Media,
        Channel::Aux,
        Channel::ChatCapture,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Master => "master",
            Channel::Game => "game",
            Channel::ChatRender => "chatRender",
            Channel::Media => "media",
            Channel::Aux => "aux",
            Channel::ChatCapture => "chatCapture",
        }
    }
}

impl FromStr for Channel {
    type Err = SonarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SonarError::ChannelNotFound(s.to_string()))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two per-channel sliders available in streamer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slider {
    /// What the stream hears
    #[default]
    Streaming,
    /// What the streamer hears
    Monitoring,
}

impl Slider {
    pub const ALL: [Slider; 2] = [Slider::Streaming, Slider::Monitoring];

    pub fn as_str(self) -> &'static str {
        match self {
            Slider::Streaming => "streaming",
            Slider::Monitoring => "monitoring",
        }
    }
}

impl FromStr for Slider {
    type Err = SonarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slider::ALL
            .into_iter()
            .find(|sl| sl.as_str() == s)
            .ok_or_else(|| SonarError::SliderNotFound(s.to_string()))
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel routing mode of the mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "classic")]
    Classic,
    #[serde(rename = "stream")]
    Streamer,
}

impl Mode {
    pub fn from_streamer(streamer: bool) -> Self {
        if streamer {
            Mode::Streamer
        } else {
            Mode::Classic
        }
    }

    /// Name used by the `/mode` endpoint
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Streamer => "stream",
        }
    }

    pub fn is_streamer(self) -> bool {
        self == Mode::Streamer
    }

    /// Volume settings sub-path that is active in this mode
    pub fn volume_path(self) -> &'static str {
        match self {
            Mode::Classic => CLASSIC_VOLUME_PATH,
            Mode::Streamer => STREAMER_VOLUME_PATH,
        }
    }

    /// Path segment used to toggle mute. The two modes disagree on the name.
    pub fn mute_keyword(self) -> &'static str {
        match self {
            Mode::Classic => "Mute",
            Mode::Streamer => "isMuted",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
