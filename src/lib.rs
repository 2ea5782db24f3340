//! Local control client for the SteelSeries Sonar audio mixer.
//!
//! ```rust,no_run
//! use sonar_control::Sonar;
//!
//! let mut sonar = Sonar::new(None, None)?;
//! sonar.set_streamer_mode(false)?;
//! sonar.set_volume("master", 0.5, None)?;
//! sonar.mute_channel("game", true, None)?;
//! sonar.set_chat_mix(-0.25)?;
//! # Ok::<(), sonar_control::SonarError>(())
//! ```

pub mod channel;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;

pub use channel::{Channel, Mode, Slider};
pub use client::Sonar;
pub use config::SonarConfig;
pub use error::{Result, SonarError};
