use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_REPORT_FRAMES;
use crate::engine::Timing;
use crate::error::ConfigError;
use crate::transmission::ChannelProfile;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Everything a simulation run can be tuned with.
///
/// ```toml
/// seed = 42
/// report_frames = 10
///
/// [channel]
/// frame_loss = 0.10
/// frame_corruption = 0.20
/// ack_loss = 0.15
/// checksum_corruption = 0.05
///
/// [timing]
/// transmission_delay_ms = 500
/// timeout_ms = 500
/// ack_delay_ms = 500
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: Option<u64>,
    pub report_frames: usize,
    pub channel: ChannelProfile,
    pub timing: Timing,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            seed: None,
            report_frames: DEFAULT_REPORT_FRAMES,
            channel: ChannelProfile::default(),
            timing: Timing::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(text)?;
        config.channel.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "crc-arq").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// An explicit path must exist. Without one, the per-user config file is
    /// used when present, otherwise the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path().filter(|path| path.is_file()) {
            Some(path) => {
                log::info!("loading config from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}
