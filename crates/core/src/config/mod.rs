use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, VisualiserError};

/// Largest dataset the bar surface is expected to show.
pub const MAX_DATASET_SIZE: usize = 200;
/// Upper bound of the speed slider. The lower bound is 1.
pub const MAX_SPEED: u32 = 100;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub compat: CompatConfig,
}

impl AppConfig {
    /// Parses a TOML document. Missing sections fall back to their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates the configuration stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        validate_size(self.dataset.size)?;
        validate_speed(self.playback.speed)
    }
}

/// Settings for generated datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_size")]
    pub size: usize,
    /// Seed for reproducible datasets. Entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            seed: None,
        }
    }
}

/// Playback settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Slider value in `1..=100`; larger is faster.
    #[serde(default = "default_speed")]
    pub speed: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
        }
    }
}

/// Legacy playback quirks. Both default to off, which keeps DFS unpaced and
/// heap sift comparisons uncounted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatConfig {
    /// Pace depth-first graph traversal like breadth-first traversal.
    #[serde(default)]
    pub pace_dfs: bool,
    /// Count and show the child comparisons made while sifting a heap.
    #[serde(default)]
    pub count_heapify_comparisons: bool,
}

pub fn validate_size(size: usize) -> Result<()> {
    if (1..=MAX_DATASET_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(VisualiserError::InvalidSize {
            size,
            max: MAX_DATASET_SIZE,
        })
    }
}

pub fn validate_speed(speed: u32) -> Result<()> {
    if (1..=MAX_SPEED).contains(&speed) {
        Ok(())
    } else {
        Err(VisualiserError::InvalidSpeed(speed))
    }
}

fn default_size() -> usize {
    20
}

fn default_speed() -> u32 {
    50
}
