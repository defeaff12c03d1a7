//! Click detection settings
//!
//! Thresholds are plain data owned by the backend. They can be changed at
//! runtime or loaded from a TOML file:
//!
//! ```toml
//! double_click_time = 400
//! double_click_distance = 8
//! ```
//!
//! Missing keys keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default double click window in milliseconds
pub const DEFAULT_DOUBLE_CLICK_TIME: u32 = 250;

/// Default double click distance in pixels
pub const DEFAULT_DOUBLE_CLICK_DISTANCE: u32 = 5;

/// Thresholds used by the click synthesizer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickSettings {
    /// Maximum gap in milliseconds between two presses of a double click
    pub double_click_time: u32,
    /// Maximum per-axis distance in pixels between presses (inclusive)
    pub double_click_distance: u32,
}

impl Default for ClickSettings {
    fn default() -> Self {
        Self {
            double_click_time: DEFAULT_DOUBLE_CLICK_TIME,
            double_click_distance: DEFAULT_DOUBLE_CLICK_DISTANCE,
        }
    }
}

impl ClickSettings {
    /// Parse settings from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded click settings from {}: {:?}",
            path.display(),
            settings
        );
        Ok(settings)
    }
}
