//! Configuration types for trigger distance evaluation
//!
//! These types define the structure of the settings loaded from TOML files.
//! Every key is optional and falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// Comment tag name searched for on an object's page
pub const DEFAULT_TAG_NAME: &str = "TriggerDistance";

/// Map dimensions and looping behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map width in tiles
    pub width: u32,
    /// Map height in tiles
    pub height: u32,
    /// Whether the map wraps left/right
    pub loop_horizontal: bool,
    /// Whether the map wraps top/bottom
    pub loop_vertical: bool,
}

/// Top level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSettings {
    /// Tag name inside page comments, e.g. `TriggerDistance` for `<TriggerDistance: r2>`
    pub tag_name: String,

    /// Active map shape
    pub map: MapConfig,

    /// Airborne parties never touch plain objects without a distance rule
    pub airship_blocks_legacy: bool,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG_NAME.to_string(),
            map: MapConfig::default(),
            airship_blocks_legacy: true,
        }
    }
}

impl TriggerSettings {
    /// Parse settings from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: TriggerSettings = toml::from_str(source)?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&source)?;
        log::info!(
            "Loaded trigger settings from {} (tag '{}', map {}x{})",
            path.display(),
            settings.tag_name,
            settings.map.width,
            settings.map.height
        );
        Ok(settings)
    }

    /// Set the map shape
    pub fn with_map(mut self, map: MapConfig) -> Self {
        self.map = map;
        self
    }
}
