//! Boost configuration: the `[tgc]` table of `tgc.toml`.
//!
//! Five per-club-class boost percentages tune the drag coefficient sent
//! with each shot, plus the default interface address. A missing file is
//! replaced with a commented default template, matching the behavior of
//! the interface's own distribution.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors from loading the boost configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

const TEMPLATE: &str = "\
# teelink boost configuration.
# Boosts are percentages; positive values lower the drag sent with shots.

[tgc]
ip_address = \"localhost\"
driver_boost = 0.0
wood_boost = 0.0
iron_boost = 0.0
wedge_boost = 0.0
putter_boost = 0.0
";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    tgc: BoostConfig,
}

/// Club-boost tuning and the default interface address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoostConfig {
    /// Interface host used when the caller does not pass one.
    pub ip_address: String,
    pub driver_boost: f64,
    pub wood_boost: f64,
    pub iron_boost: f64,
    pub wedge_boost: f64,
    pub putter_boost: f64,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            ip_address: "localhost".to_string(),
            driver_boost: 0.0,
            wood_boost: 0.0,
            iron_boost: 0.0,
            wedge_boost: 0.0,
            putter_boost: 0.0,
        }
    }
}

impl BoostConfig {
    /// Load from `path`. When no file exists, write the default template
    /// there and return defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            fs::write(path, TEMPLATE)?;
            info!(path = %path.display(), "wrote default boost config");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&text)?;
        Ok(file.tgc)
    }

    /// Boost percentage for a club, keyed by the interface's short club
    /// codes: "DR", woods "W3"/"W5", irons "4I".."9I", wedges "PW"/"SW"/
    /// "LW", putter "PT". Unrecognized codes get no boost.
    fn boost_for(&self, club: &str) -> f64 {
        if club.contains("DR") {
            self.driver_boost
        } else if club.starts_with('W') {
            self.wood_boost
        } else if club.contains('I') {
            self.iron_boost
        } else if club.chars().nth(1) == Some('W') {
            self.wedge_boost
        } else if club.contains("PT") {
            self.putter_boost
        } else {
            0.0
        }
    }

    /// Drag coefficient for a club: 1.0 minus the class boost (in percent),
    /// clamped to the range the interface accepts.
    pub fn drag_for(&self, club: &str) -> f64 {
        (1.0 - self.boost_for(club) / 100.0).clamp(0.0, 2.0)
    }
}
