//! Travel-model parameters.
//!
//! The defaults describe a pedestrian moving between nearby festival venues.
//! A TOML file may override any field; missing fields keep their defaults.
//!
//! ```toml
//! walking_speed_kmh = 4.0
//! buffer_minutes = 5
//! earth_radius_km = 6371.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Assumed walking speed between venues.
pub const WALKING_SPEED_KMH: f64 = 4.0;
/// Flat safety margin added to every travel estimate.
pub const BUFFER_MINUTES: u32 = 5;
/// Slowest accepted walking speed.
pub const MIN_WALKING_SPEED_KMH: f64 = 0.5;
/// Largest accepted buffer: one full day.
pub const MAX_BUFFER_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelModel {
    #[serde(default = "default_walking_speed_kmh")]
    pub walking_speed_kmh: f64,

    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: u32,

    #[serde(default = "default_earth_radius_km")]
    pub earth_radius_km: f64,
}

fn default_walking_speed_kmh() -> f64 {
    WALKING_SPEED_KMH
}

fn default_buffer_minutes() -> u32 {
    BUFFER_MINUTES
}

fn default_earth_radius_km() -> f64 {
    EARTH_RADIUS_KM
}

impl Default for TravelModel {
    fn default() -> Self {
        Self {
            walking_speed_kmh: WALKING_SPEED_KMH,
            buffer_minutes: BUFFER_MINUTES,
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl TravelModel {
    /// Parse a TOML document and check that the values are usable.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let model: TravelModel =
            toml::from_str(s).map_err(|e| ScheduleError::Config(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Read a TOML file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<()> {
        let speed = self.walking_speed_kmh;
        if !(speed.is_finite() && speed >= MIN_WALKING_SPEED_KMH) {
            return Err(ScheduleError::Config(format!(
                "walking_speed_kmh must be at least {MIN_WALKING_SPEED_KMH}, got {speed}"
            )));
        }
        if self.buffer_minutes > MAX_BUFFER_MINUTES {
            return Err(ScheduleError::Config(format!(
                "buffer_minutes must be at most {MAX_BUFFER_MINUTES}, got {}",
                self.buffer_minutes
            )));
        }
        if !(self.earth_radius_km.is_finite() && self.earth_radius_km > 0.0) {
            return Err(ScheduleError::Config(format!(
                "earth_radius_km must be positive, got {}",
                self.earth_radius_km
            )));
        }
        Ok(())
    }
}
