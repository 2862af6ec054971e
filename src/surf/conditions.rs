//! Surfability classification of a single forecast hour

use serde::{Deserialize, Serialize};

/// Thresholds deciding whether an hour is worth paddling out for
///
/// Both bounds are exclusive: the swell must be strictly above the
/// minimum and the wind strictly below the maximum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SurfThresholds {
    /// Minimum swell height in meters
    #[serde(default = "default_min_swell_m")]
    pub min_swell_m: f64,
    /// Maximum wind speed in km/h
    #[serde(default = "default_max_wind_kmh")]
    pub max_wind_kmh: f64,
}

fn default_min_swell_m() -> f64 {
    0.4
}

fn default_max_wind_kmh() -> f64 {
    40.0
}

impl Default for SurfThresholds {
    fn default() -> Self {
        Self {
            min_swell_m: default_min_swell_m(),
            max_wind_kmh: default_max_wind_kmh(),
        }
    }
}

impl SurfThresholds {
    /// Classify one hour of conditions
    #[must_use]
    pub fn is_surfable(&self, swell_m: f64, wind_kmh: f64) -> bool {
        swell_m > self.min_swell_m && wind_kmh < self.max_wind_kmh
    }
}
