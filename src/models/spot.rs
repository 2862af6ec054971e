//! Surf spot model for catalog entries

use serde::{Deserialize, Serialize};

use crate::error::SurfcastError;

/// A named surf location
///
/// Coordinates are carried as decimal-degree strings and parsed on demand,
/// so a malformed catalog entry only fails the operation that needs it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SurfSpot {
    /// Catalog identifier
    pub id: i64,
    /// Human-readable spot name
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: String,
    /// Longitude in decimal degrees
    pub long: String,
}

impl SurfSpot {
    /// Create a new surf spot
    #[must_use]
    pub fn new(id: i64, name: String, lat: String, long: String) -> Self {
        Self {
            id,
            name,
            lat,
            long,
        }
    }

    /// Parse the stored coordinate strings into `(latitude, longitude)`
    pub fn coordinates(&self) -> Result<(f64, f64), SurfcastError> {
        let lat = self.lat.trim().parse::<f64>().map_err(|_| {
            SurfcastError::parse(format!(
                "spot '{}' has non-numeric latitude {:?}",
                self.name, self.lat
            ))
        })?;
        let long = self.long.trim().parse::<f64>().map_err(|_| {
            SurfcastError::parse(format!(
                "spot '{}' has non-numeric longitude {:?}",
                self.name, self.long
            ))
        })?;
        Ok((lat, long))
    }
}
