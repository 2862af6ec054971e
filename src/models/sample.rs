//! Forecast sample model and quantity selector

use serde::{Deserialize, Serialize};

/// One instant reading of a single forecast quantity
///
/// The timestamp stays a string: samples from both quantities of one
/// provider response use the same format, and reconciliation joins on
/// the exact text rather than re-interpreting it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSample {
    /// Timestamp as delivered by the provider (RFC 3339)
    pub time: String,
    /// Reading in the quantity's unit (m for swell, km/h for wind)
    pub value: f64,
}

impl ForecastSample {
    /// Create a new forecast sample
    #[must_use]
    pub fn new<S: Into<String>>(time: S, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

/// Forecast quantity to request from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Significant swell height in meters
    SwellHeight,
    /// Wind speed, delivered in m/s and converted to km/h
    WindSpeed,
}

impl Quantity {
    /// Provider query parameter name for this quantity
    #[must_use]
    pub fn param(self) -> &'static str {
        match self {
            Quantity::SwellHeight => "swellHeight",
            Quantity::WindSpeed => "windSpeed",
        }
    }
}
