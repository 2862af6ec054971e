//! Data models for the surfcast service
//!
//! This module contains the core domain models organized by concern:
//! - Spot: A named surf location from the catalog
//! - Sample: One forecast reading for a single quantity
//! - Report: A classified surfability record for one spot and hour

pub mod report;
pub mod sample;
pub mod spot;

// Re-export all public types for convenient access
pub use report::SurfReport;
pub use sample::{ForecastSample, Quantity};
pub use spot::SurfSpot;
