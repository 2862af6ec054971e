//! Surf condition core
//!
//! This module holds the pure heart of the service:
//! - Great-circle distance between coordinate pairs
//! - Surfability classification of a single forecast hour
//! - Reconciliation of wind and swell series into labeled records
//! - Proximity ranking of currently surfable spots

pub mod conditions;
pub mod geo;
pub mod ranking;
pub mod reconciler;

// Re-export commonly used types from submodules
pub use conditions::SurfThresholds;
pub use geo::distance_km;
pub use ranking::{RankedSpot, rank};
pub use reconciler::reconcile;
