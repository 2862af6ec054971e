//! Surfcast - marine forecast ingestion and closest-spot surf queries
//!
//! This library provides the core functionality for fetching marine
//! forecasts, evaluating surfability per hourly slot, and answering
//! proximity-ranked queries over the spot catalog.

pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod marine;
pub mod models;
pub mod store;
pub mod surf;
pub mod web;

// Re-export core types for public API
pub use config::SurfcastConfig;
pub use error::SurfcastError;
pub use ingest::{IngestService, IngestSummary};
pub use marine::{ForecastProvider, StormglassClient};
pub use models::{ForecastSample, Quantity, SurfReport, SurfSpot};
pub use store::SurfStore;
pub use surf::{RankedSpot, SurfThresholds, distance_km, rank, reconcile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
