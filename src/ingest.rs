//! Ingestion service: fetch, reconcile and persist forecast records

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::marine::ForecastProvider;
use crate::models::Quantity;
use crate::store::SurfStore;
use crate::surf::conditions::SurfThresholds;
use crate::surf::reconciler::reconcile;

/// Outcome counters of one ingestion pass
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct IngestSummary {
    /// Catalog spots the pass covered
    pub spots: usize,
    /// Records written
    pub saved: usize,
    /// Records dropped by a failed write
    pub skipped: usize,
    /// Spots skipped because a forecast fetch failed
    pub failed_spots: usize,
}

/// Runs ingestion passes over the whole catalog
pub struct IngestService {
    store: SurfStore,
    provider: Arc<dyn ForecastProvider>,
    thresholds: SurfThresholds,
    window_hours: i64,
}

impl IngestService {
    pub fn new(
        store: SurfStore,
        provider: Arc<dyn ForecastProvider>,
        thresholds: SurfThresholds,
        window_hours: i64,
    ) -> Self {
        Self {
            store,
            provider,
            thresholds,
            window_hours,
        }
    }

    /// Run one pass over the catalog.
    ///
    /// Spots are processed sequentially; the two series of one spot are
    /// fetched concurrently. A failed fetch skips that spot, a failed
    /// write skips that record; neither stops the pass.
    pub async fn run_once(&self) -> Result<IngestSummary> {
        let spots = self.store.list_spots().await?;
        let now = Utc::now();
        let window_start = now.timestamp();
        let window_end = (now + Duration::hours(self.window_hours)).timestamp();

        let mut summary = IngestSummary {
            spots: spots.len(),
            saved: 0,
            skipped: 0,
            failed_spots: 0,
        };

        info!("Starting ingestion pass over {} spots", spots.len());

        for spot in &spots {
            let (wind, swell) = tokio::join!(
                self.provider.fetch_series(
                    &spot.lat,
                    &spot.long,
                    Quantity::WindSpeed,
                    window_start,
                    window_end
                ),
                self.provider.fetch_series(
                    &spot.lat,
                    &spot.long,
                    Quantity::SwellHeight,
                    window_start,
                    window_end
                ),
            );
            let (wind, swell) = match (wind, swell) {
                (Ok(wind), Ok(swell)) => (wind, swell),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Skipping spot '{}': forecast fetch failed: {:#}", spot.name, e);
                    summary.failed_spots += 1;
                    continue;
                }
            };

            let reports = reconcile(spot, &wind, &swell, &self.thresholds);
            for report in &reports {
                match self.store.save_report(report).await {
                    Ok(()) => summary.saved += 1,
                    Err(e) => {
                        warn!(
                            "Dropping record for '{}' at {}: {:#}",
                            spot.name, report.time, e
                        );
                        summary.skipped += 1;
                    }
                }
            }
        }

        info!(
            "Ingestion pass done: {} records saved, {} skipped, {} spots failed",
            summary.saved, summary.skipped, summary.failed_spots
        );
        Ok(summary)
    }
}
