use anyhow::Result;
use chrono::{DateTime, Utc};
use fjall::Keyspace;
use std::path::Path;
use tokio::task;

use crate::models::{SurfReport, SurfSpot};

/// Embedded store holding the spot catalog and surfability records.
///
/// Handles are cheap to clone and internally synchronized; all blocking
/// store work runs on the blocking pool.
#[derive(Clone)]
pub struct SurfStore {
    spots: Keyspace,
    reports: Keyspace,
}

// Big-endian with the sign bit flipped, so keys compare in numeric order
// even for negative values.
fn sortable_bytes(v: i64) -> [u8; 8] {
    ((v as u64) ^ (1 << 63)).to_be_bytes()
}

fn spot_key(id: i64) -> [u8; 8] {
    sortable_bytes(id)
}

// (spot id, unix seconds) so iteration runs per spot in time order.
fn report_key(spot_id: i64, time: DateTime<Utc>) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&sortable_bytes(spot_id));
    key[8..].copy_from_slice(&sortable_bytes(time.timestamp()));
    key
}

fn read_spots(spots: Keyspace) -> Result<Vec<SurfSpot>> {
    let mut out = Vec::new();
    for entry in spots.iter() {
        let (_, value) = entry.into_inner()?;
        out.push(postcard::from_bytes(&value)?);
    }
    Ok(out)
}

fn read_surfable_after(reports: Keyspace, after: DateTime<Utc>) -> Result<Vec<SurfReport>> {
    let mut out = Vec::new();
    for entry in reports.iter() {
        let (_, value) = entry.into_inner()?;
        let report: SurfReport = postcard::from_bytes(&value)?;
        if report.is_surfable() && report.time > after {
            out.push(report);
        }
    }
    Ok(out)
}

impl SurfStore {
    /// Open (or create) the store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let spots = db.keyspace("spots", fjall::KeyspaceCreateOptions::default)?;
        let reports = db.keyspace("reports", fjall::KeyspaceCreateOptions::default)?;
        Ok(SurfStore { spots, reports })
    }

    /// Insert or replace a catalog entry
    pub async fn upsert_spot(&self, spot: &SurfSpot) -> Result<()> {
        let spots = self.spots.clone();
        let key = spot_key(spot.id);
        let bytes = postcard::to_stdvec(spot)?;
        task::spawn_blocking(move || spots.insert(key, bytes)).await??;
        Ok(())
    }

    /// Upsert every configured spot into the catalog.
    ///
    /// Entries already in the store but absent from the configuration are
    /// left alone.
    pub async fn sync_catalog(&self, spots: &[SurfSpot]) -> Result<()> {
        for spot in spots {
            self.upsert_spot(spot).await?;
        }
        tracing::info!("Synced {} spots into the catalog", spots.len());
        Ok(())
    }

    /// All catalog entries, ordered by id
    pub async fn list_spots(&self) -> Result<Vec<SurfSpot>> {
        let spots = self.spots.clone();
        task::spawn_blocking(move || read_spots(spots)).await?
    }

    /// Insert or replace the record for this spot and hour.
    ///
    /// Keyed by `(spot_id, time)`, so re-ingesting a window the store has
    /// already seen replaces records instead of accumulating duplicates.
    #[tracing::instrument(name = "save_report", level = "debug", skip(self))]
    pub async fn save_report(&self, report: &SurfReport) -> Result<()> {
        let reports = self.reports.clone();
        let key = report_key(report.spot_id, report.time);
        let bytes = postcard::to_stdvec(report)?;
        task::spawn_blocking(move || reports.insert(key, bytes)).await??;
        Ok(())
    }

    /// Surfable records with an hour strictly after `after`, ordered by
    /// spot id then time
    #[tracing::instrument(name = "query_surfable", level = "debug", skip(self))]
    pub async fn list_currently_surfable(&self, after: DateTime<Utc>) -> Result<Vec<SurfReport>> {
        let reports = self.reports.clone();
        task::spawn_blocking(move || read_surfable_after(reports, after)).await?
    }
}
