//! Reconciliation of wind and swell series into labeled records

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{ForecastSample, SurfReport, SurfSpot};
use crate::surf::conditions::SurfThresholds;

/// Join the two hourly series on their exact timestamp strings and
/// classify each matched hour.
///
/// Samples without a counterpart in the other series are dropped, as are
/// matched pairs whose timestamp does not parse as RFC 3339. No
/// interpolation and no nearest-neighbor matching. Output order follows
/// the swell series. Any dropped samples are reported once per spot at
/// warn level.
#[must_use]
pub fn reconcile(
    spot: &SurfSpot,
    wind: &[ForecastSample],
    swell: &[ForecastSample],
    thresholds: &SurfThresholds,
) -> Vec<SurfReport> {
    let wind_by_time: HashMap<&str, f64> =
        wind.iter().map(|s| (s.time.as_str(), s.value)).collect();

    let mut reports = Vec::with_capacity(swell.len());
    let mut matched_times: HashSet<&str> = HashSet::with_capacity(swell.len());
    let mut swell_only = 0usize;
    let mut unparseable = 0usize;

    for sample in swell {
        let Some(&wind_kmh) = wind_by_time.get(sample.time.as_str()) else {
            swell_only += 1;
            continue;
        };
        matched_times.insert(sample.time.as_str());
        match DateTime::parse_from_rfc3339(&sample.time) {
            Ok(time) => reports.push(SurfReport::evaluate(
                spot.id,
                time.with_timezone(&Utc),
                sample.value,
                wind_kmh,
                thresholds,
            )),
            Err(_) => unparseable += 1,
        }
    }

    let wind_only = wind
        .iter()
        .filter(|s| !matched_times.contains(s.time.as_str()))
        .count();

    let dropped = swell_only + wind_only + unparseable;
    if dropped > 0 {
        warn!(
            "Reconciliation gap for '{}': dropped {} samples ({} swell-only, {} wind-only, {} unparseable)",
            spot.name, dropped, swell_only, wind_only, unparseable
        );
    }

    reports
}
