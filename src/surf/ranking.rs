//! Proximity ranking of currently surfable spots

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::SurfcastError;
use crate::models::{SurfReport, SurfSpot};
use crate::surf::geo::distance_km;

/// Timestamp rendering for ranked results, RFC 1123 style
const TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// One entry of a ranking response
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RankedSpot {
    pub id: i64,
    pub name: String,
    pub lat: String,
    pub long: String,
    /// Great-circle distance from the caller in kilometers
    pub distance: f64,
    pub time: String,
    pub swell: f64,
    pub wind: f64,
}

/// Rank every upcoming surfable record by distance from the caller.
///
/// A record qualifies when its flag is set and its hour lies strictly
/// after `now`. Records without a catalog entry are skipped. Every
/// qualifying (record, spot) pair produces one entry, so a spot with
/// several good hours appears several times. The sort is stable, ties
/// keep their input order. A catalog entry with unparseable coordinates
/// fails the whole call.
pub fn rank(
    user_lat: f64,
    user_lng: f64,
    now: DateTime<Utc>,
    reports: &[SurfReport],
    spots: &[SurfSpot],
) -> Result<Vec<RankedSpot>, SurfcastError> {
    let spots_by_id: HashMap<i64, &SurfSpot> = spots.iter().map(|s| (s.id, s)).collect();

    let mut ranked = Vec::new();
    for report in reports {
        if !report.is_surfable() || report.time <= now {
            continue;
        }
        let Some(spot) = spots_by_id.get(&report.spot_id) else {
            debug!("Skipping record for unknown spot id {}", report.spot_id);
            continue;
        };
        let (lat, long) = spot.coordinates()?;
        ranked.push(RankedSpot {
            id: spot.id,
            name: spot.name.clone(),
            lat: spot.lat.clone(),
            long: spot.long.clone(),
            distance: distance_km(lat, long, user_lat, user_lng),
            time: report.time.format(TIME_FORMAT).to_string(),
            swell: report.swell_m,
            wind: report.wind_kmh,
        });
    }

    ranked.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surf::conditions::SurfThresholds;
    use chrono::TimeZone;

    fn spot(id: i64, name: &str, lat: &str, long: &str) -> SurfSpot {
        SurfSpot::new(id, name.to_string(), lat.to_string(), long.to_string())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 9, 10, 12, 0, 0).unwrap()
    }

    fn surfable_report(spot_id: i64, time: DateTime<Utc>) -> SurfReport {
        SurfReport::evaluate(spot_id, time, 0.6, 15.0, &SurfThresholds::default())
    }

    fn flat_report(spot_id: i64, time: DateTime<Utc>) -> SurfReport {
        SurfReport::evaluate(spot_id, time, 0.1, 15.0, &SurfThresholds::default())
    }

    #[test]
    fn test_nearest_spot_ranks_first() {
        let spots = vec![
            spot(1, "Far Break", "34.09", "-118.0"),
            spot(2, "Near Break", "34.018", "-118.0"),
        ];
        let future = now() + chrono::Duration::hours(2);
        let reports = vec![surfable_report(1, future), surfable_report(2, future)];

        let ranked = rank(34.0, -118.0, now(), &reports, &spots).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "Near Break");
        assert!((ranked[0].distance - 2.0).abs() < 0.1);
        assert_eq!(ranked[1].name, "Far Break");
        assert!((ranked[1].distance - 10.0).abs() < 0.1);
    }

    #[test]
    fn test_past_records_are_excluded() {
        let spots = vec![spot(1, "Near Break", "34.018", "-118.0")];
        let reports = vec![
            surfable_report(1, now() - chrono::Duration::hours(1)),
            // the boundary hour itself does not qualify
            surfable_report(1, now()),
        ];

        let ranked = rank(34.0, -118.0, now(), &reports, &spots).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_unsurfable_records_are_excluded() {
        let spots = vec![spot(1, "Near Break", "34.018", "-118.0")];
        let reports = vec![flat_report(1, now() + chrono::Duration::hours(1))];

        let ranked = rank(34.0, -118.0, now(), &reports, &spots).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_orphan_record_is_skipped() {
        let spots = vec![spot(1, "Near Break", "34.018", "-118.0")];
        let future = now() + chrono::Duration::hours(1);
        let reports = vec![surfable_report(99, future), surfable_report(1, future)];

        let ranked = rank(34.0, -118.0, now(), &reports, &spots).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, 1);
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let ranked = rank(34.0, -118.0, now(), &[], &[]).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_every_good_hour_produces_an_entry() {
        let spots = vec![spot(1, "Near Break", "34.018", "-118.0")];
        let reports = vec![
            surfable_report(1, now() + chrono::Duration::hours(1)),
            surfable_report(1, now() + chrono::Duration::hours(2)),
            surfable_report(1, now() + chrono::Duration::hours(3)),
        ];

        let ranked = rank(34.0, -118.0, now(), &reports, &spots).unwrap();
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_equal_distances_keep_input_order() {
        let spots = vec![
            spot(1, "First Peak", "34.018", "-118.0"),
            spot(2, "Second Peak", "34.018", "-118.0"),
        ];
        let future = now() + chrono::Duration::hours(1);
        let reports = vec![surfable_report(1, future), surfable_report(2, future)];

        let ranked = rank(34.0, -118.0, now(), &reports, &spots).unwrap();
        assert_eq!(ranked[0].name, "First Peak");
        assert_eq!(ranked[1].name, "Second Peak");
    }

    #[test]
    fn test_bad_catalog_coordinates_fail_the_call() {
        let spots = vec![spot(1, "Broken", "up north", "-118.0")];
        let reports = vec![surfable_report(1, now() + chrono::Duration::hours(1))];

        let err = rank(34.0, -118.0, now(), &reports, &spots).unwrap_err();
        assert!(matches!(err, SurfcastError::Parse { .. }));
    }

    #[test]
    fn test_wire_shape() {
        let spots = vec![spot(1, "Near Break", "34.018", "-118.0")];
        let time = Utc.with_ymd_and_hms(2022, 9, 10, 14, 0, 0).unwrap();
        let reports = vec![surfable_report(1, time)];

        let ranked = rank(34.0, -118.0, now(), &reports, &spots).unwrap();
        let value = serde_json::to_value(&ranked[0]).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["Id", "Name", "Lat", "Long", "Distance", "Time", "Swell", "Wind"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["Time"], "Sat, 10 Sep 2022 14:00:00 UTC");
        assert_eq!(obj["Swell"], 0.6);
        assert_eq!(obj["Wind"], 15.0);
    }
}
