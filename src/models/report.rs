//! Surfability record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::surf::conditions::SurfThresholds;

/// A classified surfability record for one spot and one forecast hour
///
/// The `surfable` flag is a cached classifier decision: it can only be
/// produced by [`SurfReport::evaluate`], never set independently of the
/// swell and wind values it was derived from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SurfReport {
    /// Catalog id of the spot this record belongs to
    pub spot_id: i64,
    /// Forecast hour this record describes
    pub time: DateTime<Utc>,
    /// Swell height in meters
    pub swell_m: f64,
    /// Wind speed in km/h
    pub wind_kmh: f64,
    surfable: bool,
}

impl SurfReport {
    /// Classify a matched pair of readings into a record
    #[must_use]
    pub fn evaluate(
        spot_id: i64,
        time: DateTime<Utc>,
        swell_m: f64,
        wind_kmh: f64,
        thresholds: &SurfThresholds,
    ) -> Self {
        Self {
            spot_id,
            time,
            swell_m,
            wind_kmh,
            surfable: thresholds.is_surfable(swell_m, wind_kmh),
        }
    }

    /// Whether the classifier judged this hour surfable
    #[must_use]
    pub fn is_surfable(&self) -> bool {
        self.surfable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_evaluate_computes_flag() {
        let thresholds = SurfThresholds::default();
        let time = Utc.with_ymd_and_hms(2022, 9, 10, 14, 0, 0).unwrap();

        let good = SurfReport::evaluate(1, time, 0.8, 12.0, &thresholds);
        assert!(good.is_surfable());

        let flat = SurfReport::evaluate(1, time, 0.1, 12.0, &thresholds);
        assert!(!flat.is_surfable());

        let blown_out = SurfReport::evaluate(1, time, 0.8, 55.0, &thresholds);
        assert!(!blown_out.is_surfable());
    }

    #[test]
    fn test_flag_survives_serialization() {
        let thresholds = SurfThresholds::default();
        let time = Utc.with_ymd_and_hms(2022, 9, 10, 14, 0, 0).unwrap();
        let report = SurfReport::evaluate(7, time, 0.6, 15.0, &thresholds);

        let bytes = postcard::to_allocvec(&report).unwrap();
        let back: SurfReport = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(back, report);
        assert!(back.is_surfable());
    }
}
