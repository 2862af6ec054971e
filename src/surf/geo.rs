//! Great-circle distance between coordinate pairs

/// Distance in kilometers between two points given in decimal degrees,
/// by the spherical law of cosines.
///
/// Coordinates outside the usual ranges are not rejected; the result is
/// still the distance on the sphere they map to.
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let rad_lat1 = lat1.to_radians();
    let rad_lat2 = lat2.to_radians();
    let rad_theta = (lng1 - lng2).to_radians();

    let cos_angle =
        rad_lat1.sin() * rad_lat2.sin() + rad_lat1.cos() * rad_lat2.cos() * rad_theta.cos();

    // Rounding can push the cosine just past +/-1, where acos returns NaN.
    let arc_degrees = cos_angle.clamp(-1.0, 1.0).acos().to_degrees();

    // arc minutes -> statute miles -> kilometers
    arc_degrees * 60.0 * 1.1515 * 1.609344
}
