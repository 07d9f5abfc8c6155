use crate::models::GpsFix;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two fixes in meters.
pub fn haversine_distance(a: &GpsFix, b: &GpsFix) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Sum of consecutive leg distances. Every pair counts, jitter included.
pub fn total_distance(fixes: &[GpsFix]) -> f64 {
    fixes
        .windows(2)
        .map(|pair| haversine_distance(&pair[0], &pair[1]))
        .sum()
}

/// Running distance at each fix; the first entry is always 0.
pub fn cumulative_distances(fixes: &[GpsFix]) -> Vec<f64> {
    let mut out = Vec::with_capacity(fixes.len());
    let mut total = 0.0;
    for (i, fix) in fixes.iter().enumerate() {
        if i > 0 {
            total += haversine_distance(&fixes[i - 1], fix);
        }
        out.push(total);
    }
    out
}
