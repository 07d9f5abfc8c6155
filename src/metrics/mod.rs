//! Pure run metrics over a sequence of GPS fixes.
//!
//! Nothing here keeps state between calls. [`compute`] rebuilds every figure
//! from the full fix history, O(fixes) per update, so late or corrected fixes
//! never leave stale aggregates behind.

pub mod config;
pub mod distance;
pub mod elevation;
pub mod pace;
mod types;

pub use config::ProfileConfig;
pub use distance::{cumulative_distances, haversine_distance, total_distance, EARTH_RADIUS_M};
pub use elevation::{elevation_profile, elevation_stats};
pub use pace::{elapsed_seconds, pace_label, pace_seconds_per_km, PACE_UNDEFINED};
pub use types::{ElevationStats, RunMetrics};

use crate::models::GpsFix;

/// Full recompute of every derived run figure.
pub fn compute(
    fixes: &[GpsFix],
    start_ms: i64,
    now_ms: i64,
    paused_ms: u64,
    config: &ProfileConfig,
) -> RunMetrics {
    let distance_meters = total_distance(fixes);
    let duration_sec = elapsed_seconds(start_ms, now_ms, paused_ms);

    RunMetrics {
        distance_meters,
        duration_sec,
        pace_label: pace_label(duration_sec, distance_meters),
        elevation: elevation_stats(fixes),
        elevation_profile: elevation_profile(fixes, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_fixes() -> Vec<GpsFix> {
        vec![
            GpsFix::new(0.0, 0.0, 0).with_altitude(100.0),
            GpsFix::new(0.0, 0.001, 60_000).with_altitude(110.0),
        ]
    }

    #[test]
    fn two_fix_run_one_minute_in() {
        let metrics = compute(&scenario_fixes(), 0, 60_000, 0, &ProfileConfig::default());
        assert!((metrics.distance_meters - 111.19).abs() < 1.0);
        assert_eq!(metrics.duration_sec, 60);
        assert_eq!(metrics.pace_label, "08:59 /km");
        assert_eq!(metrics.elevation.gain_m, 10.0);
        assert_eq!(metrics.elevation.min_m, 100.0);
        assert_eq!(metrics.elevation.max_m, 110.0);
        assert_eq!(metrics.elevation_profile.len(), 2);
    }

    #[test]
    fn recompute_is_deterministic() {
        let fixes = scenario_fixes();
        let config = ProfileConfig::default();
        let first = compute(&fixes, 0, 60_000, 0, &config);
        let second = compute(&fixes, 0, 60_000, 0, &config);
        assert_eq!(first, second);
        assert_eq!(
            first.distance_meters.to_bits(),
            second.distance_meters.to_bits()
        );
    }

    #[test]
    fn appending_never_decreases_distance_or_gain() {
        let path = [
            (0.0, 0.0, Some(100.0)),
            (0.0, 0.0004, Some(95.0)),
            (0.0003, 0.0004, None),
            (0.0003, 0.0004, Some(130.0)),
            (0.0, 0.0, Some(80.0)),
            (0.0001, 0.0001, Some(81.0)),
        ];
        let mut fixes = Vec::new();
        let mut last_distance = 0.0;
        let mut last_gain = 0.0;
        for (i, (lat, lon, alt)) in path.into_iter().enumerate() {
            let mut fix = GpsFix::new(lat, lon, i as i64 * 1_000);
            fix.altitude = alt;
            fixes.push(fix);

            let metrics = compute(&fixes, 0, 10_000, 0, &ProfileConfig::default());
            assert!(metrics.distance_meters >= last_distance);
            assert!(metrics.elevation.gain_m >= last_gain);
            last_distance = metrics.distance_meters;
            last_gain = metrics.elevation.gain_m;
        }
    }

    #[test]
    fn fewer_than_two_fixes_have_no_distance_or_gain() {
        let config = ProfileConfig::default();
        let empty = compute(&[], 0, 5_000, 0, &config);
        assert_eq!(empty.distance_meters, 0.0);
        assert_eq!(empty.elevation.gain_m, 0.0);
        assert_eq!(empty.pace_label, PACE_UNDEFINED);

        let single = compute(&scenario_fixes()[..1], 0, 5_000, 0, &config);
        assert_eq!(single.distance_meters, 0.0);
        assert_eq!(single.elevation.gain_m, 0.0);
    }
}
