use crate::models::{GpsFix, ProfilePoint};

use super::config::ProfileConfig;
use super::distance::cumulative_distances;
use super::types::ElevationStats;

/// Gain, current, min and max altitude over the fix sequence.
///
/// Missing altitude reads as 0. Descents never subtract from gain.
pub fn elevation_stats(fixes: &[GpsFix]) -> ElevationStats {
    let Some(first) = fixes.first() else {
        return ElevationStats::default();
    };

    let mut stats = ElevationStats {
        gain_m: 0.0,
        current_m: first.elevation(),
        min_m: first.elevation(),
        max_m: first.elevation(),
    };

    for pair in fixes.windows(2) {
        let prev = pair[0].elevation();
        let curr = pair[1].elevation();
        if curr > prev {
            stats.gain_m += curr - prev;
        }
        stats.min_m = stats.min_m.min(curr);
        stats.max_m = stats.max_m.max(curr);
        stats.current_m = curr;
    }

    stats
}

/// Decimated elevation chart.
///
/// The first and last fix are always kept. In between, a fix is kept once the
/// distance since the last kept point reaches `min_distance_m` or its elevation
/// moved at least `min_elevation_change_m` away from the last kept elevation.
pub fn elevation_profile(fixes: &[GpsFix], config: &ProfileConfig) -> Vec<ProfilePoint> {
    let cumulative = cumulative_distances(fixes);
    let last_index = fixes.len().saturating_sub(1);
    let mut points: Vec<ProfilePoint> = Vec::new();

    for (i, (fix, &distance)) in fixes.iter().zip(cumulative.iter()).enumerate() {
        let keep = match points.last() {
            None => true,
            Some(_) if i == last_index => true,
            Some(anchor) => {
                distance - anchor.cumulative_distance >= config.min_distance_m
                    || (fix.elevation() - anchor.elevation).abs() >= config.min_elevation_change_m
            }
        };

        if keep {
            points.push(ProfilePoint {
                timestamp: fix.timestamp,
                elevation: fix.elevation(),
                cumulative_distance: distance,
            });
        }
    }

    points
}
