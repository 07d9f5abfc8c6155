use serde::{Deserialize, Serialize};

use crate::models::ProfilePoint;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElevationStats {
    pub gain_m: f64,
    pub current_m: f64,
    pub min_m: f64,
    pub max_m: f64,
}

/// Everything derived from one pass over a run's fixes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunMetrics {
    pub distance_meters: f64,
    pub duration_sec: u64,
    pub pace_label: String,
    pub elevation: ElevationStats,
    pub elevation_profile: Vec<ProfilePoint>,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self {
            distance_meters: 0.0,
            duration_sec: 0,
            pace_label: super::pace::PACE_UNDEFINED.to_string(),
            elevation: ElevationStats::default(),
            elevation_profile: Vec::new(),
        }
    }
}
