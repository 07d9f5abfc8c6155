use serde::{Deserialize, Serialize};

/// Thresholds controlling how densely the elevation chart is sampled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileConfig {
    /// Retain a fix once this much distance has accumulated since the last retained point
    pub min_distance_m: f64,

    /// Retain a fix whose elevation differs from the last retained point by at least this much
    pub min_elevation_change_m: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            min_distance_m: 100.0,
            min_elevation_change_m: 10.0,
        }
    }
}
