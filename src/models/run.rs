//! Finished-run data models.
//!
//! - `ProfilePoint`: one retained sample of the elevation chart
//! - `RunRecord`: immutable history entry created when a finished run is saved
//! - `RunSummary`: the lighter row shown in history lists

use serde::{Deserialize, Serialize};

use super::Photo;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePoint {
    pub timestamp: i64,
    pub elevation: f64,
    pub cumulative_distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub id: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub date: i64,
    pub distance_meters: f64,
    pub duration_sec: u64,
    pub elevation_gain_m: f64,
    pub min_elevation_m: f64,
    pub max_elevation_m: f64,
    pub elevation_profile: Vec<ProfilePoint>,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub id: String,
    pub date: i64,
    pub distance_meters: f64,
    pub duration_sec: u64,
    pub elevation_gain_m: f64,
    pub photo_count: usize,
}

impl From<&RunRecord> for RunSummary {
    fn from(record: &RunRecord) -> Self {
        Self {
            id: record.id.clone(),
            date: record.date,
            distance_meters: record.distance_meters,
            duration_sec: record.duration_sec,
            elevation_gain_m: record.elevation_gain_m,
            photo_count: record.photos.len(),
        }
    }
}
