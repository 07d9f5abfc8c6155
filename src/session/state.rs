use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    history::History,
    metrics::{self, ProfileConfig, RunMetrics},
    models::{GpsFix, Photo, ProfilePoint, RunRecord},
};

const ENABLE_LOGS: bool = true;

use crate::log_debug;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Paused => "paused",
            RunStatus::Finished => "finished",
        }
    }
}

/// Read-only view of a session handed to the UI after every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub status: RunStatus,
    pub start_timestamp: Option<i64>,
    pub fix_count: usize,
    pub last_fix: Option<GpsFix>,
    pub distance_meters: f64,
    pub duration_sec: u64,
    pub pace_label: String,
    pub current_elevation_m: f64,
    pub elevation_gain_m: f64,
    pub min_elevation_m: f64,
    pub max_elevation_m: f64,
    pub elevation_profile: Vec<ProfilePoint>,
    pub photos: Vec<Photo>,
}

/// The single active run attempt.
///
/// Every operation receives the wall-clock time in milliseconds since the
/// epoch. Operations that do not apply to the current status are ignored and
/// report `false`; late device callbacks must never fail a run.
///
/// Derived figures are only written by `recompute`, which rebuilds them from
/// the full fix history. Time spent paused is excluded from the duration.
#[derive(Debug, Clone, Default)]
pub struct RunSession {
    status: RunStatus,
    gps_fixes: Vec<GpsFix>,
    start_timestamp: Option<i64>,
    photos: Vec<Photo>,
    paused_at: Option<i64>,
    paused_ms: u64,
    metrics: RunMetrics,
    profile_config: ProfileConfig,
}

impl RunSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile_config(profile_config: ProfileConfig) -> Self {
        Self {
            profile_config,
            ..Self::default()
        }
    }

    pub fn start(&mut self, now: i64) -> bool {
        if self.status != RunStatus::Idle {
            log_debug!("start ignored while {}", self.status.as_str());
            return false;
        }

        *self = Self {
            status: RunStatus::Running,
            start_timestamp: Some(now),
            profile_config: self.profile_config,
            ..Self::default()
        };
        true
    }

    pub fn pause(&mut self, now: i64) -> bool {
        if self.status != RunStatus::Running {
            log_debug!("pause ignored while {}", self.status.as_str());
            return false;
        }
        self.status = RunStatus::Paused;
        self.paused_at = Some(now);
        true
    }

    pub fn resume(&mut self, now: i64) -> bool {
        if self.status != RunStatus::Paused {
            log_debug!("resume ignored while {}", self.status.as_str());
            return false;
        }
        self.close_pause(now);
        self.status = RunStatus::Running;
        true
    }

    /// Freezes the run. A stop while paused closes the pause first.
    pub fn stop(&mut self, now: i64) -> bool {
        match self.status {
            RunStatus::Running | RunStatus::Paused => {
                self.close_pause(now);
                self.recompute(now);
                self.status = RunStatus::Finished;
                true
            }
            RunStatus::Idle | RunStatus::Finished => {
                log_debug!("stop ignored while {}", self.status.as_str());
                false
            }
        }
    }

    /// Back to idle from any state, discarding everything but the profile thresholds.
    pub fn reset(&mut self) {
        *self = Self::with_profile_config(self.profile_config);
    }

    pub fn add_gps_fix(&mut self, fix: GpsFix, now: i64) -> bool {
        if self.status != RunStatus::Running {
            log_debug!("fix at {} dropped while {}", fix.timestamp, self.status.as_str());
            return false;
        }
        self.gps_fixes.push(fix);
        self.recompute(now);
        true
    }

    /// Cadence driver for the duration figure (and pace, which depends on it).
    pub fn tick(&mut self, now: i64) -> bool {
        if self.status != RunStatus::Running {
            return false;
        }
        self.recompute(now);
        true
    }

    pub fn add_photo(&mut self, uri: impl Into<String>, now: i64) {
        self.photos.push(Photo {
            uri: uri.into(),
            timestamp: now,
        });
    }

    /// Commits a finished run to `history` and returns the new record id.
    ///
    /// Returns `None` without touching `history` unless the run is finished.
    /// The session itself is left as is; callers reset it afterwards.
    pub fn save_to_history(&self, history: &mut History, now: i64) -> Option<String> {
        if self.status != RunStatus::Finished {
            log_debug!("save ignored while {}", self.status.as_str());
            return None;
        }

        let record = self.finished_record(now)?;
        let id = record.id.clone();
        if history.insert(record) {
            Some(id)
        } else {
            None
        }
    }

    /// The record a finished run would be saved as, under a fresh id.
    ///
    /// `None` unless the run is finished. Nothing is stored.
    pub fn finished_record(&self, now: i64) -> Option<RunRecord> {
        if self.status != RunStatus::Finished {
            return None;
        }
        Some(self.to_record(Uuid::new_v4().to_string(), now))
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            status: self.status,
            start_timestamp: self.start_timestamp,
            fix_count: self.gps_fixes.len(),
            last_fix: self.gps_fixes.last().copied(),
            distance_meters: self.metrics.distance_meters,
            duration_sec: self.metrics.duration_sec,
            pace_label: self.metrics.pace_label.clone(),
            current_elevation_m: self.metrics.elevation.current_m,
            elevation_gain_m: self.metrics.elevation.gain_m,
            min_elevation_m: self.metrics.elevation.min_m,
            max_elevation_m: self.metrics.elevation.max_m,
            elevation_profile: self.metrics.elevation_profile.clone(),
            photos: self.photos.clone(),
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn gps_fixes(&self) -> &[GpsFix] {
        &self.gps_fixes
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn start_timestamp(&self) -> Option<i64> {
        self.start_timestamp
    }

    pub fn paused_ms(&self) -> u64 {
        self.paused_ms
    }

    pub fn distance_meters(&self) -> f64 {
        self.metrics.distance_meters
    }

    pub fn duration_sec(&self) -> u64 {
        self.metrics.duration_sec
    }

    pub fn pace_label(&self) -> &str {
        &self.metrics.pace_label
    }

    pub fn current_elevation_m(&self) -> f64 {
        self.metrics.elevation.current_m
    }

    pub fn elevation_gain_m(&self) -> f64 {
        self.metrics.elevation.gain_m
    }

    pub fn min_elevation_m(&self) -> f64 {
        self.metrics.elevation.min_m
    }

    pub fn max_elevation_m(&self) -> f64 {
        self.metrics.elevation.max_m
    }

    pub fn elevation_profile(&self) -> &[ProfilePoint] {
        &self.metrics.elevation_profile
    }

    fn close_pause(&mut self, now: i64) {
        if let Some(paused_at) = self.paused_at.take() {
            let span = now.saturating_sub(paused_at).max(0) as u64;
            self.paused_ms = self.paused_ms.saturating_add(span);
        }
    }

    fn recompute(&mut self, now: i64) {
        let start = self.start_timestamp.unwrap_or(now);
        self.metrics = metrics::compute(
            &self.gps_fixes,
            start,
            now,
            self.paused_ms,
            &self.profile_config,
        );
    }

    fn to_record(&self, id: String, date: i64) -> RunRecord {
        RunRecord {
            id,
            date,
            distance_meters: self.metrics.distance_meters,
            duration_sec: self.metrics.duration_sec,
            elevation_gain_m: self.metrics.elevation.gain_m,
            min_elevation_m: self.metrics.elevation.min_m,
            max_elevation_m: self.metrics.elevation.max_m,
            elevation_profile: self.metrics.elevation_profile.clone(),
            photos: self.photos.clone(),
        }
    }
}
