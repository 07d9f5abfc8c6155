use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use trailpace_lib::db::Database;
use trailpace_lib::models::{GpsFix, RunRecord};
use trailpace_lib::session::controller::Clock;

/// Fresh SQLite file under the system temp dir.
#[allow(dead_code)]
pub fn scratch_db_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("trailpace-tests-{}", uuid::Uuid::new_v4()))
        .join(format!("{name}.sqlite3"))
}

#[allow(dead_code)]
pub fn test_db(name: &str) -> Database {
    Database::new(scratch_db_path(name)).expect("Failed to open test database")
}

/// Hand-driven clock; tests move time forward explicitly.
#[allow(dead_code)]
pub fn manual_clock(start_ms: i64) -> (Arc<AtomicI64>, Clock) {
    let now = Arc::new(AtomicI64::new(start_ms));
    let source = now.clone();
    let clock: Clock = Arc::new(move || source.load(Ordering::SeqCst));
    (now, clock)
}

#[allow(dead_code)]
pub fn fix(lon: f64, alt: f64, t: i64) -> GpsFix {
    GpsFix::new(0.0, lon, t).with_altitude(alt)
}

#[allow(dead_code)]
pub fn sample_record(id: &str, date: i64) -> RunRecord {
    RunRecord {
        id: id.to_string(),
        date,
        distance_meters: 5_200.0,
        duration_sec: 2_700,
        elevation_gain_m: 187.0,
        min_elevation_m: 142.0,
        max_elevation_m: 329.0,
        elevation_profile: vec![
            trailpace_lib::models::ProfilePoint {
                timestamp: date,
                elevation: 142.0,
                cumulative_distance: 0.0,
            },
            trailpace_lib::models::ProfilePoint {
                timestamp: date + 2_700_000,
                elevation: 276.0,
                cumulative_distance: 5_200.0,
            },
        ],
        photos: vec![trailpace_lib::models::Photo {
            uri: "file:///photos/ridge.jpg".into(),
            timestamp: date + 1_800_000,
        }],
    }
}
