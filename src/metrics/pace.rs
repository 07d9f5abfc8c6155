/// Shown when pace cannot be computed yet.
pub const PACE_UNDEFINED: &str = "–";

/// Whole seconds of active running between `start_ms` and `now_ms`, excluding `paused_ms`.
///
/// Clock skew that would make the result negative clamps to 0.
pub fn elapsed_seconds(start_ms: i64, now_ms: i64, paused_ms: u64) -> u64 {
    let paused = i64::try_from(paused_ms).unwrap_or(i64::MAX);
    let active_ms = now_ms.saturating_sub(start_ms).saturating_sub(paused);
    if active_ms <= 0 {
        0
    } else {
        (active_ms / 1_000) as u64
    }
}

pub fn pace_seconds_per_km(duration_sec: u64, distance_m: f64) -> Option<f64> {
    if distance_m <= 0.0 || duration_sec == 0 {
        return None;
    }
    Some(duration_sec as f64 / (distance_m / 1_000.0))
}

/// `mm:ss /km`, or [`PACE_UNDEFINED`] without distance or time.
pub fn pace_label(duration_sec: u64, distance_m: f64) -> String {
    match pace_seconds_per_km(duration_sec, distance_m) {
        Some(sec_per_km) => {
            let minutes = (sec_per_km / 60.0).floor() as u64;
            let seconds = (sec_per_km % 60.0).floor() as u64;
            format!("{minutes:02}:{seconds:02} /km")
        }
        None => PACE_UNDEFINED.to_string(),
    }
}
