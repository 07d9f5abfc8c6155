//! Labels for the summary, history and detail screens.

use chrono::{DateTime, Utc};

/// `"5.20 km"`
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.2} km", meters.max(0.0) / 1_000.0)
}

/// `hh:mm:ss`; hours keep counting past a day.
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// `"Mon Oct 19 2026"` for a run date in epoch milliseconds.
pub fn format_run_date(date_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(date_ms) {
        Some(date) => date.format("%a %b %d %Y").to_string(),
        None => String::from("unknown date"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_in_kilometers() {
        assert_eq!(format_distance_km(5_200.0), "5.20 km");
        assert_eq!(format_distance_km(111.19), "0.11 km");
        assert_eq!(format_distance_km(0.0), "0.00 km");
    }

    #[test]
    fn clock_pads_every_field() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(2_700), "00:45:00");
        assert_eq!(format_clock(3_725), "01:02:05");
        assert_eq!(format_clock(90_000), "25:00:00");
    }

    #[test]
    fn run_date_label() {
        // 2026-10-19T08:00:00Z
        assert_eq!(format_run_date(1_792_396_800_000), "Mon Oct 19 2026");
    }
}
