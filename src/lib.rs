pub mod db;
pub mod format;
pub mod history;
pub mod metrics;
pub mod models;
pub mod session;
pub mod settings;
mod utils;

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use anyhow::{bail, Context, Result};
use db::Database;
use format::{format_clock, format_distance_km, format_run_date};
use log::{info, warn};
use models::GpsFix;
use session::RunController;
use settings::SettingsStore;

const DATA_DIR_ENV: &str = "TRAILPACE_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "trailpace-data";

fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn usage() -> String {
    "usage: trailpace replay <fixes.json> [photo-uri...]\n       trailpace history [run-id]".into()
}

/// Command-line entry point.
///
/// `replay` feeds a JSON array of fixes through a full run, timed by the fix
/// timestamps, and saves the result. `history` lists saved runs or shows one.
pub fn run() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let data_dir = data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let settings = SettingsStore::new(data_dir.join("settings.json"))?;
    let database = Database::new(data_dir.join("trailpace.sqlite3"))?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async move {
        match args.first().map(String::as_str) {
            Some("replay") => {
                let Some(path) = args.get(1) else {
                    bail!(usage());
                };
                let fixes = read_fixes(Path::new(path))?;
                let clock = Arc::new(AtomicI64::new(0));
                let clock_source = clock.clone();
                let controller = RunController::with_clock(
                    database,
                    &settings.current(),
                    Arc::new(move || clock_source.load(Ordering::SeqCst)),
                );
                controller.load_history().await?;
                replay(&controller, &clock, fixes, &args[2..]).await
            }
            Some("history") => {
                let controller = RunController::new(database, &settings.current());
                controller.load_history().await?;
                match args.get(1) {
                    Some(run_id) => show_run(&controller, run_id).await,
                    None => {
                        list_runs(&controller).await;
                        Ok(())
                    }
                }
            }
            _ => bail!(usage()),
        }
    })
}

fn read_fixes(path: &Path) -> Result<Vec<GpsFix>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixes from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of fixes", path.display()))
}

async fn replay(
    controller: &RunController,
    clock: &AtomicI64,
    fixes: Vec<GpsFix>,
    photos: &[String],
) -> Result<()> {
    let (Some(first), Some(last)) = (fixes.first(), fixes.last()) else {
        bail!("no fixes to replay");
    };
    let (first_ts, last_ts) = (first.timestamp, last.timestamp);

    clock.store(first_ts, Ordering::SeqCst);
    controller.start().await;

    for fix in fixes {
        clock.store(fix.timestamp, Ordering::SeqCst);
        controller.add_gps_fix(fix).await;
        controller.tick_now().await;
    }

    // photos land at the finish line
    for uri in photos {
        controller.add_photo(uri.as_str()).await;
    }

    clock.store(last_ts, Ordering::SeqCst);
    let summary = controller.stop().await;

    println!("distance   {}", format_distance_km(summary.distance_meters));
    println!("duration   {}", format_clock(summary.duration_sec));
    println!("pace       {}", summary.pace_label);
    println!(
        "elevation  +{:.0} m (min {:.0} m, max {:.0} m)",
        summary.elevation_gain_m, summary.min_elevation_m, summary.max_elevation_m
    );
    println!("chart      {} points", summary.elevation_profile.len());

    match controller.save_to_history().await? {
        Some(id) => {
            info!("Replayed run saved as {id}");
            println!("saved      {id}");
        }
        None => warn!("Replayed run was not finished; nothing saved"),
    }
    controller.reset().await;
    Ok(())
}

async fn list_runs(controller: &RunController) {
    let runs = controller.history_summaries().await;
    if runs.is_empty() {
        println!("no saved runs");
        return;
    }
    for run in runs {
        println!(
            "{}  {}  {}  {}  +{:.0} m  {} photos",
            run.id,
            format_run_date(run.date),
            format_distance_km(run.distance_meters),
            format_clock(run.duration_sec),
            run.elevation_gain_m,
            run.photo_count
        );
    }
}

async fn show_run(controller: &RunController, run_id: &str) -> Result<()> {
    let Some(run) = controller.history_get(run_id).await else {
        bail!("no saved run with id {run_id}");
    };

    println!("{}", format_run_date(run.date));
    println!("distance   {}", format_distance_km(run.distance_meters));
    println!("duration   {}", format_clock(run.duration_sec));
    println!(
        "pace       {}",
        metrics::pace_label(run.duration_sec, run.distance_meters)
    );
    println!(
        "elevation  +{:.0} m (min {:.0} m, max {:.0} m)",
        run.elevation_gain_m, run.min_elevation_m, run.max_elevation_m
    );
    for point in &run.elevation_profile {
        println!(
            "  {:>8.0} m  {:>6.0} m",
            point.cumulative_distance, point.elevation
        );
    }
    for photo in &run.photos {
        println!("  photo {}", photo.uri);
    }
    Ok(())
}
