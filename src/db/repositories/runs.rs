use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{from_json, to_i64, to_json, to_u64},
};
use crate::models::RunRecord;

const RUN_COLUMNS: &str = "id, date, distance_meters, duration_sec, elevation_gain_m, \
     min_elevation_m, max_elevation_m, elevation_profile, photos";

fn row_to_run(row: &Row) -> Result<RunRecord> {
    let duration_sec: i64 = row.get("duration_sec")?;
    let elevation_profile: String = row.get("elevation_profile")?;
    let photos: String = row.get("photos")?;

    Ok(RunRecord {
        id: row.get("id")?,
        date: row.get("date")?,
        distance_meters: row.get("distance_meters")?,
        duration_sec: to_u64(duration_sec, "duration_sec")?,
        elevation_gain_m: row.get("elevation_gain_m")?,
        min_elevation_m: row.get("min_elevation_m")?,
        max_elevation_m: row.get("max_elevation_m")?,
        elevation_profile: from_json(&elevation_profile, "elevation_profile")?,
        photos: from_json(&photos, "photos")?,
    })
}

impl Database {
    pub async fn insert_run_record(&self, record: &RunRecord) -> Result<()> {
        let record = record.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO runs (id, date, distance_meters, duration_sec, elevation_gain_m,
                                   min_elevation_m, max_elevation_m, elevation_profile, photos, saved_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    record.id,
                    record.date,
                    record.distance_meters,
                    to_i64(record.duration_sec)?,
                    record.elevation_gain_m,
                    record.min_elevation_m,
                    record.max_elevation_m,
                    to_json(&record.elevation_profile, "elevation_profile")?,
                    to_json(&record.photos, "photos")?,
                    Utc::now().to_rfc3339(),
                ],
            )
            .with_context(|| format!("failed to insert run {}", record.id))?;
            Ok(())
        })
        .await
    }

    pub async fn get_run_record(&self, run_id: &str) -> Result<Option<RunRecord>> {
        let run_id = run_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!("SELECT {RUN_COLUMNS} FROM runs WHERE id = ?1"))?;

            let record = stmt
                .query_row(params![run_id], |row| Ok(row_to_run(row)))
                .optional()?
                .transpose()?;

            Ok(record)
        })
        .await
    }

    /// All saved runs, newest first.
    pub async fn list_run_records(&self) -> Result<Vec<RunRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RUN_COLUMNS} FROM runs ORDER BY date DESC, rowid DESC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut runs = Vec::new();
            while let Some(row) = rows.next()? {
                runs.push(row_to_run(row)?);
            }

            Ok(runs)
        })
        .await
    }

    pub async fn list_run_records_paginated(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<RunRecord>> {
        let limit = limit as i64;
        let offset = offset as i64;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RUN_COLUMNS} FROM runs
                 ORDER BY date DESC, rowid DESC
                 LIMIT ?1 OFFSET ?2"
            ))?;

            let mut rows = stmt.query(params![limit, offset])?;
            let mut runs = Vec::new();
            while let Some(row) = rows.next()? {
                runs.push(row_to_run(row)?);
            }

            Ok(runs)
        })
        .await
    }

    pub async fn count_run_records(&self) -> Result<usize> {
        self.execute(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM runs", [], |row| row.get(0))?;
            Ok(count.max(0) as usize)
        })
        .await
    }
}
