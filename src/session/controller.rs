use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    db::Database,
    history::History,
    models::{GpsFix, RunRecord, RunSummary},
    settings::TrackerSettings,
};

use super::{RunSession, RunSnapshot, RunStatus};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info};

/// Source of wall-clock time in epoch milliseconds.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

fn system_now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

struct Ticker {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Host-side owner of the active run.
///
/// Location callbacks, the ticker task and UI calls all go through one mutex,
/// so each call into the session is a whole ingest-then-recompute step.
/// After every mutation the fresh snapshot is published on a watch channel.
#[derive(Clone)]
pub struct RunController {
    session: Arc<Mutex<RunSession>>,
    history: Arc<Mutex<History>>,
    db: Database,
    ticker: Arc<Mutex<Option<Ticker>>>,
    tick_interval: Duration,
    snapshots: Arc<watch::Sender<RunSnapshot>>,
    clock: Clock,
}

impl RunController {
    pub fn new(db: Database, settings: &TrackerSettings) -> Self {
        Self::with_clock(db, settings, Arc::new(system_now_ms))
    }

    /// Same as [`RunController::new`] but reading time from `clock`, e.g. to replay recorded fixes.
    pub fn with_clock(db: Database, settings: &TrackerSettings, clock: Clock) -> Self {
        let session = RunSession::with_profile_config(settings.profile);
        let (snapshots, _) = watch::channel(session.snapshot());

        Self {
            session: Arc::new(Mutex::new(session)),
            history: Arc::new(Mutex::new(History::new())),
            db,
            ticker: Arc::new(Mutex::new(None)),
            tick_interval: Duration::from_millis(settings.tick_interval_ms.max(1)),
            snapshots: Arc::new(snapshots),
            clock,
        }
    }

    /// Pulls persisted runs into the in-memory history. Returns how many were added.
    pub async fn load_history(&self) -> Result<usize> {
        let records = self
            .db
            .list_run_records()
            .await
            .context("failed to load run history")?;
        // storage lists newest first; history wants insertion order
        let added = self
            .history
            .lock()
            .await
            .extend_from(records.into_iter().rev());
        log_info!("Loaded {added} saved runs");
        Ok(added)
    }

    pub fn subscribe(&self) -> watch::Receiver<RunSnapshot> {
        self.snapshots.subscribe()
    }

    pub async fn snapshot(&self) -> RunSnapshot {
        self.session.lock().await.snapshot()
    }

    pub async fn start(&self) -> RunSnapshot {
        let (started, snapshot) = {
            let mut session = self.session.lock().await;
            let started = session.start((self.clock)());
            (started, session.snapshot())
        };

        if started {
            log_info!("Run started");
            self.spawn_ticker().await;
        }
        self.publish(snapshot)
    }

    pub async fn pause(&self) -> RunSnapshot {
        self.mutate(|session, now| {
            session.pause(now);
        })
        .await
    }

    pub async fn resume(&self) -> RunSnapshot {
        self.mutate(|session, now| {
            session.resume(now);
        })
        .await
    }

    pub async fn stop(&self) -> RunSnapshot {
        let snapshot = self
            .mutate(|session, now| {
                session.stop(now);
            })
            .await;
        self.cancel_ticker().await;
        if snapshot.status == RunStatus::Finished {
            log_info!(
                "Run finished: {:.0} m in {} s",
                snapshot.distance_meters,
                snapshot.duration_sec
            );
        }
        snapshot
    }

    pub async fn reset(&self) -> RunSnapshot {
        self.cancel_ticker().await;
        self.mutate(|session, _| session.reset()).await
    }

    /// Entry point for the location stream.
    pub async fn add_gps_fix(&self, fix: GpsFix) -> bool {
        let (accepted, snapshot) = {
            let mut session = self.session.lock().await;
            let accepted = session.add_gps_fix(fix, (self.clock)());
            (accepted, session.snapshot())
        };
        if accepted {
            self.publish(snapshot);
        }
        accepted
    }

    pub async fn add_photo(&self, uri: impl Into<String>) -> RunSnapshot {
        let uri = uri.into();
        self.mutate(move |session, now| session.add_photo(uri, now))
            .await
    }

    /// Manual tick for hosts that drive their own timer.
    pub async fn tick_now(&self) -> RunSnapshot {
        self.mutate(|session, now| {
            session.tick(now);
        })
        .await
    }

    /// Commits a finished run to storage, then to the in-memory history.
    ///
    /// `Ok(None)` when the run is not finished. A failed write leaves the
    /// history untouched. The session is not reset.
    pub async fn save_to_history(&self) -> Result<Option<String>> {
        let record = self.session.lock().await.finished_record((self.clock)());
        let Some(record) = record else {
            log_debug!("save ignored, run not finished");
            return Ok(None);
        };

        if let Err(err) = self.db.insert_run_record(&record).await {
            log_error!("Run {} not saved: {err:?}", record.id);
            return Err(err);
        }

        let id = record.id.clone();
        self.history.lock().await.insert(record);
        log_info!("Saved run {id}");
        Ok(Some(id))
    }

    pub async fn history_list(&self) -> Vec<RunRecord> {
        self.history
            .lock()
            .await
            .list()
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn history_summaries(&self) -> Vec<RunSummary> {
        self.history.lock().await.summaries()
    }

    pub async fn history_get(&self, run_id: &str) -> Option<RunRecord> {
        self.history.lock().await.get(run_id).cloned()
    }

    async fn mutate<F>(&self, op: F) -> RunSnapshot
    where
        F: FnOnce(&mut RunSession, i64),
    {
        let snapshot = {
            let mut session = self.session.lock().await;
            op(&mut session, (self.clock)());
            session.snapshot()
        };
        self.publish(snapshot)
    }

    fn publish(&self, snapshot: RunSnapshot) -> RunSnapshot {
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(previous) = ticker_guard.take() {
            previous.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(tick_loop(
            self.session.clone(),
            self.snapshots.clone(),
            self.clock.clone(),
            self.tick_interval,
            cancel.clone(),
        ));

        *ticker_guard = Some(Ticker { handle, cancel });
    }

    async fn cancel_ticker(&self) {
        let ticker = self.ticker.lock().await.take();
        if let Some(ticker) = ticker {
            ticker.cancel.cancel();
            if let Err(err) = ticker.handle.await {
                log_error!("ticker task failed to join: {err}");
            }
        }
    }
}

async fn tick_loop(
    session: Arc<Mutex<RunSession>>,
    snapshots: Arc<watch::Sender<RunSnapshot>>,
    clock: Clock,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let snapshot = {
                    let mut guard = session.lock().await;
                    if matches!(guard.status(), RunStatus::Idle | RunStatus::Finished) {
                        break;
                    }
                    if !guard.tick(clock()) {
                        continue;
                    }
                    guard.snapshot()
                };
                snapshots.send_replace(snapshot);
            }
            _ = cancel.cancelled() => {
                log_info!("ticker shutting down");
                break;
            }
        }
    }
}
