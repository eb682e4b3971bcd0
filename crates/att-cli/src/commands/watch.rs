//! Watch command: sync on a timer from a background thread.
//!
//! Each cycle syncs the device dump and then logs today's statistics. A cycle
//! that finds another sync running is skipped. Errors are logged and the timer
//! keeps going.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use att_core::{Aggregator, AttendanceStats, DateRange};
use att_db::{Database, EventQuery};

use super::stats::build_stats;
use super::sync::dump_dir;
use super::util::today;
use crate::Config;
use crate::device::DumpDevice;
use crate::orchestrator::{SyncGuard, SyncOrchestrator, SyncOutcome};

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between cycles (overrides `sync.interval_secs`).
    #[arg(long)]
    pub interval: Option<u64>,

    /// Device dump directory (overrides `device.dump_dir`).
    #[arg(long)]
    pub dump: Option<PathBuf>,

    /// Stop after this many cycles.
    #[arg(long)]
    pub count: Option<u64>,
}

/// One sync-then-aggregate pass. Returns `None` if another sync holds the lock.
pub fn run_cycle(
    config: &Config,
    dump_dir: &Path,
    date: NaiveDate,
) -> Result<Option<(SyncOutcome, AttendanceStats)>> {
    let Some(_guard) = SyncGuard::acquire(&config.sync_lock_path())? else {
        tracing::warn!("sync already in progress, skipping cycle");
        return Ok(None);
    };

    let mut db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    let outcome = SyncOrchestrator::new(&mut db, DumpDevice::new(dump_dir)).synchronize_all()?;

    let aggregator = Aggregator::new(config.rules.clone());
    let stats = build_stats(&db, &aggregator, &EventQuery::new(DateRange::single(date)))?;
    tracing::info!(
        present = stats.present_employees,
        absent = stats.absent_employees,
        late = stats.late_employees,
        "attendance today"
    );
    Ok(Some((outcome, stats)))
}

/// Starts the timer thread. The first cycle runs immediately.
pub fn spawn_timer(
    config: Config,
    dump_dir: PathBuf,
    interval: Duration,
    max_cycles: Option<u64>,
) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("att-sync-timer".to_string())
        .spawn(move || {
            let mut cycles = 0;
            loop {
                cycles += 1;
                match run_cycle(&config, &dump_dir, today()) {
                    Ok(Some((outcome, stats))) => println!(
                        "cycle {cycles}: {} users added, {} punches inserted, {}/{} present today",
                        outcome.users_added,
                        outcome.attendance.inserted,
                        stats.present_employees,
                        stats.total_employees
                    ),
                    Ok(None) => println!("cycle {cycles}: skipped, sync already in progress"),
                    Err(err) => {
                        tracing::error!(error = %format!("{err:#}"), "sync cycle failed");
                    }
                }
                if max_cycles.is_some_and(|max| cycles >= max) {
                    break;
                }
                thread::sleep(interval);
            }
        })
        .context("failed to spawn sync timer")
}

pub fn run(config: &Config, args: &WatchArgs) -> Result<()> {
    let dir = dump_dir(args.dump.as_deref(), config)?;
    let interval = Duration::from_secs(args.interval.unwrap_or(config.sync.interval_secs).max(1));
    tracing::info!(interval_secs = interval.as_secs(), dir = %dir.display(), "watching device dump");

    let handle = spawn_timer(config.clone(), dir, interval, args.count)?;
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("sync timer thread panicked"))
}
