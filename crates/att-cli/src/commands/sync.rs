//! Sync command for pulling a device dump into the local database.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use att_db::Database;

use crate::Config;
use crate::device::DumpDevice;
use crate::orchestrator::{AttendanceSync, SyncGuard, SyncOrchestrator};

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Only import users.
    #[arg(long, conflicts_with = "attendance_only")]
    pub users_only: bool,

    /// Only import punches.
    #[arg(long)]
    pub attendance_only: bool,

    /// Device dump directory (overrides `device.dump_dir`).
    #[arg(long)]
    pub dump: Option<PathBuf>,
}

/// Picks the dump directory from the flag or the config.
pub fn dump_dir(flag: Option<&Path>, config: &Config) -> Result<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.device.dump_dir.clone())
        .context("no device dump directory; pass --dump or set device.dump_dir")
}

fn print_attendance(outcome: &AttendanceSync) {
    println!(
        "Punches inserted: {} ({} already stored, {} skipped)",
        outcome.inserted, outcome.duplicates, outcome.skipped
    );
}

pub fn run(db: &mut Database, config: &Config, args: &SyncArgs) -> Result<()> {
    let dir = dump_dir(args.dump.as_deref(), config)?;
    let Some(_guard) = SyncGuard::acquire(&config.sync_lock_path())? else {
        anyhow::bail!("sync already in progress");
    };

    tracing::debug!(dir = %dir.display(), "syncing from device dump");
    let mut orchestrator = SyncOrchestrator::new(db, DumpDevice::new(dir));
    if args.users_only {
        let added = orchestrator.sync_users()?;
        println!("Users added: {added}");
    } else if args.attendance_only {
        let outcome = orchestrator.sync_attendance()?;
        print_attendance(&outcome);
    } else {
        let outcome = orchestrator.synchronize_all()?;
        println!("Users added: {}", outcome.users_added);
        print_attendance(&outcome.attendance);
    }
    Ok(())
}
