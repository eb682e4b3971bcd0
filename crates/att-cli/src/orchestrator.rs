//! Pulls users and punches from a device into the event store.
//!
//! Only one sync may run at a time. [`SyncGuard::acquire`] serializes runs
//! within the process (the background timer and an interactive sync) through
//! an atomic flag, and across processes through an exclusive lock file next
//! to the database.

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::Serialize;

use att_core::{DeviceGateway, EmployeeStatus, parse_timestamp};
use att_db::{Database, NewAttendanceLog, NewEmployee, SyncStatus};

static SYNC_IN_PROGRESS: AtomicBool = AtomicBool::new(false);

/// Sync kinds recorded in `sync_logs`.
pub const SYNC_USERS: &str = "users";
pub const SYNC_ATTENDANCE: &str = "attendance";
pub const SYNC_ALL: &str = "auto_sync";

/// Held for the duration of one sync run.
///
/// Dropping the guard releases both the in-process flag and the file lock.
#[derive(Debug)]
pub struct SyncGuard {
    _lock: File,
}

impl SyncGuard {
    /// Tries to start a sync run. Returns `None` if one is already running.
    pub fn acquire(lock_path: &Path) -> Result<Option<Self>> {
        if SYNC_IN_PROGRESS
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(None);
        }

        match Self::lock_file(lock_path) {
            Ok(Some(lock)) => Ok(Some(Self { _lock: lock })),
            Ok(None) => {
                SYNC_IN_PROGRESS.store(false, Ordering::Release);
                Ok(None)
            }
            Err(err) => {
                SYNC_IN_PROGRESS.store(false, Ordering::Release);
                Err(err)
            }
        }
    }

    fn lock_file(lock_path: &Path) -> Result<Option<File>> {
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).context("failed to create lock directory")?;
        }
        let file = File::create(lock_path)
            .with_context(|| format!("failed to create lock file {}", lock_path.display()))?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(file)),
            Err(err) if err.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(err) => Err(err).context("failed to acquire sync lock"),
        }
    }
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        SYNC_IN_PROGRESS.store(false, Ordering::Release);
    }
}

/// Counts from one attendance sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSync {
    /// Punches new to the store.
    pub inserted: usize,
    /// Punches already stored.
    pub duplicates: usize,
    /// Punches dropped for an unknown user or a malformed timestamp.
    pub skipped: usize,
}

/// Counts from a full sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub users_added: usize,
    pub attendance: AttendanceSync,
}

/// Drives one device against one database.
pub struct SyncOrchestrator<'a, G> {
    db: &'a mut Database,
    device: G,
}

impl<'a, G: DeviceGateway> SyncOrchestrator<'a, G> {
    pub const fn new(db: &'a mut Database, device: G) -> Self {
        Self { db, device }
    }

    /// Imports device users not yet known as active employees.
    pub fn sync_users(&mut self) -> Result<usize> {
        match self.import_users() {
            Ok(added) => {
                self.db
                    .add_sync_log(SYNC_USERS, added, SyncStatus::Success, None)?;
                tracing::info!(added, "synced device users");
                Ok(added)
            }
            Err(err) => Err(self.record_failure(SYNC_USERS, err)),
        }
    }

    /// Imports punches not yet stored.
    pub fn sync_attendance(&mut self) -> Result<AttendanceSync> {
        match self.import_attendance() {
            Ok(outcome) => {
                let status = if outcome.skipped > 0 {
                    SyncStatus::Warning
                } else {
                    SyncStatus::Success
                };
                let message = (outcome.skipped > 0)
                    .then(|| format!("skipped {} unusable records", outcome.skipped));
                self.db.add_sync_log(
                    SYNC_ATTENDANCE,
                    outcome.inserted,
                    status,
                    message.as_deref(),
                )?;
                tracing::info!(
                    inserted = outcome.inserted,
                    duplicates = outcome.duplicates,
                    skipped = outcome.skipped,
                    "synced attendance"
                );
                Ok(outcome)
            }
            Err(err) => Err(self.record_failure(SYNC_ATTENDANCE, err)),
        }
    }

    /// Users first, so punches of newly enrolled users resolve.
    pub fn synchronize_all(&mut self) -> Result<SyncOutcome> {
        let outcome = self
            .sync_users()
            .and_then(|users_added| {
                Ok(SyncOutcome {
                    users_added,
                    attendance: self.sync_attendance()?,
                })
            })
            .map_err(|err| self.record_failure(SYNC_ALL, err))?;
        self.db.add_sync_log(
            SYNC_ALL,
            outcome.users_added + outcome.attendance.inserted,
            SyncStatus::Success,
            None,
        )?;
        Ok(outcome)
    }

    fn import_users(&mut self) -> Result<usize> {
        let users = self
            .device
            .users()
            .context("failed to read users from device")?;
        let mut added = 0;
        for user in users {
            if self.db.employee_by_code(&user.user_id)?.is_some() {
                continue;
            }
            let (first_name, last_name) = user.split_name();
            self.db.add_employee(&NewEmployee {
                code: user.user_id.clone(),
                first_name,
                last_name,
                department_id: None,
                status: EmployeeStatus::Active,
            })?;
            tracing::debug!(code = %user.user_id, "added employee from device");
            added += 1;
        }
        Ok(added)
    }

    fn import_attendance(&mut self) -> Result<AttendanceSync> {
        let records = self
            .device
            .attendance()
            .context("failed to read attendance from device")?;

        let mut employee_ids: HashMap<String, Option<i64>> = HashMap::new();
        let mut logs = Vec::with_capacity(records.len());
        let mut outcome = AttendanceSync::default();
        for record in &records {
            let employee_id = match employee_ids.get(&record.user_id) {
                Some(id) => *id,
                None => {
                    let id = self.db.employee_by_code(&record.user_id)?.map(|e| e.id);
                    employee_ids.insert(record.user_id.clone(), id);
                    id
                }
            };
            let Some(employee_id) = employee_id else {
                tracing::warn!(user_id = %record.user_id, "punch for unknown user, skipping");
                outcome.skipped += 1;
                continue;
            };
            let timestamp = match parse_timestamp(&record.timestamp) {
                Ok(timestamp) => timestamp,
                Err(err) => {
                    tracing::warn!(
                        user_id = %record.user_id,
                        timestamp = %record.timestamp,
                        error = %err,
                        "malformed punch timestamp, skipping"
                    );
                    outcome.skipped += 1;
                    continue;
                }
            };
            logs.push(NewAttendanceLog {
                employee_id,
                timestamp,
                direction: record.direction(),
            });
        }

        outcome.inserted = self.db.insert_attendance_logs(&logs)?;
        outcome.duplicates = logs.len() - outcome.inserted;
        Ok(outcome)
    }

    fn record_failure(&mut self, sync_type: &str, err: anyhow::Error) -> anyhow::Error {
        tracing::error!(sync_type, error = %format!("{err:#}"), "sync failed");
        if let Err(log_err) =
            self.db
                .add_sync_log(sync_type, 0, SyncStatus::Error, Some(&format!("{err:#}")))
        {
            tracing::warn!(error = %log_err, "failed to record sync failure");
        }
        err
    }
}
