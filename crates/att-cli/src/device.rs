//! Device gateway backed by a directory of JSON-lines exports.
//!
//! The vendor tooling dumps the time-clock's memory as two files:
//!
//! - `users.jsonl`: `{"user_id": "12", "name": "Ada Lovelace"}`
//! - `attendance.jsonl`: `{"user_id": "12", "timestamp": "2025-03-03 08:55:00", "status": 0}`
//!
//! A missing file is read as an empty list so that a device with no
//! enrolled users or no punches syncs cleanly.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use att_core::{DeviceError, DeviceGateway, DeviceRecord, DeviceUser};
use serde::de::DeserializeOwned;

pub const USERS_FILE: &str = "users.jsonl";
pub const ATTENDANCE_FILE: &str = "attendance.jsonl";

/// Reads users and punches from a dump directory.
#[derive(Debug, Clone)]
pub struct DumpDevice {
    dir: PathBuf,
}

impl DumpDevice {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DeviceGateway for DumpDevice {
    fn users(&mut self) -> Result<Vec<DeviceUser>, DeviceError> {
        read_records(&self.dir.join(USERS_FILE), "user")
    }

    fn attendance(&mut self) -> Result<Vec<DeviceRecord>, DeviceError> {
        read_records(&self.dir.join(ATTENDANCE_FILE), "attendance")
    }
}

fn read_records<T: DeserializeOwned>(
    path: &Path,
    kind: &'static str,
) -> Result<Vec<T>, DeviceError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "device dump file missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(err) => return Err(DeviceError::Unavailable(err)),
    };
    parse_records(BufReader::new(file), kind)
}

fn parse_records<T: DeserializeOwned, R: BufRead>(
    reader: R,
    kind: &'static str,
) -> Result<Vec<T>, DeviceError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(DeviceError::Unavailable)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = serde_json::from_str(trimmed).map_err(|err| DeviceError::InvalidRecord {
            kind,
            line: idx + 1,
            message: err.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}
