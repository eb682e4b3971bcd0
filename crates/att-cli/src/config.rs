//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use att_core::WorkRules;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

const DEFAULT_SYNC_INTERVAL_SECS: u64 = 3600;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Directory that report files are written to by default.
    pub reports_dir: PathBuf,
    /// Printed at the top of every report.
    pub company_name: String,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    /// Lateness, early-departure and overtime thresholds.
    #[serde(default)]
    pub rules: WorkRules,
}

/// Where device data is read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Directory holding `users.jsonl` and `attendance.jsonl`.
    pub dump_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Seconds between background sync cycles.
    pub interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("reports_dir", &self.reports_dir)
            .field("device", &self.device)
            .field("sync", &self.sync)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("attendance.db"),
            reports_dir: data_dir.join("reports"),
            company_name: "Attendance".to_string(),
            device: DeviceConfig::default(),
            sync: SyncConfig::default(),
            rules: WorkRules::default(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // ATT_DATABASE_PATH, ATT_RULES__LATE_AFTER, ...
        figment = figment.merge(Env::prefixed("ATT_").split("__"));

        figment.extract()
    }

    /// Lock file serializing sync runs against this database.
    pub fn sync_lock_path(&self) -> PathBuf {
        let mut name = self
            .database_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".sync.lock");
        self.database_path.with_file_name(name)
    }
}

/// Returns the platform-specific config directory for att.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("att"))
}

/// Returns the platform-specific data directory for att.
///
/// On Linux: `~/.local/share/att`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("att"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use att_core::PairingPolicy;
    use chrono::NaiveTime;

    #[test]
    fn test_dirs_data_path_ends_with_att() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "att");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("attendance.db"));
        assert_eq!(config.sync.interval_secs, 3600);
        assert!(config.device.dump_dir.is_none());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
database_path = "/srv/att/attendance.db"
company_name = "Acme"

[device]
dump_dir = "/srv/att/dump"

[sync]
interval_secs = 600

[rules]
late_after = "08:30:00"
early_before = "16:00:00"
standard_hours = 7.5
pairing = "earliest_in_latest_out"
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/srv/att/attendance.db"));
        assert_eq!(config.company_name, "Acme");
        assert_eq!(config.device.dump_dir, Some(PathBuf::from("/srv/att/dump")));
        assert_eq!(config.sync.interval_secs, 600);
        assert_eq!(
            config.rules.late_after,
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        assert!((config.rules.standard_hours - 7.5).abs() < f64::EPSILON);
        assert_eq!(config.rules.pairing, PairingPolicy::EarliestInLatestOut);
    }

    #[test]
    fn test_sync_lock_sits_next_to_database() {
        let config = Config {
            database_path: PathBuf::from("/srv/att/attendance.db"),
            ..Config::default()
        };
        assert_eq!(
            config.sync_lock_path(),
            PathBuf::from("/srv/att/attendance.db.sync.lock")
        );
    }
}
