//! Status command for showing store contents and recent syncs.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use att_db::Database;

const RECENT_SYNCS: usize = 5;

pub fn run<W: Write>(writer: &mut W, db: &Database, database_path: &Path) -> Result<()> {
    let employees = db.count_employees()?;
    let logs = db.count_attendance_logs()?;
    let syncs = db.recent_sync_logs(RECENT_SYNCS)?;

    writeln!(writer, "Attendance status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(writer, "Employees: {employees}")?;
    writeln!(writer, "Attendance logs: {logs}")?;

    if syncs.is_empty() {
        writeln!(writer, "No syncs recorded.")?;
        return Ok(());
    }

    writeln!(writer, "Recent syncs:")?;
    for sync in syncs {
        write!(
            writer,
            "- {} {}: {} ({} records)",
            sync.sync_time, sync.sync_type, sync.status, sync.records_count
        )?;
        if let Some(message) = sync.error_message {
            write!(writer, " {message}")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use att_core::EmployeeStatus;
    use att_db::{NewEmployee, SyncStatus};
    use insta::assert_snapshot;

    #[test]
    fn status_command_outputs_counts() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("attendance.db");
        let mut db = Database::open(&db_path).unwrap();
        db.add_employee(&NewEmployee {
            code: "1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            department_id: None,
            status: EmployeeStatus::Active,
        })
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &db, &db_path).unwrap();

        let output = String::from_utf8(output).unwrap();
        let output = output.replace(&db_path.display().to_string(), "[TEMP]/attendance.db");
        assert_snapshot!(output, @r"
        Attendance status
        Database: [TEMP]/attendance.db
        Employees: 1
        Attendance logs: 0
        No syncs recorded.
        ");
    }

    #[test]
    fn status_command_lists_recent_syncs() {
        let mut db = Database::open_in_memory().unwrap();
        db.add_sync_log("users", 2, SyncStatus::Success, None)
            .unwrap();
        db.add_sync_log("attendance", 0, SyncStatus::Error, Some("device offline"))
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &db, Path::new(":memory:")).unwrap();
        let output = String::from_utf8(output).unwrap();

        let lines: Vec<_> = output.lines().skip(4).collect();
        assert_eq!(lines[0], "Recent syncs:");
        assert!(lines[1].ends_with("attendance: error (0 records) device offline"));
        assert!(lines[2].ends_with("users: success (2 records)"));
    }
}
