//! Storage layer for attendance tracking.
//!
//! Provides persistence for departments, employees, attendance logs, generated
//! reports and sync runs using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization (e.g. a `Mutex<Database>`).
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Attendance timestamps are stored as TEXT in the device's local wall-clock
//! time, formatted as [`att_core::TIMESTAMP_FORMAT`] (e.g. `2025-03-03 08:55:00`).
//! Every component is zero-padded, so lexicographic ordering matches
//! chronological ordering and range filters can compare strings directly.
//!
//! ## Event Ordering
//!
//! [`Database::events_in_range`] returns events ordered by timestamp
//! ascending, then by insertion order. The aggregator's pairing relies on
//! this order.
//!
//! ## Append-only Logs
//!
//! Attendance logs are never updated or deleted. Uniqueness of
//! (employee, timestamp, direction) is enforced by an existence check before
//! each insert rather than by a table constraint.

use std::path::Path;

use att_core::{
    AttendanceEvent, DateRange, Direction, EmployeeStatus, InvalidStatus, UnknownDirection,
    format_timestamp, parse_timestamp,
};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params, params_from_iter};
use serde::Serialize;
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored attendance timestamp does not match the storage format.
    #[error("invalid timestamp for attendance log {log_id}: {timestamp}")]
    TimestampParse {
        log_id: i64,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored attendance direction is not `IN` or `OUT`.
    #[error("invalid direction for attendance log {log_id}")]
    InvalidDirection {
        log_id: i64,
        #[source]
        source: UnknownDirection,
    },
    /// A stored employee status is not recognised.
    #[error("invalid status for employee {code}")]
    InvalidStatus {
        code: String,
        #[source]
        source: InvalidStatus,
    },
    /// An employee with this code already exists.
    #[error("employee {0} already exists")]
    DuplicateEmployee(String),
    /// The employee still has attendance history.
    #[error("employee {code} has {logs} attendance logs; deactivate instead of deleting")]
    EmployeeHasLogs { code: String, logs: i64 },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Department stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

/// Employee joined with its department name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: i64,
    /// External identifier, as enrolled on the time-clock.
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub department_id: Option<i64>,
    pub department: Option<String>,
    pub status: EmployeeStatus,
}

/// An employee ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub department_id: Option<i64>,
    pub status: EmployeeStatus,
}

/// Partial employee update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department_id: Option<i64>,
    /// Unassigns the department; ignored when `department_id` is set.
    pub clear_department: bool,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeUpdate {
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.department_id.is_none()
            && !self.clear_department
            && self.status.is_none()
    }
}

/// Filters for listing employees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub department_id: Option<i64>,
    pub status: Option<EmployeeStatus>,
    /// Substring matched against given name, family name and code.
    pub search: Option<String>,
}

/// An attendance log ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendanceLog {
    /// Internal employee row id.
    pub employee_id: i64,
    pub timestamp: NaiveDateTime,
    pub direction: Direction,
}

/// Parameters for [`Database::events_in_range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub range: DateRange,
    /// Restrict to one employee (external code).
    pub employee_code: Option<String>,
    /// Restrict to one department (by name).
    pub department: Option<String>,
}

impl EventQuery {
    pub const fn new(range: DateRange) -> Self {
        Self {
            range,
            employee_code: None,
            department: None,
        }
    }
}

/// A generated report file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRecord {
    pub id: i64,
    pub report_type: String,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// `YYYY-MM-DD`.
    pub end_date: String,
    pub file_path: String,
    pub generated_at: String,
}

/// Outcome of a sync step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Warning,
    Error,
}

impl SyncStatus {
    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// One recorded sync step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncLogRecord {
    pub id: i64,
    pub sync_type: String,
    pub records_count: i64,
    pub status: String,
    pub error_message: Option<String>,
    pub sync_time: String,
}

/// Employee row before its status is validated.
struct EmployeeRow {
    id: i64,
    code: String,
    first_name: String,
    last_name: String,
    department_id: Option<i64>,
    department: Option<String>,
    status: String,
}

impl EmployeeRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            code: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            department_id: row.get(4)?,
            department: row.get(5)?,
            status: row.get(6)?,
        })
    }

    fn into_employee(self) -> Result<Employee, DbError> {
        let status = self
            .status
            .parse()
            .map_err(|source| DbError::InvalidStatus {
                code: self.code.clone(),
                source,
            })?;
        Ok(Employee {
            id: self.id,
            code: self.code,
            first_name: self.first_name,
            last_name: self.last_name,
            department_id: self.department_id,
            department: self.department,
            status,
        })
    }
}

/// Attendance log row before its timestamp and direction are parsed.
struct EventRow {
    log_id: i64,
    employee_code: String,
    first_name: String,
    last_name: String,
    department: Option<String>,
    timestamp: String,
    direction: String,
}

impl EventRow {
    fn into_event(self) -> Result<AttendanceEvent, DbError> {
        let timestamp =
            parse_timestamp(&self.timestamp).map_err(|source| DbError::TimestampParse {
                log_id: self.log_id,
                timestamp: self.timestamp.clone(),
                source,
            })?;
        let direction = self
            .direction
            .parse()
            .map_err(|source| DbError::InvalidDirection {
                log_id: self.log_id,
                source,
            })?;
        Ok(AttendanceEvent {
            employee_code: self.employee_code,
            first_name: self.first_name,
            last_name: self.last_name,
            department: self.department,
            timestamp,
            direction,
        })
    }
}

/// Matches `YYYY-MM-DD HH:MM:SS`; only such values order correctly as text.
const CANONICAL_TIMESTAMP_GLOB: &str =
    "[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9] [0-9][0-9]:[0-9][0-9]:[0-9][0-9]";

const EMPLOYEE_SELECT: &str = "
    SELECT e.id, e.employee_code, e.first_name, e.last_name, e.department_id, d.name, e.status
    FROM employees e
    LEFT JOIN departments d ON e.department_id = d.id
";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS departments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_code TEXT NOT NULL UNIQUE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                department_id INTEGER,
                status TEXT NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (department_id) REFERENCES departments(id) ON DELETE SET NULL
            );

            CREATE INDEX IF NOT EXISTS idx_employees_department ON employees(department_id);

            -- Attendance logs: one row per badge punch
            -- datetime: local wall-clock time, 'YYYY-MM-DD HH:MM:SS'
            -- type: 'IN' or 'OUT'
            CREATE TABLE IF NOT EXISTS attendance_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_id INTEGER NOT NULL,
                datetime TEXT NOT NULL,
                type TEXT NOT NULL CHECK(type IN ('IN', 'OUT')),
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (employee_id) REFERENCES employees(id)
            );

            CREATE INDEX IF NOT EXISTS idx_attendance_logs_datetime ON attendance_logs(datetime);
            CREATE INDEX IF NOT EXISTS idx_attendance_logs_employee ON attendance_logs(employee_id, datetime);

            CREATE TABLE IF NOT EXISTS reports (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                report_type TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                file_path TEXT NOT NULL,
                generated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS sync_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sync_type TEXT NOT NULL,
                records_count INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL,
                error_message TEXT,
                sync_time TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            ",
        )?;
        Ok(())
    }

    // ========== Departments ==========

    /// Adds a department and returns its id.
    pub fn add_department(&mut self, name: &str) -> Result<i64, DbError> {
        self.conn
            .execute("INSERT INTO departments (name) VALUES (?)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Returns the id of the named department, creating it if needed.
    pub fn ensure_department(&mut self, name: &str) -> Result<i64, DbError> {
        if let Some(department) = self.department_by_name(name)? {
            return Ok(department.id);
        }
        tracing::debug!(name, "creating department");
        self.add_department(name)
    }

    pub fn department_by_name(&self, name: &str) -> Result<Option<Department>, DbError> {
        let department = self
            .conn
            .query_row(
                "SELECT id, name FROM departments WHERE name = ?",
                [name],
                |row| {
                    Ok(Department {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(department)
    }

    /// Lists departments ordered by name.
    pub fn list_departments(&self) -> Result<Vec<Department>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM departments ORDER BY name ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Department {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        let mut departments = Vec::new();
        for row in rows {
            departments.push(row?);
        }
        Ok(departments)
    }

    // ========== Employees ==========

    /// Adds an employee and returns its row id.
    pub fn add_employee(&mut self, employee: &NewEmployee) -> Result<i64, DbError> {
        let result = self.conn.execute(
            "
            INSERT INTO employees (employee_code, first_name, last_name, department_id, status)
            VALUES (?, ?, ?, ?, ?)
            ",
            params![
                employee.code,
                employee.first_name,
                employee.last_name,
                employee.department_id,
                employee.status.as_str(),
            ],
        );
        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
                    && self.employee_by_code(&employee.code)?.is_some() =>
            {
                Err(DbError::DuplicateEmployee(employee.code.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Applies a partial update. Returns `false` if nothing was changed.
    pub fn update_employee(&mut self, code: &str, update: &EmployeeUpdate) -> Result<bool, DbError> {
        if update.is_empty() {
            return Ok(false);
        }

        let mut assignments = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if let Some(first_name) = &update.first_name {
            assignments.push("first_name = ?");
            values.push(Value::Text(first_name.clone()));
        }
        if let Some(last_name) = &update.last_name {
            assignments.push("last_name = ?");
            values.push(Value::Text(last_name.clone()));
        }
        if let Some(department_id) = update.department_id {
            assignments.push("department_id = ?");
            values.push(Value::Integer(department_id));
        } else if update.clear_department {
            assignments.push("department_id = NULL");
        }
        if let Some(status) = update.status {
            assignments.push("status = ?");
            values.push(Value::Text(status.as_str().to_string()));
        }
        values.push(Value::Text(code.to_string()));

        let query = format!(
            "UPDATE employees SET {} WHERE employee_code = ?",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&query, params_from_iter(values.iter()))?;
        Ok(changed > 0)
    }

    /// Deletes an employee without attendance history.
    ///
    /// Returns `false` if no such employee exists.
    pub fn delete_employee(&mut self, code: &str) -> Result<bool, DbError> {
        let Some(employee) = self.employee_by_code(code)? else {
            return Ok(false);
        };
        let logs: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM attendance_logs WHERE employee_id = ?",
            [employee.id],
            |row| row.get(0),
        )?;
        if logs > 0 {
            return Err(DbError::EmployeeHasLogs {
                code: code.to_string(),
                logs,
            });
        }
        let deleted = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?", [employee.id])?;
        Ok(deleted > 0)
    }

    pub fn employee_by_code(&self, code: &str) -> Result<Option<Employee>, DbError> {
        let query = format!("{EMPLOYEE_SELECT} WHERE e.employee_code = ?");
        let row = self
            .conn
            .query_row(&query, [code], EmployeeRow::from_row)
            .optional()?;
        row.map(EmployeeRow::into_employee).transpose()
    }

    /// Lists employees ordered by family name, then given name.
    pub fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, DbError> {
        let mut conditions = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if let Some(department_id) = filter.department_id {
            conditions.push("e.department_id = ?");
            values.push(Value::Integer(department_id));
        }
        if let Some(status) = filter.status {
            conditions.push("e.status = ?");
            values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(term) = filter.search.as_deref().filter(|t| !t.trim().is_empty()) {
            conditions.push("(e.first_name LIKE ? OR e.last_name LIKE ? OR e.employee_code LIKE ?)");
            let pattern = format!("%{}%", term.trim());
            values.extend(std::iter::repeat_n(Value::Text(pattern), 3));
        }

        let mut query = EMPLOYEE_SELECT.to_string();
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY e.last_name ASC, e.first_name ASC, e.employee_code ASC");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), EmployeeRow::from_row)?;
        let mut employees = Vec::new();
        for row in rows {
            employees.push(row?.into_employee()?);
        }
        Ok(employees)
    }

    pub fn count_employees(&self) -> Result<i64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count)
    }

    // ========== Attendance ==========

    /// Checks whether an identical punch is already stored.
    pub fn log_exists(
        &self,
        employee_id: i64,
        timestamp: NaiveDateTime,
        direction: Direction,
    ) -> Result<bool, DbError> {
        let exists = self.conn.query_row(
            "
            SELECT EXISTS(
                SELECT 1 FROM attendance_logs
                WHERE employee_id = ? AND datetime = ? AND type = ?
            )
            ",
            params![employee_id, format_timestamp(timestamp), direction.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Inserts punches that are not stored yet. Returns the number inserted.
    pub fn insert_attendance_logs(&mut self, logs: &[NewAttendanceLog]) -> Result<usize, DbError> {
        if logs.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut exists_stmt = tx.prepare(
                "
                SELECT EXISTS(
                    SELECT 1 FROM attendance_logs
                    WHERE employee_id = ? AND datetime = ? AND type = ?
                )
                ",
            )?;
            let mut insert_stmt = tx.prepare(
                "INSERT INTO attendance_logs (employee_id, datetime, type) VALUES (?, ?, ?)",
            )?;
            for log in logs {
                let timestamp = format_timestamp(log.timestamp);
                let direction = log.direction.as_str();
                let exists: bool = exists_stmt.query_row(
                    params![log.employee_id, timestamp, direction],
                    |row| row.get(0),
                )?;
                if exists {
                    continue;
                }
                inserted += insert_stmt.execute(params![log.employee_id, timestamp, direction])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Lists punches within an inclusive date range, joined with employees.
    ///
    /// Ordered by timestamp ascending, then by insertion order. Rows not in
    /// canonical `YYYY-MM-DD HH:MM:SS` form cannot be range-compared as text,
    /// so they are always selected and filtered after parsing; unparseable
    /// ones fail with [`DbError::TimestampParse`] instead of being dropped.
    pub fn events_in_range(&self, query: &EventQuery) -> Result<Vec<AttendanceEvent>, DbError> {
        let mut values = vec![
            Value::Text(format!("{} 00:00:00", query.range.start())),
            Value::Text(format!("{} 23:59:59", query.range.end())),
            Value::Text(CANONICAL_TIMESTAMP_GLOB.to_string()),
        ];
        let mut sql = String::from(
            "
            SELECT al.id, e.employee_code, e.first_name, e.last_name, d.name, al.datetime, al.type
            FROM attendance_logs al
            JOIN employees e ON al.employee_id = e.id
            LEFT JOIN departments d ON e.department_id = d.id
            WHERE ((al.datetime >= ? AND al.datetime <= ?) OR al.datetime NOT GLOB ?)
            ",
        );
        if let Some(code) = &query.employee_code {
            sql.push_str(" AND e.employee_code = ?");
            values.push(Value::Text(code.clone()));
        }
        if let Some(department) = &query.department {
            sql.push_str(" AND d.name = ?");
            values.push(Value::Text(department.clone()));
        }
        sql.push_str(" ORDER BY al.datetime ASC, al.id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
            Ok(EventRow {
                log_id: row.get(0)?,
                employee_code: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
                department: row.get(4)?,
                timestamp: row.get(5)?,
                direction: row.get(6)?,
            })
        })?;
        let mut keyed = Vec::new();
        for row in rows {
            let row = row?;
            let log_id = row.log_id;
            let event = row.into_event()?;
            if query.range.contains(event.timestamp.date()) {
                keyed.push((event.timestamp, log_id, event));
            }
        }
        // Non-padded rows sort wrongly as text.
        keyed.sort_by_key(|(timestamp, log_id, _)| (*timestamp, *log_id));
        let events: Vec<_> = keyed.into_iter().map(|(_, _, event)| event).collect();
        tracing::debug!(count = events.len(), "loaded attendance events");
        Ok(events)
    }

    pub fn count_attendance_logs(&self) -> Result<i64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM attendance_logs", [], |row| row.get(0))?;
        Ok(count)
    }

    // ========== Reports & sync logs ==========

    /// Records a generated report file and returns its id.
    pub fn add_report(
        &mut self,
        report_type: &str,
        range: DateRange,
        file_path: &str,
    ) -> Result<i64, DbError> {
        self.conn.execute(
            "INSERT INTO reports (report_type, start_date, end_date, file_path) VALUES (?, ?, ?, ?)",
            params![
                report_type,
                range.start().to_string(),
                range.end().to_string(),
                file_path
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Lists the most recent reports first.
    pub fn recent_reports(&self, limit: usize) -> Result<Vec<ReportRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, report_type, start_date, end_date, file_path, generated_at
            FROM reports
            ORDER BY id DESC
            LIMIT ?
            ",
        )?;
        let rows = stmt.query_map([limit_param(limit)], |row| {
            Ok(ReportRecord {
                id: row.get(0)?,
                report_type: row.get(1)?,
                start_date: row.get(2)?,
                end_date: row.get(3)?,
                file_path: row.get(4)?,
                generated_at: row.get(5)?,
            })
        })?;
        let mut reports = Vec::new();
        for row in rows {
            reports.push(row?);
        }
        Ok(reports)
    }

    /// Records the outcome of a sync step and returns its id.
    pub fn add_sync_log(
        &mut self,
        sync_type: &str,
        records_count: usize,
        status: SyncStatus,
        error_message: Option<&str>,
    ) -> Result<i64, DbError> {
        let records_count = i64::try_from(records_count).unwrap_or(i64::MAX);
        self.conn.execute(
            "INSERT INTO sync_logs (sync_type, records_count, status, error_message) VALUES (?, ?, ?, ?)",
            params![sync_type, records_count, status.as_str(), error_message],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Lists the most recent sync steps first.
    pub fn recent_sync_logs(&self, limit: usize) -> Result<Vec<SyncLogRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, sync_type, records_count, status, error_message, sync_time
            FROM sync_logs
            ORDER BY id DESC
            LIMIT ?
            ",
        )?;
        let rows = stmt.query_map([limit_param(limit)], |row| {
            Ok(SyncLogRecord {
                id: row.get(0)?,
                sync_type: row.get(1)?,
                records_count: row.get(2)?,
                status: row.get(3)?,
                error_message: row.get(4)?,
                sync_time: row.get(5)?,
            })
        })?;
        let mut logs = Vec::new();
        for row in rows {
            logs.push(row?);
        }
        Ok(logs)
    }
}

fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
