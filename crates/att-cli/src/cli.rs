//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::employee::{AddArgs, ListArgs, UpdateArgs};
use crate::commands::report::ReportArgs;
use crate::commands::sync::SyncArgs;
use crate::commands::watch::WatchArgs;

/// Biometric time-clock attendance.
///
/// Syncs punches from a time-clock dump into a local database and derives
/// daily views, statistics and reports from them.
#[derive(Debug, Parser)]
#[command(name = "att", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show database contents and recent syncs.
    Status,

    /// Manage departments.
    #[command(subcommand)]
    Department(DepartmentAction),

    /// Manage employees.
    #[command(subcommand)]
    Employee(EmployeeAction),

    /// Pull users and punches from the device.
    Sync(SyncArgs),

    /// Sync periodically until interrupted.
    Watch(WatchArgs),

    /// Show every punch of one date.
    Daily {
        /// Date to show (YYYY-MM-DD, today, yesterday, "N days ago").
        #[arg(long)]
        date: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Presence, lateness and hour totals over a date range.
    Stats {
        /// First date (default: today).
        #[arg(long)]
        from: Option<String>,

        /// Last date (default: today).
        #[arg(long)]
        to: Option<String>,

        /// Only this employee code.
        #[arg(long)]
        employee: Option<String>,

        /// Only this department.
        #[arg(long)]
        department: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Attendance summary for one employee.
    Summary {
        /// Employee code.
        code: String,

        /// First date (default: today).
        #[arg(long)]
        from: Option<String>,

        /// Last date (default: today).
        #[arg(long)]
        to: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Build a daily or monthly attendance report.
    Report(ReportArgs),
}

#[derive(Debug, Subcommand)]
pub enum DepartmentAction {
    /// Create a department.
    Add {
        name: String,
    },
    /// List departments.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum EmployeeAction {
    /// Add an employee.
    Add(AddArgs),
    /// Change an employee's names, department or status.
    Update(UpdateArgs),
    /// Delete an employee without attendance history.
    Delete {
        code: String,
    },
    /// Show one employee.
    Show {
        code: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List employees.
    List(ListArgs),
}
