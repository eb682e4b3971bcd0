//! Report command for daily and monthly attendance reports.
//!
//! A daily report has one row per complete (employee, date); a monthly report
//! has one row per employee with day counts and hour totals. Either renders
//! as a text table or as JSON, to stdout or to a file. Files are recorded in
//! the `reports` table.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use serde::Serialize;

use att_core::{Aggregator, DateRange, MonthlyRow, ReportRow};
use att_db::{Database, EventQuery};

use super::util::{format_hours, parse_date, resolve_range};
use crate::Config;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Per-employee monthly totals instead of per-day rows.
    #[arg(long)]
    pub monthly: bool,

    /// First date (default: today, or the first of the month with --monthly).
    #[arg(long)]
    pub from: Option<String>,

    /// Last date (default: today).
    #[arg(long)]
    pub to: Option<String>,

    /// Only this employee code.
    #[arg(long)]
    pub employee: Option<String>,

    /// Only this department.
    #[arg(long)]
    pub department: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Write the report to this file instead of stdout.
    #[arg(long, conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Write the report into the configured reports directory.
    #[arg(long)]
    pub save: bool,
}

/// Which report to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Daily,
    Monthly,
}

impl ReportKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "lowercase")]
pub enum ReportBody {
    Daily(Vec<ReportRow>),
    Monthly(Vec<MonthlyRow>),
}

/// A built report, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub company: String,
    #[serde(flatten)]
    pub range: DateRange,
    #[serde(flatten)]
    pub body: ReportBody,
}

impl Report {
    pub const fn kind(&self) -> ReportKind {
        match self.body {
            ReportBody::Daily(_) => ReportKind::Daily,
            ReportBody::Monthly(_) => ReportKind::Monthly,
        }
    }
}

pub fn build_report(
    db: &Database,
    aggregator: &Aggregator,
    company: &str,
    kind: ReportKind,
    query: &EventQuery,
) -> Result<Report> {
    let events = db.events_in_range(query)?;
    let body = match kind {
        ReportKind::Daily => ReportBody::Daily(aggregator.report_rows(&events, query.range)),
        ReportKind::Monthly => {
            ReportBody::Monthly(aggregator.monthly_rollup(&events, query.range))
        }
    };
    Ok(Report {
        company: company.to_string(),
        range: query.range,
        body,
    })
}

// ========== Human-Readable Output ==========

pub fn format_report(report: &Report) -> String {
    let mut output = String::new();
    writeln!(output, "{}", report.company).unwrap();
    let title = match report.kind() {
        ReportKind::Daily => "Daily attendance report",
        ReportKind::Monthly => "Monthly attendance report",
    };
    writeln!(
        output,
        "{title}: {} to {}",
        report.range.start(),
        report.range.end()
    )
    .unwrap();
    writeln!(output).unwrap();

    match &report.body {
        ReportBody::Daily(rows) => format_daily_rows(&mut output, rows),
        ReportBody::Monthly(rows) => format_monthly_rows(&mut output, rows),
    }
    output
}

fn format_daily_rows(output: &mut String, rows: &[ReportRow]) {
    if rows.is_empty() {
        writeln!(output, "No complete attendance days in this period.").unwrap();
        return;
    }

    writeln!(
        output,
        "{:<8}  {:<14}  {:<14}  {:<12}  {:<10}  {:<8}  {:<8}  {:>6}",
        "Code", "Last name", "First name", "Department", "Date", "In", "Out", "Hours"
    )
    .unwrap();
    let mut total = 0.0;
    for row in rows {
        total += row.work_hours;
        writeln!(
            output,
            "{:<8}  {:<14}  {:<14}  {:<12}  {}  {}  {}  {:>6}",
            row.employee_code,
            row.last_name,
            row.first_name,
            row.department.as_deref().unwrap_or("-"),
            row.date.format("%Y-%m-%d"),
            row.time_in.format("%H:%M:%S"),
            row.time_out.format("%H:%M:%S"),
            format_hours(row.work_hours)
        )
        .unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output, "{} rows, {} hours", rows.len(), format_hours(total)).unwrap();
}

fn format_monthly_rows(output: &mut String, rows: &[MonthlyRow]) {
    if rows.is_empty() {
        writeln!(output, "No attendance in this period.").unwrap();
        return;
    }

    writeln!(
        output,
        "{:<8}  {:<14}  {:<14}  {:<12}  {:>4}  {:>7}  {:>7}  {:>8}",
        "Code", "Last name", "First name", "Department", "Days", "Present", "Hours", "Overtime"
    )
    .unwrap();
    for row in rows {
        writeln!(
            output,
            "{:<8}  {:<14}  {:<14}  {:<12}  {:>4}  {:>7}  {:>7}  {:>8}",
            row.employee_code,
            row.last_name,
            row.first_name,
            row.department.as_deref().unwrap_or("-"),
            row.total_days,
            row.present_days,
            format_hours(row.total_hours),
            format_hours(row.overtime_hours)
        )
        .unwrap();
    }
}

// ========== JSON Output ==========

pub fn format_report_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

// ========== Public Interface ==========

/// Resolves the date range, defaulting a monthly report to the month so far.
pub fn report_range(args: &ReportArgs, today: NaiveDate) -> Result<DateRange> {
    if args.monthly && args.from.is_none() {
        let end = args
            .to
            .as_deref()
            .map_or(Ok(today), |s| parse_date(s, today))?;
        let start = end.with_day(1).context("invalid month start")?;
        return Ok(DateRange::new(start, end)?);
    }
    resolve_range(args.from.as_deref(), args.to.as_deref(), today)
}

/// File name used by `--save`.
fn saved_report_path(reports_dir: &Path, report: &Report, json: bool) -> PathBuf {
    let extension = if json { "json" } else { "txt" };
    reports_dir.join(format!(
        "{}_{}_{}.{extension}",
        report.kind().as_str(),
        report.range.start().format("%Y%m%d"),
        report.range.end().format("%Y%m%d")
    ))
}

/// Writes a rendered report and records it in the store.
pub fn write_report(
    db: &mut Database,
    report: &Report,
    rendered: &str,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
    db.add_report(
        report.kind().as_str(),
        report.range,
        &path.display().to_string(),
    )?;
    tracing::info!(path = %path.display(), kind = report.kind().as_str(), "report written");
    Ok(())
}

pub fn run(
    db: &mut Database,
    config: &Config,
    aggregator: &Aggregator,
    args: &ReportArgs,
    today: NaiveDate,
) -> Result<()> {
    let range = report_range(args, today)?;
    let kind = if args.monthly {
        ReportKind::Monthly
    } else {
        ReportKind::Daily
    };
    let query = EventQuery {
        range,
        employee_code: args.employee.clone(),
        department: args.department.clone(),
    };
    let report = build_report(db, aggregator, &config.company_name, kind, &query)?;

    let mut rendered = if args.json {
        format_report_json(&report)?
    } else {
        format_report(&report)
    };

    let path = if args.save {
        Some(saved_report_path(&config.reports_dir, &report, args.json))
    } else {
        args.output.clone()
    };

    match path {
        Some(path) => {
            if !rendered.ends_with('\n') {
                rendered.push('\n');
            }
            write_report(db, &report, &rendered, &path)?;
            println!("Report written to {}", path.display());
        }
        None if args.json => println!("{rendered}"),
        None => print!("{rendered}"),
    }
    Ok(())
}
