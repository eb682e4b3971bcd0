//! Stats command: presence, lateness and hour totals over a date range.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use att_core::{Aggregator, AttendanceStats, DateRange};
use att_db::{Database, EventQuery};

use super::util::format_hours;

pub fn build_stats(
    db: &Database,
    aggregator: &Aggregator,
    query: &EventQuery,
) -> Result<AttendanceStats> {
    let events = db.events_in_range(query)?;
    Ok(aggregator.range_stats(&events, query.range))
}

pub fn format_stats(range: DateRange, stats: &AttendanceStats) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "Attendance statistics: {} to {}",
        range.start(),
        range.end()
    )
    .unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Employees:       {}", stats.total_employees).unwrap();
    writeln!(output, "Present:         {}", stats.present_employees).unwrap();
    writeln!(output, "Absent:          {}", stats.absent_employees).unwrap();
    writeln!(output, "Late days:       {}", stats.late_employees).unwrap();
    writeln!(
        output,
        "Work hours:      {}",
        format_hours(stats.total_work_hours)
    )
    .unwrap();
    writeln!(
        output,
        "Overtime hours:  {}",
        format_hours(stats.overtime_hours)
    )
    .unwrap();
    output
}

#[derive(Debug, Serialize)]
struct JsonStats<'a> {
    start: String,
    end: String,
    #[serde(flatten)]
    stats: &'a AttendanceStats,
}

pub fn format_stats_json(range: DateRange, stats: &AttendanceStats) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonStats {
        start: range.start().to_string(),
        end: range.end().to_string(),
        stats,
    })?)
}

pub fn run(db: &Database, aggregator: &Aggregator, query: &EventQuery, json: bool) -> Result<()> {
    let stats = build_stats(db, aggregator, query)?;
    if json {
        println!("{}", format_stats_json(query.range, &stats)?);
    } else {
        print!("{}", format_stats(query.range, &stats));
    }
    Ok(())
}
