//! Daily command: every punch of one date, grouped by employee.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use att_core::{Aggregator, DailyAttendance, DateRange};
use att_db::{Database, EventQuery};

pub fn build_daily(
    db: &Database,
    aggregator: &Aggregator,
    date: NaiveDate,
) -> Result<BTreeMap<String, DailyAttendance>> {
    let events = db.events_in_range(&EventQuery::new(DateRange::single(date)))?;
    Ok(aggregator.daily_view(&events))
}

pub fn format_daily(date: NaiveDate, view: &BTreeMap<String, DailyAttendance>) -> String {
    let mut output = String::new();
    writeln!(output, "Daily attendance: {date}").unwrap();

    if view.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No punches recorded.").unwrap();
        return output;
    }

    for (code, entry) in view {
        writeln!(output).unwrap();
        write!(output, "[{code}] {}", entry.employee).unwrap();
        if let Some(department) = &entry.department {
            write!(output, " ({department})").unwrap();
        }
        writeln!(output).unwrap();
        for log in &entry.logs {
            writeln!(output, "  {}  {}", log.time.format("%H:%M:%S"), log.direction).unwrap();
        }
    }
    output
}

#[derive(Debug, Serialize)]
struct JsonDaily<'a> {
    date: NaiveDate,
    employees: &'a BTreeMap<String, DailyAttendance>,
}

pub fn format_daily_json(
    date: NaiveDate,
    view: &BTreeMap<String, DailyAttendance>,
) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonDaily {
        date,
        employees: view,
    })?)
}

pub fn run(db: &Database, aggregator: &Aggregator, date: NaiveDate, json: bool) -> Result<()> {
    let view = build_daily(db, aggregator, date)?;
    if json {
        println!("{}", format_daily_json(date, &view)?);
    } else {
        print!("{}", format_daily(date, &view));
    }
    Ok(())
}
