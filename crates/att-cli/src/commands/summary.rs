//! Summary command for a single employee.

use std::fmt::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use att_core::{Aggregator, DateRange, EmployeeSummary};
use att_db::{Database, Employee, EventQuery};

use super::util::format_hours;

pub fn build_summary(
    db: &Database,
    aggregator: &Aggregator,
    code: &str,
    range: DateRange,
) -> Result<(Employee, EmployeeSummary)> {
    let employee = db
        .employee_by_code(code)?
        .with_context(|| format!("unknown employee: {code}"))?;
    let events = db.events_in_range(&EventQuery {
        employee_code: Some(code.to_string()),
        ..EventQuery::new(range)
    })?;
    Ok((employee, aggregator.employee_summary(&events, range)))
}

pub fn format_summary(employee: &Employee, range: DateRange, summary: &EmployeeSummary) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "{} {} [{}]",
        employee.first_name, employee.last_name, employee.code
    )
    .unwrap();
    writeln!(output, "{} to {}", range.start(), range.end()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Days seen:        {}", summary.total_days).unwrap();
    writeln!(output, "Present:          {}", summary.present_days).unwrap();
    writeln!(output, "Absent:           {}", summary.absent_days).unwrap();
    writeln!(output, "Late:             {}", summary.late_days).unwrap();
    writeln!(output, "Early departures: {}", summary.early_departures).unwrap();
    writeln!(output, "Work hours:       {}", format_hours(summary.total_hours)).unwrap();
    writeln!(
        output,
        "Overtime hours:   {}",
        format_hours(summary.overtime_hours)
    )
    .unwrap();
    output
}

#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    employee: &'a Employee,
    start: String,
    end: String,
    summary: &'a EmployeeSummary,
}

pub fn run(
    db: &Database,
    aggregator: &Aggregator,
    code: &str,
    range: DateRange,
    json: bool,
) -> Result<()> {
    let (employee, summary) = build_summary(db, aggregator, code, range)?;
    if json {
        let output = JsonSummary {
            employee: &employee,
            start: range.start().to_string(),
            end: range.end().to_string(),
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_summary(&employee, range, &summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use att_core::{Direction, EmployeeStatus, parse_timestamp};
    use att_db::{NewAttendanceLog, NewEmployee};
    use chrono::NaiveDate;
    use insta::assert_snapshot;

    fn march() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn summary_counts_days_for_one_employee() {
        let mut db = Database::open_in_memory().unwrap();
        let id = db
            .add_employee(&NewEmployee {
                code: "12".to_string(),
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                department_id: None,
                status: EmployeeStatus::Active,
            })
            .unwrap();
        let punch = |ts: &str, direction| NewAttendanceLog {
            employee_id: id,
            timestamp: parse_timestamp(ts).unwrap(),
            direction,
        };
        db.insert_attendance_logs(&[
            punch("2025-03-03 08:55:00", Direction::In),
            punch("2025-03-03 17:10:00", Direction::Out),
            punch("2025-03-04 09:00:00", Direction::In),
            punch("2025-03-04 16:30:00", Direction::Out),
            punch("2025-03-05 09:20:00", Direction::In),
        ])
        .unwrap();

        let (employee, summary) =
            build_summary(&db, &Aggregator::default(), "12", march()).unwrap();
        assert_eq!(
            summary.present_days + summary.absent_days,
            summary.total_days
        );
        assert_snapshot!(format_summary(&employee, march(), &summary), @r"
        Grace Hopper [12]
        2025-03-01 to 2025-03-31

        Days seen:        3
        Present:          2
        Absent:           1
        Late:             0
        Early departures: 1
        Work hours:       15.75
        Overtime hours:   0.25
        ");
    }

    #[test]
    fn summary_of_unknown_employee_fails() {
        let db = Database::open_in_memory().unwrap();
        let err = build_summary(&db, &Aggregator::default(), "404", march()).unwrap_err();
        assert_eq!(err.to_string(), "unknown employee: 404");
    }
}
