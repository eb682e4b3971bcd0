//! Attendance aggregation.
//!
//! Turns a flat stream of badge punches into per-employee day windows and
//! derives statistics, summaries and report rows from them.
//!
//! # Day pairing
//!
//! Events are grouped by employee, then by the calendar date of their
//! timestamp. Each (employee, date) collapses into a [`DayWindow`] holding at
//! most one check-in and one check-out, chosen by the configured
//! [`PairingPolicy`]. A window is complete when both sides are present; an
//! incomplete window counts as an absent day.
//!
//! The event store delivers events ordered by timestamp ascending, so under
//! [`PairingPolicy::LastSeen`] the latest punch of each direction wins.
//!
//! All maps are ordered, so the same input always produces the same output.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::event::{AttendanceEvent, DateRange};

const DEFAULT_LATE_AFTER: NaiveTime = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time");
const DEFAULT_EARLY_BEFORE: NaiveTime = NaiveTime::from_hms_opt(17, 0, 0).expect("valid time");
const DEFAULT_STANDARD_HOURS: f64 = 8.0;

/// How repeated punches of the same direction on one day are collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingPolicy {
    /// The last `IN` and the last `OUT` in delivery order win.
    #[default]
    LastSeen,
    /// The earliest `IN` and the latest `OUT` by clock time win,
    /// regardless of delivery order.
    EarliestInLatestOut,
}

/// Thresholds applied to every employee alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRules {
    /// Check-ins strictly after this wall-clock time are late.
    pub late_after: NaiveTime,
    /// Check-outs strictly before this wall-clock time are early departures.
    pub early_before: NaiveTime,
    /// Baseline day length; hours beyond it are overtime.
    pub standard_hours: f64,
    pub pairing: PairingPolicy,
}

impl Default for WorkRules {
    fn default() -> Self {
        Self {
            late_after: DEFAULT_LATE_AFTER,
            early_before: DEFAULT_EARLY_BEFORE,
            standard_hours: DEFAULT_STANDARD_HOURS,
            pairing: PairingPolicy::default(),
        }
    }
}

impl WorkRules {
    pub fn is_late(&self, check_in: NaiveDateTime) -> bool {
        check_in.time() > self.late_after
    }

    pub fn is_early_departure(&self, check_out: NaiveDateTime) -> bool {
        check_out.time() < self.early_before
    }

    pub fn overtime(&self, worked_hours: f64) -> f64 {
        (worked_hours - self.standard_hours).max(0.0)
    }
}

/// The check-in/check-out pair for one employee on one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayWindow {
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
}

impl DayWindow {
    fn record(&mut self, timestamp: NaiveDateTime, direction: Direction, policy: PairingPolicy) {
        let slot = match direction {
            Direction::In => &mut self.check_in,
            Direction::Out => &mut self.check_out,
        };
        let replace = match (policy, direction, *slot) {
            (PairingPolicy::LastSeen, _, _) | (_, _, None) => true,
            (PairingPolicy::EarliestInLatestOut, Direction::In, Some(current)) => {
                timestamp < current
            }
            (PairingPolicy::EarliestInLatestOut, Direction::Out, Some(current)) => {
                timestamp > current
            }
        };
        if replace {
            *slot = Some(timestamp);
        }
    }

    pub const fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    /// Hours between check-in and check-out.
    ///
    /// `None` unless the window is complete. A check-out earlier than the
    /// check-in yields a negative value.
    #[allow(clippy::cast_precision_loss)]
    pub fn worked_hours(&self) -> Option<f64> {
        let (check_in, check_out) = self.check_in.zip(self.check_out)?;
        let seconds = check_out.signed_duration_since(check_in).num_seconds();
        Some(seconds as f64 / 3600.0)
    }
}

/// One punch inside the daily view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PunchLog {
    pub time: NaiveDateTime,
    pub direction: Direction,
}

/// Raw punches of one employee, in the order they were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAttendance {
    pub employee: String,
    pub department: Option<String>,
    pub logs: Vec<PunchLog>,
}

/// Range-level statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total_employees: usize,
    /// Employees with at least one complete day.
    pub present_employees: usize,
    /// Employees without any complete day.
    pub absent_employees: usize,
    /// Number of late employee-days (an employee late twice counts twice).
    pub late_employees: usize,
    pub total_work_hours: f64,
    pub overtime_hours: f64,
}

/// Attendance summary for a single employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub total_days: usize,
    pub present_days: usize,
    pub absent_days: usize,
    pub late_days: usize,
    pub early_departures: usize,
    pub total_hours: f64,
    pub overtime_hours: f64,
}

/// One complete day of one employee, as printed in daily reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub employee_code: String,
    pub last_name: String,
    pub first_name: String,
    pub department: Option<String>,
    pub date: NaiveDate,
    pub time_in: NaiveTime,
    pub time_out: NaiveTime,
    /// Rounded to two decimal places.
    pub work_hours: f64,
}

/// Per-employee totals over a range, as printed in monthly reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    pub employee_code: String,
    pub last_name: String,
    pub first_name: String,
    pub department: Option<String>,
    /// Number of `IN` punches, whether or not a matching `OUT` exists.
    pub total_days: usize,
    /// Number of complete days.
    pub present_days: usize,
    /// Rounded to two decimal places.
    pub total_hours: f64,
    /// Rounded to two decimal places.
    pub overtime_hours: f64,
}

/// Day windows of one employee, keyed by date.
#[derive(Debug)]
struct EmployeeDays<'a> {
    identity: &'a AttendanceEvent,
    days: BTreeMap<NaiveDate, DayWindow>,
}

/// Derives attendance views from event streams.
///
/// Holds no state besides its rules; every call recomputes from its input.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    rules: WorkRules,
}

impl Aggregator {
    pub const fn new(rules: WorkRules) -> Self {
        Self { rules }
    }

    pub const fn rules(&self) -> &WorkRules {
        &self.rules
    }

    /// Groups punches by employee without pairing or deduplication.
    ///
    /// Meant for events of a single date; no date filtering is applied.
    pub fn daily_view(&self, events: &[AttendanceEvent]) -> BTreeMap<String, DailyAttendance> {
        let mut view: BTreeMap<String, DailyAttendance> = BTreeMap::new();
        for event in events {
            view.entry(event.employee_code.clone())
                .or_insert_with(|| DailyAttendance {
                    employee: event.display_name(),
                    department: event.department.clone(),
                    logs: Vec::new(),
                })
                .logs
                .push(PunchLog {
                    time: event.timestamp,
                    direction: event.direction,
                });
        }
        view
    }

    /// Statistics over every employee present in `events`.
    pub fn range_stats(&self, events: &[AttendanceEvent], range: DateRange) -> AttendanceStats {
        let mut stats = AttendanceStats::default();
        for employee in self.day_windows(events, range).values() {
            stats.total_employees += 1;
            let mut present_days = 0;
            for window in employee.days.values() {
                let (Some(check_in), Some(hours)) = (window.check_in, window.worked_hours())
                else {
                    continue;
                };
                present_days += 1;
                stats.total_work_hours += hours;
                stats.overtime_hours += self.rules.overtime(hours);
                if self.rules.is_late(check_in) {
                    stats.late_employees += 1;
                }
            }
            if present_days > 0 {
                stats.present_employees += 1;
            } else {
                stats.absent_employees += 1;
            }
        }
        stats
    }

    /// Summary of a single employee's events.
    ///
    /// All events are treated as belonging to the same employee.
    pub fn employee_summary(&self, events: &[AttendanceEvent], range: DateRange) -> EmployeeSummary {
        let mut days: BTreeMap<NaiveDate, DayWindow> = BTreeMap::new();
        for event in events.iter().filter(|e| range.contains(e.timestamp.date())) {
            days.entry(event.timestamp.date())
                .or_default()
                .record(event.timestamp, event.direction, self.rules.pairing);
        }

        let mut summary = EmployeeSummary {
            total_days: days.len(),
            ..EmployeeSummary::default()
        };
        for window in days.values() {
            let (Some(check_in), Some(check_out), Some(hours)) =
                (window.check_in, window.check_out, window.worked_hours())
            else {
                summary.absent_days += 1;
                continue;
            };
            summary.present_days += 1;
            summary.total_hours += hours;
            summary.overtime_hours += self.rules.overtime(hours);
            if self.rules.is_late(check_in) {
                summary.late_days += 1;
            }
            if self.rules.is_early_departure(check_out) {
                summary.early_departures += 1;
            }
        }
        summary
    }

    /// One row per complete (employee, date); incomplete days are dropped.
    pub fn report_rows(&self, events: &[AttendanceEvent], range: DateRange) -> Vec<ReportRow> {
        let mut rows = Vec::new();
        for employee in self.day_windows(events, range).values() {
            for (date, window) in &employee.days {
                let (Some(check_in), Some(check_out), Some(hours)) =
                    (window.check_in, window.check_out, window.worked_hours())
                else {
                    continue;
                };
                rows.push(ReportRow {
                    employee_code: employee.identity.employee_code.clone(),
                    last_name: employee.identity.last_name.clone(),
                    first_name: employee.identity.first_name.clone(),
                    department: employee.identity.department.clone(),
                    date: *date,
                    time_in: check_in.time(),
                    time_out: check_out.time(),
                    work_hours: round_hours(hours),
                });
            }
        }
        rows
    }

    /// Per-employee totals for monthly reports.
    pub fn monthly_rollup(&self, events: &[AttendanceEvent], range: DateRange) -> Vec<MonthlyRow> {
        let mut in_punches: BTreeMap<&str, usize> = BTreeMap::new();
        for event in events.iter().filter(|e| range.contains(e.timestamp.date())) {
            let count = in_punches.entry(event.employee_code.as_str()).or_default();
            if event.direction == Direction::In {
                *count += 1;
            }
        }

        self.day_windows(events, range)
            .into_iter()
            .map(|(code, employee)| {
                let mut present_days = 0;
                let mut total_hours = 0.0;
                let mut overtime_hours = 0.0;
                for hours in employee.days.values().filter_map(DayWindow::worked_hours) {
                    present_days += 1;
                    total_hours += hours;
                    overtime_hours += self.rules.overtime(hours);
                }
                MonthlyRow {
                    employee_code: code.to_string(),
                    last_name: employee.identity.last_name.clone(),
                    first_name: employee.identity.first_name.clone(),
                    department: employee.identity.department.clone(),
                    total_days: in_punches.get(code).copied().unwrap_or_default(),
                    present_days,
                    total_hours: round_hours(total_hours),
                    overtime_hours: round_hours(overtime_hours),
                }
            })
            .collect()
    }

    fn day_windows<'a>(
        &self,
        events: &'a [AttendanceEvent],
        range: DateRange,
    ) -> BTreeMap<&'a str, EmployeeDays<'a>> {
        let mut employees: BTreeMap<&str, EmployeeDays<'_>> = BTreeMap::new();
        for event in events.iter().filter(|e| range.contains(e.timestamp.date())) {
            employees
                .entry(event.employee_code.as_str())
                .or_insert_with(|| EmployeeDays {
                    identity: event,
                    days: BTreeMap::new(),
                })
                .days
                .entry(event.timestamp.date())
                .or_default()
                .record(event.timestamp, event.direction, self.rules.pairing);
        }
        employees
    }
}

/// Rounds an hour value to two decimal places.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::event::parse_timestamp;

    fn punch(code: &str, timestamp: &str, direction: Direction) -> AttendanceEvent {
        AttendanceEvent {
            employee_code: code.to_string(),
            first_name: format!("First{code}"),
            last_name: format!("Last{code}"),
            department: Some("Ops".to_string()),
            timestamp: parse_timestamp(timestamp).unwrap(),
            direction,
        }
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    fn march() -> DateRange {
        range("2025-03-01", "2025-03-31")
    }

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn standard_day_is_complete_with_overtime() {
        let events = vec![
            punch("7", "2025-03-03 08:55:00", Direction::In),
            punch("7", "2025-03-03 17:10:00", Direction::Out),
        ];
        let aggregator = Aggregator::default();

        let summary = aggregator.employee_summary(&events, march());
        assert_eq!(summary.total_days, 1);
        assert_eq!(summary.present_days, 1);
        assert_eq!(summary.late_days, 0);
        assert_eq!(summary.early_departures, 0);
        approx(summary.total_hours, 8.25);
        approx(summary.overtime_hours, 0.25);
    }

    #[test]
    fn check_in_after_nine_is_late_but_nine_sharp_is_not() {
        let aggregator = Aggregator::default();
        let late = vec![
            punch("1", "2025-03-03 09:05:00", Direction::In),
            punch("1", "2025-03-03 17:30:00", Direction::Out),
        ];
        let on_time = vec![
            punch("1", "2025-03-04 09:00:00", Direction::In),
            punch("1", "2025-03-04 17:30:00", Direction::Out),
        ];

        assert_eq!(aggregator.employee_summary(&late, march()).late_days, 1);
        assert_eq!(aggregator.employee_summary(&on_time, march()).late_days, 0);
        assert_eq!(aggregator.range_stats(&late, march()).late_employees, 1);
        assert_eq!(aggregator.range_stats(&on_time, march()).late_employees, 0);
    }

    #[test]
    fn check_out_before_five_is_early_departure() {
        let events = vec![
            punch("1", "2025-03-03 08:00:00", Direction::In),
            punch("1", "2025-03-03 16:59:59", Direction::Out),
            punch("1", "2025-03-04 08:00:00", Direction::In),
            punch("1", "2025-03-04 17:00:00", Direction::Out),
        ];
        let summary = Aggregator::default().employee_summary(&events, march());
        assert_eq!(summary.early_departures, 1);
    }

    #[test]
    fn lone_check_in_is_absent_and_unreported() {
        let events = vec![punch("9", "2025-03-03 08:30:00", Direction::In)];
        let aggregator = Aggregator::default();

        let summary = aggregator.employee_summary(&events, march());
        assert_eq!(summary.total_days, 1);
        assert_eq!(summary.absent_days, 1);
        approx(summary.total_hours, 0.0);

        let stats = aggregator.range_stats(&events, march());
        assert_eq!(stats.total_employees, 1);
        assert_eq!(stats.absent_employees, 1);
        assert_eq!(stats.present_employees, 0);
        approx(stats.total_work_hours, 0.0);

        assert!(aggregator.report_rows(&events, march()).is_empty());
    }

    #[test]
    fn empty_input_yields_zero_values() {
        let aggregator = Aggregator::default();
        assert_eq!(
            aggregator.range_stats(&[], march()),
            AttendanceStats::default()
        );
        assert_eq!(
            aggregator.employee_summary(&[], march()),
            EmployeeSummary::default()
        );
        assert!(aggregator.report_rows(&[], march()).is_empty());
        assert!(aggregator.monthly_rollup(&[], march()).is_empty());
        assert!(aggregator.daily_view(&[]).is_empty());
    }

    #[test]
    fn late_employees_counts_days_not_people() {
        let events = vec![
            punch("1", "2025-03-03 09:10:00", Direction::In),
            punch("1", "2025-03-03 18:00:00", Direction::Out),
            punch("1", "2025-03-04 09:20:00", Direction::In),
            punch("1", "2025-03-04 18:00:00", Direction::Out),
        ];
        let stats = Aggregator::default().range_stats(&events, march());
        assert_eq!(stats.total_employees, 1);
        assert_eq!(stats.late_employees, 2);
    }

    #[test]
    fn stats_aggregate_hours_across_employees() {
        let events = vec![
            punch("1", "2025-03-03 08:00:00", Direction::In),
            punch("2", "2025-03-03 08:30:00", Direction::In),
            punch("1", "2025-03-03 18:00:00", Direction::Out),
            punch("2", "2025-03-03 12:30:00", Direction::Out),
            punch("3", "2025-03-03 08:30:00", Direction::Out),
        ];
        let stats = Aggregator::default().range_stats(&events, march());
        assert_eq!(stats.total_employees, 3);
        assert_eq!(stats.present_employees, 2);
        assert_eq!(stats.absent_employees, 1);
        approx(stats.total_work_hours, 14.0);
        approx(stats.overtime_hours, 2.0);
    }

    #[test]
    fn counts_always_partition_totals() {
        let stamps = [
            ("2025-03-03 08:00:00", Direction::In),
            ("2025-03-03 17:00:00", Direction::Out),
            ("2025-03-04 09:30:00", Direction::In),
            ("2025-03-05 16:00:00", Direction::Out),
            ("2025-03-06 10:00:00", Direction::In),
            ("2025-03-06 11:00:00", Direction::Out),
        ];
        let aggregator = Aggregator::default();
        // Every subset of the stamps, spread over two employees.
        for mask in 0u32..(1 << stamps.len()) {
            let events: Vec<_> = stamps
                .iter()
                .enumerate()
                .filter(|(idx, _)| mask & (1 << idx) != 0)
                .map(|(idx, (ts, dir))| punch(if idx % 2 == 0 { "a" } else { "b" }, ts, *dir))
                .collect();

            let stats = aggregator.range_stats(&events, march());
            assert_eq!(
                stats.present_employees + stats.absent_employees,
                stats.total_employees,
                "mask {mask:#b}"
            );

            let summary = aggregator.employee_summary(&events, march());
            assert_eq!(
                summary.present_days + summary.absent_days,
                summary.total_days,
                "mask {mask:#b}"
            );
        }
    }

    #[test]
    fn last_seen_policy_keeps_latest_delivered_punch() {
        let events = vec![
            punch("1", "2025-03-03 08:00:00", Direction::In),
            punch("1", "2025-03-03 12:00:00", Direction::Out),
            punch("1", "2025-03-03 13:00:00", Direction::In),
            punch("1", "2025-03-03 17:00:00", Direction::Out),
        ];
        let rows = Aggregator::default().report_rows(&events, march());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time_in, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
        assert_eq!(rows[0].time_out, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        approx(rows[0].work_hours, 4.0);
    }

    #[test]
    fn earliest_in_latest_out_ignores_delivery_order() {
        let rules = WorkRules {
            pairing: PairingPolicy::EarliestInLatestOut,
            ..WorkRules::default()
        };
        let aggregator = Aggregator::new(rules);
        // Delivered newest first.
        let events = vec![
            punch("1", "2025-03-03 17:00:00", Direction::Out),
            punch("1", "2025-03-03 13:00:00", Direction::In),
            punch("1", "2025-03-03 12:00:00", Direction::Out),
            punch("1", "2025-03-03 08:00:00", Direction::In),
        ];
        let rows = aggregator.report_rows(&events, march());
        assert_eq!(rows[0].time_in, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(rows[0].time_out, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        approx(rows[0].work_hours, 9.0);
    }

    #[test]
    fn reversed_punches_produce_negative_hours() {
        let events = vec![
            punch("1", "2025-03-03 17:00:00", Direction::In),
            punch("1", "2025-03-03 08:00:00", Direction::Out),
        ];
        let summary = Aggregator::default().employee_summary(&events, march());
        assert_eq!(summary.present_days, 1);
        approx(summary.total_hours, -9.0);
        approx(summary.overtime_hours, 0.0);
    }

    #[test]
    fn report_rows_round_to_two_decimals() {
        let events = vec![
            punch("5", "2025-03-03 09:00:00", Direction::In),
            punch("5", "2025-03-03 17:05:00", Direction::Out),
        ];
        let rows = Aggregator::default().report_rows(&events, march());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_code, "5");
        assert_eq!(rows[0].last_name, "Last5");
        assert_eq!(rows[0].first_name, "First5");
        assert_eq!(rows[0].department.as_deref(), Some("Ops"));
        assert_eq!(rows[0].date, date("2025-03-03"));
        assert_eq!(format!("{:.2}", rows[0].work_hours), "8.08");
        approx(rows[0].work_hours, 8.08);
    }

    #[test]
    fn report_rows_are_ordered_by_employee_then_date() {
        let events = vec![
            punch("b", "2025-03-04 08:00:00", Direction::In),
            punch("b", "2025-03-04 16:00:00", Direction::Out),
            punch("a", "2025-03-05 08:00:00", Direction::In),
            punch("a", "2025-03-05 16:00:00", Direction::Out),
            punch("a", "2025-03-03 08:00:00", Direction::In),
            punch("a", "2025-03-03 16:00:00", Direction::Out),
        ];
        let rows = Aggregator::default().report_rows(&events, march());
        let keys: Vec<_> = rows
            .iter()
            .map(|row| (row.employee_code.as_str(), row.date))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a", date("2025-03-03")),
                ("a", date("2025-03-05")),
                ("b", date("2025-03-04")),
            ]
        );
    }

    #[test]
    fn events_outside_range_are_ignored() {
        let events = vec![
            punch("1", "2025-02-28 08:00:00", Direction::In),
            punch("1", "2025-02-28 17:00:00", Direction::Out),
            punch("1", "2025-03-01 08:00:00", Direction::In),
        ];
        let aggregator = Aggregator::default();
        let window = range("2025-03-01", "2025-03-01");
        let summary = aggregator.employee_summary(&events, window);
        assert_eq!(summary.total_days, 1);
        assert_eq!(summary.absent_days, 1);
        assert!(aggregator.report_rows(&events, window).is_empty());
    }

    #[test]
    fn daily_view_keeps_raw_order_per_employee() {
        let events = vec![
            punch("2", "2025-03-03 08:10:00", Direction::In),
            punch("1", "2025-03-03 08:00:00", Direction::In),
            punch("2", "2025-03-03 08:12:00", Direction::In),
            punch("1", "2025-03-03 17:00:00", Direction::Out),
        ];
        let view = Aggregator::default().daily_view(&events);
        assert_eq!(view.len(), 2);

        let second = &view["2"];
        assert_eq!(second.employee, "First2 Last2");
        assert_eq!(second.department.as_deref(), Some("Ops"));
        let directions: Vec<_> = second.logs.iter().map(|log| log.direction).collect();
        assert_eq!(directions, vec![Direction::In, Direction::In]);
        assert_eq!(view["1"].logs.len(), 2);
    }

    #[test]
    fn monthly_rollup_counts_in_punches_and_completes_hours() {
        let events = vec![
            punch("1", "2025-03-03 08:00:00", Direction::In),
            punch("1", "2025-03-03 18:00:00", Direction::Out),
            punch("1", "2025-03-04 08:00:00", Direction::In),
            punch("1", "2025-03-05 08:00:00", Direction::In),
            punch("1", "2025-03-05 12:00:00", Direction::Out),
            punch("2", "2025-03-03 16:00:00", Direction::Out),
        ];
        let rows = Aggregator::default().monthly_rollup(&events, march());
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].employee_code, "1");
        assert_eq!(rows[0].total_days, 3);
        assert_eq!(rows[0].present_days, 2);
        approx(rows[0].total_hours, 14.0);
        approx(rows[0].overtime_hours, 2.0);

        assert_eq!(rows[1].employee_code, "2");
        assert_eq!(rows[1].total_days, 0);
        assert_eq!(rows[1].present_days, 0);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let events = vec![
            punch("3", "2025-03-03 08:01:00", Direction::In),
            punch("1", "2025-03-03 08:02:00", Direction::In),
            punch("2", "2025-03-03 08:03:00", Direction::In),
            punch("3", "2025-03-03 17:04:00", Direction::Out),
            punch("1", "2025-03-03 16:05:00", Direction::Out),
            punch("2", "2025-03-04 17:06:00", Direction::Out),
        ];
        let aggregator = Aggregator::default();
        let render = || {
            serde_json::to_string(&(
                aggregator.range_stats(&events, march()),
                aggregator.report_rows(&events, march()),
                aggregator.monthly_rollup(&events, march()),
                aggregator.daily_view(&events),
            ))
            .unwrap()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn custom_thresholds_apply_globally() {
        let rules = WorkRules {
            late_after: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            early_before: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            standard_hours: 7.0,
            pairing: PairingPolicy::LastSeen,
        };
        let events = vec![
            punch("1", "2025-03-03 08:45:00", Direction::In),
            punch("1", "2025-03-03 16:15:00", Direction::Out),
        ];
        let summary = Aggregator::new(rules).employee_summary(&events, march());
        assert_eq!(summary.late_days, 1);
        assert_eq!(summary.early_departures, 0);
        approx(summary.overtime_hours, 0.5);
    }
}
