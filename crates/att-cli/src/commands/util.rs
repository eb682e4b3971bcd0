//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use att_core::DateRange;
use chrono::{Days, Local, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").expect("relative date regex is valid")
});

/// Conservative bound for relative dates (~1000 years in days).
const MAX_RELATIVE_DAYS: u64 = 1000 * 365;

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date string relative to `today`.
///
/// Supports:
/// - ISO dates: "2025-03-03"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let input = s.trim().to_lowercase();
    match input.as_str() {
        "today" => return Ok(today),
        "yesterday" => {
            return today
                .checked_sub_days(Days::new(1))
                .context("date out of range");
        }
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
        return Ok(date);
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(&input) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD, 'today', 'yesterday' or relative (e.g., '3 days ago')"
        );
    };

    let n: u64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;
    let days = match &caps[2] {
        "day" => n,
        "week" => n.saturating_mul(7),
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };
    if days > MAX_RELATIVE_DAYS {
        anyhow::bail!("Relative date too far back: {s}");
    }

    today
        .checked_sub_days(Days::new(days))
        .context("date out of range")
}

/// Resolve optional `--from`/`--to` arguments; both default to `today`.
pub fn resolve_range(
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
) -> anyhow::Result<DateRange> {
    let start = from.map_or(Ok(today), |s| parse_date(s, today))?;
    let end = to.map_or(Ok(today), |s| parse_date(s, today))?;
    Ok(DateRange::new(start, end)?)
}

/// Hours with exactly two decimals.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}
