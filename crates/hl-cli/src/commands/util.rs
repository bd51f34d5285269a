//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use hl_core::{DiaperDetail, ItemTag};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Parse a datetime string as either ISO 8601 or relative time.
///
/// Supports:
/// - ISO 8601: "2026-01-15T10:30:00Z"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago",
///   measured back from `reference`
pub fn parse_datetime(s: &str, reference: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    // Try ISO 8601 first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Try relative time: "N hours/minutes/days/weeks ago"
    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use ISO 8601 (e.g., 2026-01-15T10:30:00Z) or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    // Safe to create Duration now that we've validated the range
    let duration = Duration::minutes(n * minutes_per_unit);
    Ok(reference - duration)
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {s}. Use YYYY-MM-DD"))
}

/// Formats minutes as a duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats a minute of the day as `HH:MM`.
pub fn format_clock(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Short description of an item for human output.
pub fn describe_tag(tag: &ItemTag) -> String {
    match tag {
        ItemTag::Feed {
            magnitude: Some(magnitude),
        } => format!("feed {magnitude} ml"),
        ItemTag::Feed { magnitude: None } => "feed".to_string(),
        ItemTag::Sleep { ongoing: true } => "sleep (ongoing)".to_string(),
        ItemTag::Sleep { ongoing: false } => "sleep".to_string(),
        ItemTag::Diaper { detail } => format!("diaper {}", describe_detail(*detail)),
    }
}

const fn describe_detail(detail: DiaperDetail) -> &'static str {
    match detail {
        DiaperDetail::Pee => "pee",
        DiaperDetail::Poop => "poop",
        DiaperDetail::Both => "both",
        DiaperDetail::Unknown => "unknown",
    }
}
