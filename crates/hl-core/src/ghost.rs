//! Predicted ("ghost") feed markers.
//!
//! Ghosts are forward-looking hints computed fresh on every call and never
//! written back as events.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;

use crate::activity::ActivityKind;
use crate::config::{GhostConfig, GhostMode, MAX_HISTORY_DAYS};
use crate::event::Event;
use crate::types::SubjectId;
use crate::window::{DayWindow, MINUTES_PER_DAY};

/// A predicted feed on a day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ghost {
    /// Minute of the day the feed is expected.
    pub time_minute: u32,
    /// Expected volume, when history provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_magnitude: Option<f64>,
    /// Position in the day's feed order (historical-average mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<usize>,
}

/// Produces the ghosts to draw on `window` for `subject`.
pub fn generate_ghosts<Tz: TimeZone>(
    events: &[Event],
    subject: &SubjectId,
    window: &DayWindow<Tz>,
    config: &GhostConfig,
    now: DateTime<Utc>,
) -> Vec<Ghost> {
    if !config.show_ghost {
        return Vec::new();
    }
    let feeds = || {
        events
            .iter()
            .filter(move |event| &event.subject == subject && event.activity() == ActivityKind::Feed)
    };

    let ghosts: Vec<Ghost> = match config.mode {
        GhostMode::NextOccurrence => {
            next_occurrence(feeds(), window, config.fixed_interval_hours, now)
                .into_iter()
                .collect()
        }
        GhostMode::HistoricalAverage => historical_average(feeds(), window, config.history_days),
    };
    tracing::debug!(mode = ?config.mode, count = ghosts.len(), date = %window.date(), "generated ghosts");
    ghosts
}

/// Last feed plus a fixed interval, shown only if it lands on `window` and
/// has not already passed.
pub fn next_occurrence<'a, Tz: TimeZone>(
    feeds: impl Iterator<Item = &'a Event>,
    window: &DayWindow<Tz>,
    interval_hours: f64,
    now: DateTime<Utc>,
) -> Option<Ghost> {
    let last = feeds
        .filter(|event| event.start <= now)
        .max_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)))?;
    let predicted = last.start.checked_add_signed(hours_to_duration(interval_hours)?)?;

    if !window.contains(predicted) || predicted < now {
        tracing::trace!(%predicted, "next feed prediction outside window or in the past");
        return None;
    }
    Some(Ghost {
        time_minute: minute_of_window(window.minutes_from_start(predicted)),
        predicted_magnitude: None,
        ordinal: None,
    })
}

/// One ghost per feed ordinal seen in the previous `days` days, averaging
/// time of day and volume over the days that had a feed at that position.
///
/// Looks back at most [`MAX_HISTORY_DAYS`] days.
pub fn historical_average<'a, Tz: TimeZone>(
    feeds: impl Iterator<Item = &'a Event> + Clone,
    window: &DayWindow<Tz>,
    days: u32,
) -> Vec<Ghost> {
    let days = days.min(MAX_HISTORY_DAYS);
    let mut history: Vec<Vec<(i64, Option<f64>)>> = Vec::new();
    let mut day = window.previous();
    for _ in 0..days {
        let Some(past) = day else { break };
        let mut same_day: Vec<&Event> = feeds
            .clone()
            .filter(|event| past.is_same_date(event.start))
            .collect();
        same_day.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        history.push(
            same_day
                .iter()
                .map(|event| (past.minutes_from_start(event.start), event.magnitude()))
                .collect(),
        );
        day = past.previous();
    }

    let longest = history.iter().map(Vec::len).max().unwrap_or(0);
    (0..longest)
        .map(|ordinal| {
            let samples: Vec<(i64, Option<f64>)> = history
                .iter()
                .filter_map(|feeds| feeds.get(ordinal).copied())
                .collect();
            let minutes: Vec<f64> = samples.iter().map(|&(minute, _)| minute as f64).collect();
            let magnitudes: Vec<f64> = samples.iter().filter_map(|&(_, magnitude)| magnitude).collect();
            Ghost {
                time_minute: minute_of_window(mean(&minutes).map_or(0, round_minute)),
                predicted_magnitude: mean(&magnitudes),
                ordinal: Some(ordinal),
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[allow(clippy::cast_possible_truncation)]
fn round_minute(value: f64) -> i64 {
    value.round() as i64
}

#[allow(clippy::cast_possible_truncation)]
fn hours_to_duration(hours: f64) -> Option<Duration> {
    if !hours.is_finite() || hours < 0.0 {
        return None;
    }
    Duration::try_milliseconds((hours * 3_600_000.0).round() as i64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn minute_of_window(minutes: i64) -> u32 {
    minutes.clamp(0, i64::from(MINUTES_PER_DAY) - 1) as u32
}
