//! Per-day totals shown alongside the timeline.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::event::{Event, EventKind};
use crate::types::SubjectId;
use crate::window::{DayWindow, MINUTES_PER_DAY};

/// Totals for one subject on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Sleep started on this date, capped at a full day.
    pub sleep_minutes: u32,
    pub awake_minutes: u32,
    pub feed_count: u32,
    pub feed_total: f64,
    /// Changes containing pee (including "both").
    pub pee_count: u32,
    /// Changes containing poop (including "both").
    pub poop_count: u32,
    /// Changes whose contents were not recorded or could not be read.
    pub unknown_diaper_count: u32,
}

/// Sums the day's events for `subject`.
///
/// Sleep is attributed to the day it started on. An ongoing sleep counts up
/// to `now` when `now` falls on this day, otherwise up to the end of the day.
pub fn summarize_day<Tz: TimeZone>(
    events: &[Event],
    subject: &SubjectId,
    window: &DayWindow<Tz>,
    now: DateTime<Utc>,
) -> DailySummary {
    let mut summary = DailySummary {
        date: window.date(),
        sleep_minutes: 0,
        awake_minutes: MINUTES_PER_DAY,
        feed_count: 0,
        feed_total: 0.0,
        pee_count: 0,
        poop_count: 0,
        unknown_diaper_count: 0,
    };
    let mut sleep_minutes: i64 = 0;

    let day_events = events
        .iter()
        .filter(|event| &event.subject == subject && window.is_same_date(event.start));
    for event in day_events {
        match event.kind {
            EventKind::Feed { magnitude } => {
                summary.feed_count += 1;
                summary.feed_total += magnitude.unwrap_or(0.0);
            }
            EventKind::Sleep { end } => {
                let open_end = if window.contains(now) { now } else { window.end() };
                let end = end.unwrap_or(open_end).max(event.start);
                sleep_minutes += (end - event.start).num_minutes();
            }
            EventKind::Diaper { detail } => {
                if detail.has_pee() {
                    summary.pee_count += 1;
                }
                if detail.has_poop() {
                    summary.poop_count += 1;
                }
                if !detail.has_pee() && !detail.has_poop() {
                    summary.unknown_diaper_count += 1;
                }
            }
        }
    }

    let capped = u32::try_from(sleep_minutes.clamp(0, i64::from(MINUTES_PER_DAY))).unwrap_or(MINUTES_PER_DAY);
    summary.sleep_minutes = capped;
    summary.awake_minutes = MINUTES_PER_DAY - capped;
    summary
}

/// Total recorded feed volume on the window's date.
pub fn feed_total<Tz: TimeZone>(events: &[Event], subject: &SubjectId, window: &DayWindow<Tz>) -> f64 {
    events
        .iter()
        .filter(|event| &event.subject == subject && window.is_same_date(event.start))
        .filter_map(Event::magnitude)
        .sum()
}
