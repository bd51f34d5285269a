//! Day and week composition of the layout passes.
//!
//! The selected day of a week is drawn wide (normalize, pack, place labels)
//! and carries ghosts; the other six days are drawn narrow (normalize, assign
//! lanes). Everything here is a pure function of its arguments.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::config::{LayoutConfig, TimelineConfig};
use crate::event::Event;
use crate::ghost::{Ghost, generate_ghosts};
use crate::item::LayoutItem;
use crate::label::place_labels;
use crate::lanes::assign_lanes;
use crate::normalize::normalize_all;
use crate::pack::pack_columns;
use crate::summary::feed_total;
use crate::types::SubjectId;
use crate::window::{DayWindow, MINUTES_PER_DAY};

/// How a day column is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMode {
    /// The selected day: packed columns and placed labels.
    Wide,
    /// Compressed day: dots with lane offsets.
    Narrow,
}

/// One rendered day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub mode: ColumnMode,
    pub items: Vec<LayoutItem>,
    pub ghosts: Vec<Ghost>,
    /// Recorded feed volume on this date.
    pub feed_total: f64,
    /// Position of the current-time marker, when `now` is on this day.
    pub now_minute: Option<u32>,
}

/// A Monday-based week of columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub selected: NaiveDate,
    pub columns: Vec<DayColumn>,
}

/// Wide layout of `subject`'s events on `window`.
///
/// Sleep spans come first (by start), followed by foreground items in packing
/// order.
pub fn layout_day<Tz: TimeZone>(
    events: &[Event],
    subject: &SubjectId,
    window: &DayWindow<Tz>,
    config: &LayoutConfig,
    now: DateTime<Utc>,
) -> Vec<LayoutItem> {
    let items = normalize_all(
        events.iter().filter(|event| &event.subject == subject),
        window,
        config,
        now,
    );
    let (mut background, mut foreground): (Vec<_>, Vec<_>) =
        items.into_iter().partition(LayoutItem::is_background);

    background.sort_by(by_start);
    let clusters = pack_columns(&mut foreground, config.pack_tolerance_ratio);
    place_labels(&mut background, &foreground, config.label_exclusion_radius);

    tracing::debug!(
        date = %window.date(),
        spans = background.len(),
        items = foreground.len(),
        clusters = clusters.len(),
        "laid out wide column"
    );
    background.extend(foreground);
    background
}

/// Narrow layout of `subject`'s events on `window`: full-width geometry with
/// lane offsets for the dots.
pub fn layout_narrow<Tz: TimeZone>(
    events: &[Event],
    subject: &SubjectId,
    window: &DayWindow<Tz>,
    config: &LayoutConfig,
    now: DateTime<Utc>,
) -> Vec<LayoutItem> {
    let mut items = normalize_all(
        events.iter().filter(|event| &event.subject == subject),
        window,
        config,
        now,
    );
    items.sort_by(|a, b| b.is_background().cmp(&a.is_background()).then_with(|| by_start(a, b)));
    assign_lanes(&mut items, config.lane_proximity_minutes);

    tracing::debug!(date = %window.date(), items = items.len(), "laid out narrow column");
    items
}

/// Lays out one column in the requested mode. Ghosts are only computed for
/// wide columns.
pub fn layout_column<Tz: TimeZone>(
    events: &[Event],
    subject: &SubjectId,
    window: &DayWindow<Tz>,
    mode: ColumnMode,
    config: &TimelineConfig,
    now: DateTime<Utc>,
) -> DayColumn {
    let (items, ghosts) = match mode {
        ColumnMode::Wide => (
            layout_day(events, subject, window, &config.layout, now),
            generate_ghosts(events, subject, window, &config.ghost, now),
        ),
        ColumnMode::Narrow => (
            layout_narrow(events, subject, window, &config.layout, now),
            Vec::new(),
        ),
    };
    let now_minute = window.contains(now).then(|| {
        u32::try_from(window.minutes_from_start(now))
            .unwrap_or(0)
            .min(MINUTES_PER_DAY - 1)
    });

    DayColumn {
        date: window.date(),
        mode,
        items,
        ghosts,
        feed_total: feed_total(events, subject, window),
        now_minute,
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_monday = date.weekday().num_days_from_monday();
    date - Duration::days(i64::from(days_since_monday))
}

/// Seven columns for the week containing `selected`, with `selected` wide.
pub fn layout_week<Tz: TimeZone>(
    events: &[Event],
    subject: &SubjectId,
    selected: NaiveDate,
    tz: &Tz,
    config: &TimelineConfig,
    now: DateTime<Utc>,
) -> WeekView {
    let monday = week_start(selected);
    let columns = (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let mode = if date == selected {
                ColumnMode::Wide
            } else {
                ColumnMode::Narrow
            };
            layout_column(events, subject, &DayWindow::for_date(date, tz), mode, config, now)
        })
        .collect();

    WeekView {
        week_start: monday,
        selected,
        columns,
    }
}

fn by_start(a: &LayoutItem, b: &LayoutItem) -> Ordering {
    a.start_minute
        .cmp(&b.start_minute)
        .then_with(|| a.event_id.cmp(&b.event_id))
}
