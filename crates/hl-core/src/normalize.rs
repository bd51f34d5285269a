//! Day window normalizer: decides which events belong to a column and maps
//! them onto its minute axis.

use chrono::{DateTime, TimeZone, Utc};

use crate::config::LayoutConfig;
use crate::event::{Event, EventKind};
use crate::item::{ItemTag, LayoutItem};
use crate::window::{DayWindow, MINUTES_PER_DAY};

/// Whether `event` is drawn in `window`.
///
/// Sleeps use a strict half-open overlap test so a sleep ending exactly at
/// midnight is not repeated on the next day. Point events are bucketed by
/// local calendar date.
pub fn is_included<Tz: TimeZone>(event: &Event, window: &DayWindow<Tz>, now: DateTime<Utc>) -> bool {
    match event.kind {
        EventKind::Sleep { .. } => {
            event.start < window.end() && event.effective_end(now) > window.start()
        }
        EventKind::Feed { .. } | EventKind::Diaper { .. } => window.is_same_date(event.start),
    }
}

/// Clips `event` to `window` and produces an unpacked, full-width item.
///
/// Returns `None` when the event is not included. The window is always 24
/// hours, so on a 25-hour local day a point event in the extra hour is drawn
/// at minute 1439 rather than off the end of the column.
pub fn normalize<Tz: TimeZone>(
    event: &Event,
    window: &DayWindow<Tz>,
    config: &LayoutConfig,
    now: DateTime<Utc>,
) -> Option<LayoutItem> {
    if !is_included(event, window, now) {
        return None;
    }
    if event.is_malformed() {
        tracing::debug!(event_id = %event.id, "sleep ends before it starts, treating as zero length");
    }

    let day = i64::from(MINUTES_PER_DAY);
    // A 25-hour local day (DST fall-back) puts its last hour past the axis;
    // those point events are pinned to the final minute.
    let start = window.minutes_from_start(event.start).clamp(0, day - 1);
    let clipped_end = if event.activity().is_interval() {
        window
            .minutes_from_start(event.effective_end(now))
            .min(day)
            .max(start)
    } else {
        start
    };
    let floored_end = clipped_end
        .max(start + i64::from(config.min_span_minutes))
        .min(day);

    Some(LayoutItem {
        event_id: event.id.clone(),
        tag: ItemTag::of(event),
        start_minute: to_minute(start),
        end_minute: to_minute(floored_end),
        visible_minutes: to_minute(clipped_end - start),
        column_fraction: 100.0,
        column_offset: 0.0,
        label_anchor_percent: 50.0,
        lane: 0,
    })
}

/// Normalizes every event of `events` that belongs to `window`, in input order.
pub fn normalize_all<'a, Tz: TimeZone>(
    events: impl IntoIterator<Item = &'a Event>,
    window: &DayWindow<Tz>,
    config: &LayoutConfig,
    now: DateTime<Utc>,
) -> Vec<LayoutItem> {
    events
        .into_iter()
        .filter_map(|event| normalize(event, window, config, now))
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn to_minute(value: i64) -> u32 {
    // Callers clamp to [0, 1440]
    value as u32
}
