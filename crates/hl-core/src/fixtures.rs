//! Shared builders for unit tests. All instants are in March 2025, UTC.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::event::{DiaperDetail, Event, EventKind};
use crate::types::{EventId, SubjectId};

pub const SUBJECT: &str = "baby";

pub fn subject() -> SubjectId {
    SubjectId::new(SUBJECT).unwrap()
}

pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, minute, 0).unwrap()
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

fn event(id: &str, start: DateTime<Utc>, kind: EventKind) -> Event {
    Event::new(EventId::new(id).unwrap(), subject(), start, kind)
}

pub fn feed(id: &str, start: DateTime<Utc>, magnitude: Option<f64>) -> Event {
    event(id, start, EventKind::Feed { magnitude })
}

pub fn sleep(id: &str, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Event {
    event(id, start, EventKind::Sleep { end })
}

pub fn diaper(id: &str, start: DateTime<Utc>, detail: DiaperDetail) -> Event {
    event(id, start, EventKind::Diaper { detail })
}

pub fn for_subject(mut event: Event, subject: &str) -> Event {
    event.subject = SubjectId::new(subject).unwrap();
    event
}
