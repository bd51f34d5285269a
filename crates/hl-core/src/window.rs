//! Day windows: the 24-hour column a layout is computed for.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Minutes on a day column's axis.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A half-open `[start, end)` range of exactly 24 hours beginning at local
/// midnight of `date`.
///
/// The time zone is kept so point events can be bucketed by their local
/// calendar date rather than by instant.
#[derive(Debug, Clone)]
pub struct DayWindow<Tz: TimeZone> {
    date: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: Tz,
}

impl<Tz: TimeZone> DayWindow<Tz> {
    /// Builds the window for `date` in `tz`.
    pub fn for_date(date: NaiveDate, tz: &Tz) -> Self {
        let start = local_midnight_to_utc(date, tz);
        Self {
            date,
            start,
            end: start + Duration::hours(24),
            tz: tz.clone(),
        }
    }

    /// Builds the window of the local day containing `instant`.
    pub fn containing(instant: DateTime<Utc>, tz: &Tz) -> Self {
        Self::for_date(instant.with_timezone(tz).date_naive(), tz)
    }

    /// The local calendar date this window represents.
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// First instant inside the window.
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// First instant after the window.
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The time zone the window was built in.
    pub const fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Whether `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Whether `instant` falls on this window's local calendar date.
    pub fn is_same_date(&self, instant: DateTime<Utc>) -> bool {
        instant.with_timezone(&self.tz).date_naive() == self.date
    }

    /// Whole minutes from the window start to `instant`, truncated toward
    /// zero. Negative before the window.
    pub fn minutes_from_start(&self, instant: DateTime<Utc>) -> i64 {
        (instant - self.start).num_minutes()
    }

    /// The window for the previous calendar date.
    pub fn previous(&self) -> Option<Self> {
        self.date.pred_opt().map(|date| Self::for_date(date, &self.tz))
    }

    /// The window for the next calendar date.
    pub fn next(&self) -> Option<Self> {
        self.date.succ_opt().map(|date| Self::for_date(date, &self.tz))
    }
}

/// Converts a local date at midnight to UTC.
/// Handles DST ambiguity by picking the earlier time.
fn local_midnight_to_utc<Tz: TimeZone>(local_date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = local_date.and_time(NaiveTime::MIN);
    if let Some(dt) = tz.from_local_datetime(&midnight).earliest() {
        return dt.with_timezone(&Utc);
    }
    // DST spring-forward gap at midnight is rare but possible; 1am exists
    let one_am = midnight + Duration::hours(1);
    tz.from_local_datetime(&one_am).earliest().map_or_else(
        || tz.from_utc_datetime(&midnight).with_timezone(&Utc),
        |dt| dt.with_timezone(&Utc),
    )
}
