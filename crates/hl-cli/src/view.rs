//! Resolving command-line view arguments into the inputs of a layout call.

use std::collections::BTreeSet;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use hl_core::{DayWindow, Event, SubjectId, TimelineConfig};

use crate::cli::ViewArgs;
use crate::commands::util::{parse_date, parse_datetime};
use crate::config::Config;
use crate::input::load_events;

/// Everything a view command needs, resolved once.
#[derive(Debug, Clone)]
pub struct ViewContext<Tz: TimeZone> {
    pub events: Vec<Event>,
    pub subject: SubjectId,
    pub date: NaiveDate,
    pub now: DateTime<Utc>,
    pub tz: Tz,
    /// Display name of `tz`.
    pub zone_name: String,
    pub timeline: TimelineConfig,
}

impl<Tz: TimeZone> ViewContext<Tz> {
    /// Loads the event file and resolves subject, date and reference time.
    pub fn resolve(args: &ViewArgs, config: &Config, tz: Tz, zone_name: String) -> Result<Self> {
        let events = load_events(&args.events)?;
        let now = match args.now.as_deref() {
            Some(value) => parse_datetime(value, Utc::now())?,
            None => Utc::now(),
        };
        let date = match args.date.as_deref() {
            Some(value) => parse_date(value)?,
            None => now.with_timezone(&tz).date_naive(),
        };
        let subject = resolve_subject(
            args.subject.as_deref().or(config.default_subject.as_deref()),
            &events,
        )?;

        tracing::debug!(
            events = events.len(),
            subject = %subject,
            %date,
            %now,
            zone = %zone_name,
            "resolved view"
        );

        Ok(Self {
            events,
            subject,
            date,
            now,
            tz,
            zone_name,
            timeline: config.timeline.clone(),
        })
    }

    /// The day window of the selected date.
    pub fn window(&self) -> DayWindow<Tz> {
        DayWindow::for_date(self.date, &self.tz)
    }
}

/// Picks the subject to show: the requested one, or the only subject in the
/// log.
pub fn resolve_subject(requested: Option<&str>, events: &[Event]) -> Result<SubjectId> {
    if let Some(requested) = requested {
        return SubjectId::new(requested).context("invalid subject");
    }

    let subjects: BTreeSet<&SubjectId> = events.iter().map(|event| &event.subject).collect();
    let mut iter = subjects.iter();
    match (iter.next(), iter.next()) {
        (Some(only), None) => Ok((*only).clone()),
        (None, _) => bail!("no events found; pass --subject to choose a subject"),
        (Some(_), Some(_)) => {
            let names: Vec<&str> = subjects.iter().map(|s| s.as_str()).collect();
            bail!(
                "multiple subjects in event file ({}); pass --subject or set default_subject",
                names.join(", ")
            )
        }
    }
}
