//! Logged caregiver events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityKind;
use crate::types::{EventId, SubjectId};

/// A single logged activity for one subject.
///
/// Events are read-only input to the layout engine. The persistence layer
/// owns them; nothing in this crate mutates or writes them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event.
    pub id: EventId,
    /// The subject (profile) the event was logged for.
    #[serde(alias = "babyId", alias = "subject_id")]
    pub subject: SubjectId,
    /// When the activity started.
    #[serde(alias = "startTime")]
    pub start: DateTime<Utc>,
    /// What happened, with the fields meaningful for that kind.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Kind-specific payload of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A feed. `magnitude` is the volume when one was recorded.
    #[serde(alias = "milk")]
    Feed {
        #[serde(default, alias = "amount", skip_serializing_if = "Option::is_none")]
        magnitude: Option<f64>,
    },
    /// A sleep interval. `end = None` means the subject is still asleep.
    Sleep {
        #[serde(default, alias = "endTime", skip_serializing_if = "Option::is_none")]
        end: Option<DateTime<Utc>>,
    },
    /// A diaper change.
    Diaper {
        #[serde(default, alias = "note")]
        detail: DiaperDetail,
    },
}

/// What a diaper change contained.
///
/// Deserialization never fails: missing, unknown or malformed payloads become
/// [`DiaperDetail::Unknown`] so one bad record cannot sink a whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaperDetail {
    Pee,
    Poop,
    Both,
    #[default]
    Unknown,
}

impl DiaperDetail {
    /// Parses a plain tag (`"pee"`) or a legacy note payload
    /// (`{"type":"pee"}` stored as a string).
    #[must_use]
    pub fn from_note(note: &str) -> Self {
        let trimmed = note.trim();
        if let Some(detail) = Self::from_tag(trimmed) {
            return detail;
        }
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(value) => Self::from_value(&value),
            Err(err) => {
                tracing::trace!(error = %err, "unparseable diaper note");
                Self::Unknown
            }
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "pee" => Some(Self::Pee),
            "poop" => Some(Self::Poop),
            "both" => Some(Self::Both),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::from_note(s),
            serde_json::Value::Object(map) => map
                .get("type")
                .and_then(serde_json::Value::as_str)
                .and_then(Self::from_tag)
                .unwrap_or_default(),
            _ => Self::Unknown,
        }
    }

    /// Whether the change counts as a pee.
    #[must_use]
    pub const fn has_pee(self) -> bool {
        matches!(self, Self::Pee | Self::Both)
    }

    /// Whether the change counts as a poop.
    #[must_use]
    pub const fn has_poop(self) -> bool {
        matches!(self, Self::Poop | Self::Both)
    }
}

impl<'de> Deserialize<'de> for DiaperDetail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        // Lenient with external data
        Ok(Self::from_value(&value))
    }
}

impl Event {
    /// Creates an event from already-validated parts.
    #[must_use]
    pub const fn new(id: EventId, subject: SubjectId, start: DateTime<Utc>, kind: EventKind) -> Self {
        Self {
            id,
            subject,
            start,
            kind,
        }
    }

    /// The payload-free kind tag.
    #[must_use]
    pub const fn activity(&self) -> ActivityKind {
        match self.kind {
            EventKind::Feed { .. } => ActivityKind::Feed,
            EventKind::Sleep { .. } => ActivityKind::Sleep,
            EventKind::Diaper { .. } => ActivityKind::Diaper,
        }
    }

    /// Feed volume, if this is a feed that recorded one.
    #[must_use]
    pub const fn magnitude(&self) -> Option<f64> {
        match self.kind {
            EventKind::Feed { magnitude } => magnitude,
            _ => None,
        }
    }

    /// True for a sleep with no recorded end.
    #[must_use]
    pub const fn is_ongoing(&self) -> bool {
        matches!(self.kind, EventKind::Sleep { end: None })
    }

    /// True for a sleep whose recorded end precedes its start.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, EventKind::Sleep { end: Some(end) } if end < self.start)
    }

    /// Where the event's occupied time ends.
    ///
    /// Ongoing sleeps extend to `now`. Ends earlier than the start are clamped
    /// to the start, so a malformed interval behaves as zero length. Point
    /// events end where they start.
    #[must_use]
    pub fn effective_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.kind {
            EventKind::Sleep { end } => end.unwrap_or(now).max(self.start),
            EventKind::Feed { .. } | EventKind::Diaper { .. } => self.start,
        }
    }
}
