//! Layout output types.

use serde::Serialize;

use crate::activity::ActivityKind;
use crate::event::{DiaperDetail, Event, EventKind};
use crate::types::EventId;

/// Semantic tag a renderer needs to draw an item, without any styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemTag {
    Feed { magnitude: Option<f64> },
    Sleep { ongoing: bool },
    Diaper { detail: DiaperDetail },
}

impl ItemTag {
    pub(crate) const fn of(event: &Event) -> Self {
        match event.kind {
            EventKind::Feed { magnitude } => Self::Feed { magnitude },
            EventKind::Sleep { end } => Self::Sleep {
                ongoing: end.is_none(),
            },
            EventKind::Diaper { detail } => Self::Diaper { detail },
        }
    }

    /// The payload-free kind.
    #[must_use]
    pub const fn activity(&self) -> ActivityKind {
        match self {
            Self::Feed { .. } => ActivityKind::Feed,
            Self::Sleep { .. } => ActivityKind::Sleep,
            Self::Diaper { .. } => ActivityKind::Diaper,
        }
    }
}

/// Geometry for one event in one day column.
///
/// Recomputed on every call; each item corresponds to exactly one input event.
/// Minutes are on the column's `[0, 1440]` axis; fractions and offsets are
/// percentages of the column width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutItem {
    pub event_id: EventId,
    pub tag: ItemTag,
    pub start_minute: u32,
    /// End of the packing footprint, floored to the minimum span.
    pub end_minute: u32,
    /// True clipped duration without the minimum-span floor. Zero for point
    /// events. This is the value to show to a person.
    pub visible_minutes: u32,
    pub column_fraction: f64,
    pub column_offset: f64,
    /// Vertical label position within the item's own span, in percent.
    pub label_anchor_percent: f64,
    /// Horizontal jitter slot in narrow mode; 0 in wide mode.
    pub lane: u32,
}

impl LayoutItem {
    /// Footprint length used for packing.
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Sleep spans are drawn behind everything else.
    #[must_use]
    pub const fn is_background(&self) -> bool {
        matches!(self.tag, ItemTag::Sleep { .. })
    }
}
