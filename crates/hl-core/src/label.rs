//! Label placement inside background (sleep) spans.
//!
//! Foreground dots drawn over a sleep span would hide its label. Each dot
//! blocks `radius` minutes above and below its start; the label goes to the
//! centre of the largest remaining free gap. Single linear sweep, no
//! backtracking.

use crate::item::LayoutItem;

/// Label position used when nothing needs avoiding.
pub const DEFAULT_ANCHOR_PERCENT: f64 = 50.0;

/// A free stretch of a span, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start: u32,
    pub end: u32,
}

impl Gap {
    pub const fn size(&self) -> u32 {
        self.end - self.start
    }

    fn center(&self) -> f64 {
        f64::from(self.start) + f64::from(self.size()) / 2.0
    }
}

/// Free gaps of `[span_start, span_end]` after blocking `start ± radius` for
/// every entry of `blocker_starts`, which must be sorted ascending.
pub fn free_gaps(span_start: u32, span_end: u32, blocker_starts: &[u32], radius: u32) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut cursor = span_start;

    for &start in blocker_starts {
        let top = start.saturating_sub(radius).max(span_start);
        if top > cursor {
            gaps.push(Gap { start: cursor, end: top });
        }
        cursor = cursor.max(start.saturating_add(radius).min(span_end));
    }
    if cursor < span_end {
        gaps.push(Gap {
            start: cursor,
            end: span_end,
        });
    }
    gaps
}

/// The largest gap; the first one found wins ties.
pub fn largest_gap(gaps: &[Gap]) -> Option<Gap> {
    gaps.iter().fold(None, |best: Option<Gap>, gap| match best {
        Some(current) if current.size() >= gap.size() => Some(current),
        _ => Some(*gap),
    })
}

/// Computes where to anchor `span`'s label, avoiding `foreground` items that
/// start inside it.
pub fn anchor_percent(span: &LayoutItem, foreground: &[LayoutItem], radius: u32) -> f64 {
    let height = span.end_minute.saturating_sub(span.start_minute);
    if height == 0 {
        return DEFAULT_ANCHOR_PERCENT;
    }

    let mut inside: Vec<u32> = foreground
        .iter()
        .map(|item| item.start_minute)
        .filter(|start| (span.start_minute..=span.end_minute).contains(start))
        .collect();
    if inside.is_empty() {
        return DEFAULT_ANCHOR_PERCENT;
    }
    inside.sort_unstable();

    let gaps = free_gaps(span.start_minute, span.end_minute, &inside, radius);
    largest_gap(&gaps).map_or(DEFAULT_ANCHOR_PERCENT, |gap| {
        (gap.center() - f64::from(span.start_minute)) / f64::from(height) * 100.0
    })
}

/// Sets `label_anchor_percent` on every span in `spans`.
pub fn place_labels(spans: &mut [LayoutItem], foreground: &[LayoutItem], radius: u32) {
    for span in spans.iter_mut() {
        span.label_anchor_percent = anchor_percent(span, foreground, radius);
        tracing::trace!(event_id = %span.event_id, anchor = span.label_anchor_percent, "placed label");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemTag;
    use crate::types::EventId;

    const EPSILON: f64 = 1e-9;

    fn item(id: &str, tag: ItemTag, start: u32, end: u32) -> LayoutItem {
        LayoutItem {
            event_id: EventId::new(id).unwrap(),
            tag,
            start_minute: start,
            end_minute: end,
            visible_minutes: end - start,
            column_fraction: 100.0,
            column_offset: 0.0,
            label_anchor_percent: DEFAULT_ANCHOR_PERCENT,
            lane: 0,
        }
    }

    fn span(start: u32, end: u32) -> LayoutItem {
        item("sleep", ItemTag::Sleep { ongoing: false }, start, end)
    }

    fn dot(id: &str, start: u32) -> LayoutItem {
        item(id, ItemTag::Feed { magnitude: None }, start, start + 15)
    }

    #[test]
    fn no_overlap_centers_label() {
        let anchor = anchor_percent(&span(0, 600), &[dot("f", 700)], 24);
        assert!((anchor - 50.0).abs() < EPSILON);
    }

    #[test]
    fn label_moves_away_from_single_dot() {
        // Dot at 100 blocks [76, 124]; gaps [0,76] and [124,400]
        let anchor = anchor_percent(&span(0, 400), &[dot("f", 100)], 24);
        let expected = (124.0 + 276.0 / 2.0) / 400.0 * 100.0;
        assert!((anchor - expected).abs() < EPSILON, "got {anchor}");
    }

    #[test]
    fn gaps_are_clamped_to_span() {
        let gaps = free_gaps(100, 300, &[110, 290], 24);
        assert_eq!(
            gaps,
            vec![Gap { start: 134, end: 266 }]
        );
    }

    #[test]
    fn dots_at_span_edges_count() {
        let gaps = free_gaps(100, 300, &[100, 300], 24);
        assert_eq!(gaps, vec![Gap { start: 124, end: 276 }]);
    }

    #[test]
    fn overlapping_blocks_merge() {
        let gaps = free_gaps(0, 200, &[50, 60, 70], 24);
        assert_eq!(gaps, vec![Gap { start: 0, end: 26 }, Gap { start: 94, end: 200 }]);
    }

    #[test]
    fn first_gap_wins_ties() {
        let gaps = [Gap { start: 0, end: 10 }, Gap { start: 20, end: 30 }];
        assert_eq!(largest_gap(&gaps), Some(Gap { start: 0, end: 10 }));
        assert_eq!(largest_gap(&[]), None);
    }

    #[test]
    fn fully_blocked_span_defaults_to_center() {
        let anchor = anchor_percent(&span(100, 130), &[dot("f", 115)], 24);
        assert!((anchor - 50.0).abs() < EPSILON);
    }

    #[test]
    fn zero_height_span_defaults_to_center() {
        let anchor = anchor_percent(&span(1440, 1440), &[dot("f", 1440)], 24);
        assert!((anchor - 50.0).abs() < EPSILON);
    }

    #[test]
    fn placement_is_deterministic_regardless_of_foreground_order() {
        let forward = [dot("a", 60), dot("b", 200), dot("c", 330)];
        let backward = [dot("c", 330), dot("b", 200), dot("a", 60)];
        let first = anchor_percent(&span(0, 480), &forward, 24);
        let second = anchor_percent(&span(0, 480), &backward, 24);
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(first.to_bits(), anchor_percent(&span(0, 480), &forward, 24).to_bits());
    }

    #[test]
    fn place_labels_updates_every_span() {
        let mut spans = [span(0, 400), span(600, 700)];
        place_labels(&mut spans, &[dot("f", 100)], 24);
        assert!(spans[0].label_anchor_percent > 50.0);
        assert!((spans[1].label_anchor_percent - 50.0).abs() < EPSILON);
    }
}
