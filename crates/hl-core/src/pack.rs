//! Interval clustering and column packing for foreground items.
//!
//! # Algorithm Summary
//!
//! 1. Sort by start ascending, then duration descending, then event ID
//! 2. Split into clusters: maximal runs whose members transitively overlap
//! 3. Per cluster, first-fit items into columns, allowing a soft overlap of
//!    `duration * tolerance_ratio` with a column's previous occupant
//! 4. Width is `100 / columns` for the cluster; offset is `width * column`

use std::cmp::Ordering;
use std::ops::Range;

use crate::item::LayoutItem;

/// One connected-overlap group after packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Indices of the members in the packed item list.
    pub members: Range<usize>,
    /// Number of columns the cluster needed.
    pub columns: usize,
}

/// Total order used before clustering and packing.
///
/// Longer items win ties for the leftmost columns; the event ID makes the
/// result independent of the caller's ordering.
pub fn packing_order(a: &LayoutItem, b: &LayoutItem) -> Ordering {
    a.start_minute
        .cmp(&b.start_minute)
        .then_with(|| b.duration().cmp(&a.duration()))
        .then_with(|| a.event_id.cmp(&b.event_id))
}

/// Splits items already sorted by start into maximal overlap groups.
///
/// An item joins the current cluster if it starts before the latest end seen
/// in that cluster, so membership is transitive rather than pairwise.
pub fn find_clusters(sorted: &[LayoutItem]) -> Vec<Range<usize>> {
    let mut clusters = Vec::new();
    let mut begin = 0;
    let mut running_end = 0;

    for (index, item) in sorted.iter().enumerate() {
        if index > begin && item.start_minute >= running_end {
            clusters.push(begin..index);
            begin = index;
            running_end = item.end_minute;
        } else {
            running_end = running_end.max(item.end_minute);
        }
    }
    if begin < sorted.len() {
        clusters.push(begin..sorted.len());
    }
    clusters
}

/// Sorts `items` into packing order and assigns column width and offset.
pub fn pack_columns(items: &mut [LayoutItem], tolerance_ratio: f64) -> Vec<Cluster> {
    items.sort_by(packing_order);

    find_clusters(items)
        .into_iter()
        .map(|members| {
            let columns = pack_cluster(&mut items[members.clone()], tolerance_ratio);
            tracing::trace!(?members, columns, "packed cluster");
            Cluster { members, columns }
        })
        .collect()
}

/// First-fit column assignment for one cluster. Returns the column count.
#[allow(clippy::cast_precision_loss)]
fn pack_cluster(cluster: &mut [LayoutItem], tolerance_ratio: f64) -> usize {
    let mut column_ends: Vec<u32> = Vec::new();
    let mut assigned = Vec::with_capacity(cluster.len());

    for item in cluster.iter() {
        let tolerance = f64::from(item.duration()) * tolerance_ratio;
        let fits = |end: &u32| f64::from(end.saturating_sub(item.start_minute)) <= tolerance;

        let column = if let Some(column) = column_ends.iter().position(fits) {
            column_ends[column] = column_ends[column].max(item.end_minute);
            column
        } else {
            column_ends.push(item.end_minute);
            column_ends.len() - 1
        };
        assigned.push(column);
    }

    let columns = column_ends.len().max(1);
    let fraction = 100.0 / columns as f64;
    for (item, column) in cluster.iter_mut().zip(assigned) {
        item.column_fraction = fraction;
        item.column_offset = fraction * column as f64;
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemTag;
    use crate::types::EventId;

    const EPSILON: f64 = 1e-9;

    fn item(id: &str, start: u32, end: u32) -> LayoutItem {
        LayoutItem {
            event_id: EventId::new(id).unwrap(),
            tag: ItemTag::Feed { magnitude: None },
            start_minute: start,
            end_minute: end,
            visible_minutes: 0,
            column_fraction: 100.0,
            column_offset: 0.0,
            label_anchor_percent: 50.0,
            lane: 0,
        }
    }

    fn geometry(items: &[LayoutItem]) -> Vec<(&str, f64, f64)> {
        items
            .iter()
            .map(|i| (i.event_id.as_str(), i.column_fraction, i.column_offset))
            .collect()
    }

    #[test]
    fn three_close_feeds_share_two_columns() {
        // 08:00, 08:10, 08:20 with a 15-minute footprint each
        let mut items = vec![item("a", 480, 495), item("b", 490, 505), item("c", 500, 515)];
        let clusters = pack_columns(&mut items, 0.25);

        assert_eq!(clusters, vec![Cluster { members: 0..3, columns: 2 }]);
        assert_eq!(
            geometry(&items),
            vec![("a", 50.0, 0.0), ("b", 50.0, 50.0), ("c", 50.0, 0.0)]
        );
    }

    #[test]
    fn lone_item_gets_full_width() {
        let mut items = vec![item("a", 100, 115), item("b", 300, 315)];
        let clusters = pack_columns(&mut items, 0.25);
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|c| c.columns == 1));
        assert_eq!(geometry(&items), vec![("a", 100.0, 0.0), ("b", 100.0, 0.0)]);
    }

    #[test]
    fn touching_items_are_separate_clusters() {
        let mut items = vec![item("a", 100, 115), item("b", 115, 130)];
        let clusters = pack_columns(&mut items, 0.25);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn clusters_are_transitive() {
        // b overlaps only a, c overlaps only the long a
        let sorted = vec![item("a", 0, 100), item("b", 10, 25), item("c", 90, 105), item("d", 105, 120)];
        assert_eq!(find_clusters(&sorted), vec![0..3, 3..4]);
    }

    #[test]
    fn tolerance_allows_small_overlap() {
        // b overlaps a by 10 minutes; 10 <= 60 * 0.25
        let mut items = vec![item("a", 0, 40), item("b", 30, 90)];
        let clusters = pack_columns(&mut items, 0.25);
        assert_eq!(clusters[0].columns, 1);

        let mut strict = vec![item("a", 0, 40), item("b", 30, 90)];
        let clusters = pack_columns(&mut strict, 0.0);
        assert_eq!(clusters[0].columns, 2);
    }

    #[test]
    fn longer_items_take_leftmost_column_on_ties() {
        let mut items = vec![item("short", 60, 75), item("long", 60, 180)];
        pack_columns(&mut items, 0.25);
        assert_eq!(items[0].event_id.as_str(), "long");
        assert!(items[0].column_offset.abs() < EPSILON);
        assert!((items[1].column_offset - 50.0).abs() < EPSILON);
    }

    #[test]
    fn output_is_independent_of_input_order() {
        let forward = vec![
            item("a", 480, 495),
            item("b", 480, 495),
            item("c", 485, 500),
            item("d", 600, 615),
        ];
        let mut reversed: Vec<_> = forward.iter().rev().cloned().collect();
        let mut forward = forward;

        pack_columns(&mut forward, 0.25);
        pack_columns(&mut reversed, 0.25);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn widths_sum_to_one_hundred_per_cluster() {
        let mut items = vec![
            item("a", 0, 120),
            item("b", 10, 25),
            item("c", 20, 35),
            item("d", 30, 45),
            item("e", 200, 215),
        ];
        let clusters = pack_columns(&mut items, 0.25);

        for cluster in &clusters {
            let mut offsets: Vec<f64> = items[cluster.members.clone()]
                .iter()
                .map(|i| i.column_offset)
                .collect();
            offsets.sort_by(f64::total_cmp);
            offsets.dedup_by(|a, b| (*a - *b).abs() < EPSILON);
            let fraction = items[cluster.members.start].column_fraction;
            let total = fraction * offsets.len() as f64;
            assert!((total - 100.0).abs() < EPSILON, "cluster {cluster:?} sums to {total}");
            assert_eq!(offsets.len(), cluster.columns);
        }
    }

    #[test]
    fn items_sharing_a_column_overlap_within_tolerance() {
        let mut items = vec![
            item("a", 0, 60),
            item("b", 5, 20),
            item("c", 50, 110),
            item("d", 55, 70),
            item("e", 65, 80),
        ];
        pack_columns(&mut items, 0.25);

        for (i, first) in items.iter().enumerate() {
            for second in &items[i + 1..] {
                if (first.column_offset - second.column_offset).abs() > EPSILON {
                    continue;
                }
                let overlap = first.end_minute.min(second.end_minute)
                    .saturating_sub(first.start_minute.max(second.start_minute));
                let allowed = f64::from(second.duration()) * 0.25;
                assert!(
                    f64::from(overlap) <= allowed,
                    "{} and {} overlap by {overlap}",
                    first.event_id,
                    second.event_id
                );
            }
        }
    }

    #[test]
    fn empty_input_has_no_clusters() {
        let mut items: Vec<LayoutItem> = Vec::new();
        assert!(pack_columns(&mut items, 0.25).is_empty());
    }
}
