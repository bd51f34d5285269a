//! Lane assignment for compressed (narrow) day columns.

use std::cmp::Ordering;

use crate::item::LayoutItem;

/// Assigns a horizontal lane to every point item so that dots closer than
/// `proximity` minutes never share a lane.
///
/// Greedy interval colouring with a fixed radius: items are visited by start
/// minute and each takes the lowest lane that is free around it. Background
/// items keep lane 0. Item order in `items` is left untouched.
pub fn assign_lanes(items: &mut [LayoutItem], proximity: u32) {
    let mut order: Vec<usize> = (0..items.len())
        .filter(|&index| !items[index].is_background())
        .collect();
    order.sort_by(|&a, &b| by_start(&items[a], &items[b]));

    let mut placed: Vec<(u32, u32)> = Vec::with_capacity(order.len());
    for index in order {
        let minute = items[index].start_minute;
        let collides = |lane: u32| {
            placed
                .iter()
                .any(|&(other, other_lane)| other_lane == lane && other.abs_diff(minute) < proximity)
        };

        let mut lane = 0;
        while collides(lane) {
            lane += 1;
        }
        placed.push((minute, lane));
        items[index].lane = lane;
    }

    for item in items.iter_mut().filter(|item| item.is_background()) {
        item.lane = 0;
    }
}

fn by_start(a: &LayoutItem, b: &LayoutItem) -> Ordering {
    a.start_minute
        .cmp(&b.start_minute)
        .then_with(|| a.event_id.cmp(&b.event_id))
}
