//! Weighted room-type assignment.

use log::debug;

use crate::config::{RoomTypeConfig, keys};
use crate::rng::DungeonRng;

/// One type name per room, in room index order. An empty table, or one whose
/// weights are all zero, types every room as [`keys::ROOM_NORMAL`].
pub fn assign_room_types(
    room_count: usize,
    table: &[RoomTypeConfig],
    rng: &mut DungeonRng,
) -> Vec<String> {
    let total_weight: f64 = table.iter().map(|room_type| room_type.weight).sum();
    if table.is_empty() || total_weight <= 0.0 {
        return vec![keys::ROOM_NORMAL.to_string(); room_count];
    }

    (0..room_count)
        .map(|room_index| {
            let name = pick_weighted(table, rng.unit_f64() * total_weight);
            debug!("room {room_index} typed as {name}");
            name.to_string()
        })
        .collect()
}

/// First entry whose running weight reaches `draw`; zero-weight entries are
/// never selected.
fn pick_weighted(table: &[RoomTypeConfig], draw: f64) -> &str {
    let mut cumulative = 0.0;
    let mut last_weighted = None;
    for room_type in table.iter().filter(|room_type| room_type.weight > 0.0) {
        cumulative += room_type.weight;
        last_weighted = Some(room_type);
        if cumulative >= draw {
            return &room_type.name;
        }
    }
    // Float rounding can leave the running sum a hair short of the draw.
    last_weighted.map_or(keys::ROOM_NORMAL, |room_type| &room_type.name)
}
