//! Rejection-sampled room placement inside the generation area.

use log::{debug, warn};

use crate::config::{ROOM_ATTEMPTS_PER_ROOM, RoomConfig};
use crate::rng::DungeonRng;
use crate::types::Rect;

use super::grid::GridModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomPlacement {
    pub requested: usize,
    pub placed: usize,
    pub attempts: usize,
}

/// Places up to `config.count` rooms, committing each accepted room to `grid`
/// in acceptance order. Hitting the attempt ceiling yields fewer rooms.
pub fn place_rooms(
    grid: &mut GridModel,
    config: &RoomConfig,
    rng: &mut DungeonRng,
) -> RoomPlacement {
    let area = grid.bounds();
    let margin = config.separation;
    let max_attempts = config.count.saturating_mul(ROOM_ATTEMPTS_PER_ROOM);

    let mut placed = 0usize;
    let mut attempts = 0usize;
    while placed < config.count && attempts < max_attempts {
        attempts += 1;
        let room_width = rng.range_i32(config.width.min, config.width.max);
        let room_height = rng.range_i32(config.height.min, config.height.max);

        let min_x = area.x + margin;
        let max_x = area.x + area.width - margin - room_width;
        let min_y = area.y + margin;
        let max_y = area.y + area.height - margin - room_height;
        if min_x > max_x || min_y > max_y {
            continue;
        }

        let x = rng.range_i32(min_x, max_x);
        let y = rng.range_i32(min_y, max_y);
        let candidate = Rect::new(x, y, room_width, room_height);
        if grid.overlaps_room(candidate, margin) {
            continue;
        }

        let index = grid.push_room(candidate);
        debug!("room {index} accepted at {candidate:?} after {attempts} attempts");
        placed += 1;
    }

    if placed < config.count {
        warn!("placed {placed} of {} rooms within {max_attempts} attempts", config.count);
    }

    RoomPlacement { requested: config.count, placed, attempts }
}
