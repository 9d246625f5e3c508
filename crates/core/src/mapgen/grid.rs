//! Floor set and room list owned by one generation pass.

use std::collections::BTreeSet;

use crate::types::{Cell, Rect};

/// Append-only floor model; nothing here removes a cell or a room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridModel {
    bounds: Rect,
    floor: BTreeSet<Cell>,
    rooms: Vec<Rect>,
}

impl GridModel {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds, floor: BTreeSet::new(), rooms: Vec::new() }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub fn floor(&self) -> &BTreeSet<Cell> {
        &self.floor
    }

    pub fn is_floor(&self, cell: Cell) -> bool {
        self.floor.contains(&cell)
    }

    /// Adds `cell` if it lies inside the bounds. Returns `true` only for new floor.
    pub fn add_floor(&mut self, cell: Cell) -> bool {
        if !self.bounds.contains(cell) {
            return false;
        }
        self.floor.insert(cell)
    }

    /// Commits a room and its footprint; returns the room's canonical index.
    pub(super) fn push_room(&mut self, room: Rect) -> usize {
        for cell in room.cells() {
            self.add_floor(cell);
        }
        self.rooms.push(room);
        self.rooms.len() - 1
    }

    /// Whether `candidate` grown by `margin` touches any committed room grown the same way.
    pub fn overlaps_room(&self, candidate: Rect, margin: i32) -> bool {
        let candidate_with_margin = candidate.expanded(margin);
        self.rooms
            .iter()
            .any(|existing| existing.expanded(margin).intersects(&candidate_with_margin))
    }

    /// Index of the first room whose rectangle holds `cell`.
    pub fn room_containing(&self, cell: Cell) -> Option<usize> {
        self.rooms.iter().position(|room| room.contains(cell))
    }

    pub fn neighbor_mask(&self, cell: Cell) -> NeighborMask {
        NeighborMask::from_fn(cell, |neighbor| self.is_floor(neighbor))
    }

    /// Non-floor cells with at least one floor cell among their 8 neighbors.
    pub fn boundary_cells(&self) -> BTreeSet<Cell> {
        let mut boundary = BTreeSet::new();
        for &cell in &self.floor {
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let neighbor = cell.offset(dx, dy);
                if !self.is_floor(neighbor) {
                    boundary.insert(neighbor);
                }
            }
        }
        boundary
    }

    pub fn corridor_cell_count(&self) -> usize {
        self.floor.iter().filter(|&&cell| self.room_containing(cell).is_none()).count()
    }
}

const NEIGHBOR_OFFSETS: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

/// Floor occupancy of the eight cells around a queried cell (y-up).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeighborMask {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub up_left: bool,
    pub up_right: bool,
    pub down_left: bool,
    pub down_right: bool,
}

impl NeighborMask {
    pub fn from_fn(cell: Cell, mut is_floor: impl FnMut(Cell) -> bool) -> Self {
        Self {
            up: is_floor(cell.offset(0, 1)),
            down: is_floor(cell.offset(0, -1)),
            left: is_floor(cell.offset(-1, 0)),
            right: is_floor(cell.offset(1, 0)),
            up_left: is_floor(cell.offset(-1, 1)),
            up_right: is_floor(cell.offset(1, 1)),
            down_left: is_floor(cell.offset(-1, -1)),
            down_right: is_floor(cell.offset(1, -1)),
        }
    }

    pub fn cardinal_count(self) -> usize {
        [self.up, self.down, self.left, self.right].into_iter().filter(|&floor| floor).count()
    }

    pub fn no_cardinals(self) -> bool {
        self.cardinal_count() == 0
    }

    pub fn any(self) -> bool {
        self.cardinal_count() > 0
            || self.up_left
            || self.up_right
            || self.down_left
            || self.down_right
    }
}
