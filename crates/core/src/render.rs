//! Narrow consumer seam between a generated dungeon and whatever draws it.
//!
//! The core never draws. [`paint`] walks a [`GeneratedDungeon`] in draw order
//! and hands each visual to a [`TileSink`].

use serde::Serialize;

use crate::mapgen::{GeneratedDungeon, WallCategory};
use crate::types::Cell;

/// Draw layers, lowest first. Later layers cover earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawLayer {
    Floor,
    WallTop,
    WallBase,
    Object,
}

impl DrawLayer {
    pub const ALL: [Self; 4] = [Self::Floor, Self::WallTop, Self::WallBase, Self::Object];

    pub const fn sorting_order(self) -> i32 {
        match self {
            Self::Floor => 0,
            Self::WallTop => 1,
            Self::WallBase => 2,
            Self::Object => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visual<'a> {
    Floor,
    Wall(WallCategory),
    Object { archetype: &'a str, anchor: bool },
}

pub trait TileSink {
    fn place(&mut self, cell: Cell, layer: DrawLayer, visual: Visual<'_>);
}

/// Emits every visual of `dungeon` layer by layer; each (cell, layer) pair is
/// emitted at most once. Returns the number of placements.
pub fn paint(dungeon: &GeneratedDungeon, sink: &mut impl TileSink) -> usize {
    let mut placed = 0usize;

    for &cell in &dungeon.floor {
        sink.place(cell, DrawLayer::Floor, Visual::Floor);
        placed += 1;
    }

    for (cell, category) in dungeon.walls.top_layer() {
        sink.place(cell, DrawLayer::WallTop, Visual::Wall(category));
        placed += 1;
    }

    for (&cell, placement) in &dungeon.walls.walls {
        sink.place(cell, DrawLayer::WallBase, Visual::Wall(placement.category));
        placed += 1;
    }

    for object in &dungeon.objects {
        for &cell in &object.cells {
            let anchor = cell == object.position;
            sink.place(
                cell,
                DrawLayer::Object,
                Visual::Object { archetype: &object.archetype, anchor },
            );
            placed += 1;
        }
    }

    placed
}
