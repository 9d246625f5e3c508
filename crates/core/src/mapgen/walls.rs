//! Wall and corner classification over the 8-neighborhood of every boundary cell.
//!
//! Rules live in one ordered table and the first match wins: inner corners,
//! then outer corners, then straight walls. Top-facing categories also claim
//! the cell directly above on the top layer, so the feature renders two cells
//! tall. Cells matching no rule stay unclassified and are not walls.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Cell;

use super::grid::{GridModel, NeighborMask};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WallCategory {
    InnerCornerTopLeft,
    InnerCornerTopRight,
    InnerCornerBottomLeft,
    InnerCornerBottomRight,
    OuterCornerTopLeft,
    OuterCornerTopRight,
    OuterCornerBottomLeft,
    OuterCornerBottomRight,
    WallTop,
    WallBottom,
    WallLeft,
    WallRight,
    None,
}

impl WallCategory {
    /// Categories that continue onto the top layer one cell above.
    pub fn has_top_layer(self) -> bool {
        matches!(
            self,
            Self::InnerCornerTopLeft
                | Self::InnerCornerTopRight
                | Self::OuterCornerTopLeft
                | Self::OuterCornerTopRight
                | Self::WallTop
        )
    }

    pub fn is_inner_corner(self) -> bool {
        matches!(
            self,
            Self::InnerCornerTopLeft
                | Self::InnerCornerTopRight
                | Self::InnerCornerBottomLeft
                | Self::InnerCornerBottomRight
        )
    }

    pub fn is_outer_corner(self) -> bool {
        matches!(
            self,
            Self::OuterCornerTopLeft
                | Self::OuterCornerTopRight
                | Self::OuterCornerBottomLeft
                | Self::OuterCornerBottomRight
        )
    }

    pub fn is_straight(self) -> bool {
        matches!(self, Self::WallTop | Self::WallBottom | Self::WallLeft | Self::WallRight)
    }
}

pub struct WallRule {
    pub category: WallCategory,
    pub matches: fn(NeighborMask) -> bool,
}

pub const WALL_RULES: [WallRule; 12] = [
    WallRule {
        category: WallCategory::InnerCornerTopLeft,
        matches: |m| m.down && m.right && !m.up && !m.left,
    },
    WallRule {
        category: WallCategory::InnerCornerTopRight,
        matches: |m| m.down && m.left && !m.up && !m.right,
    },
    WallRule {
        category: WallCategory::InnerCornerBottomLeft,
        matches: |m| m.up && m.right && !m.down && !m.left,
    },
    WallRule {
        category: WallCategory::InnerCornerBottomRight,
        matches: |m| m.up && m.left && !m.down && !m.right,
    },
    WallRule {
        category: WallCategory::OuterCornerTopLeft,
        matches: |m| m.no_cardinals() && m.down_right && !m.up_right,
    },
    WallRule {
        category: WallCategory::OuterCornerTopRight,
        matches: |m| m.no_cardinals() && m.down_left && !m.up_left,
    },
    WallRule {
        category: WallCategory::OuterCornerBottomLeft,
        matches: |m| m.no_cardinals() && m.up_right && !m.down_right,
    },
    WallRule {
        category: WallCategory::OuterCornerBottomRight,
        matches: |m| m.no_cardinals() && m.up_left && !m.down_left,
    },
    WallRule { category: WallCategory::WallTop, matches: |m| m.cardinal_count() == 1 && m.down },
    WallRule { category: WallCategory::WallBottom, matches: |m| m.cardinal_count() == 1 && m.up },
    WallRule { category: WallCategory::WallLeft, matches: |m| m.cardinal_count() == 1 && m.right },
    WallRule { category: WallCategory::WallRight, matches: |m| m.cardinal_count() == 1 && m.left },
];

pub fn classify_mask(mask: NeighborMask) -> WallCategory {
    WALL_RULES
        .iter()
        .find(|rule| (rule.matches)(mask))
        .map_or(WallCategory::None, |rule| rule.category)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WallPlacement {
    pub category: WallCategory,
    /// Cell above the wall that carries the same category on the top layer.
    pub top_cell: Option<Cell>,
}

impl WallPlacement {
    fn for_cell(cell: Cell, category: WallCategory) -> Self {
        Self { category, top_cell: category.has_top_layer().then(|| cell.up()) }
    }
}

/// Classification of one cell against the current floor set; `None` for
/// floor cells and for cells no rule covers.
pub fn classify_cell(grid: &GridModel, cell: Cell) -> Option<WallPlacement> {
    if grid.is_floor(cell) {
        return None;
    }
    match classify_mask(grid.neighbor_mask(cell)) {
        WallCategory::None => None,
        category => Some(WallPlacement::for_cell(cell, category)),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallLayout {
    pub walls: BTreeMap<Cell, WallPlacement>,
    pub unclassified: Vec<Cell>,
}

impl WallLayout {
    /// Top-layer cells keyed by position. A cell claimed by two walls keeps
    /// the lowest-ordered category.
    pub fn top_layer(&self) -> BTreeMap<Cell, WallCategory> {
        let mut top = BTreeMap::new();
        for placement in self.walls.values() {
            if let Some(cell) = placement.top_cell {
                top.entry(cell)
                    .and_modify(|existing: &mut WallCategory| {
                        *existing = (*existing).min(placement.category);
                    })
                    .or_insert(placement.category);
            }
        }
        top
    }

    pub fn count(&self, category: WallCategory) -> usize {
        self.walls.values().filter(|placement| placement.category == category).count()
    }
}

/// Classifies every non-floor cell touching the floor. Pure over the grid's
/// current floor set; re-running after more carving recomputes from scratch.
pub fn classify_walls(grid: &GridModel) -> WallLayout {
    let mut layout = WallLayout::default();
    for cell in grid.boundary_cells() {
        match classify_cell(grid, cell) {
            Some(placement) => {
                layout.walls.insert(cell, placement);
            }
            None => layout.unclassified.push(cell),
        }
    }
    layout
}
