//! Grid-space primitives shared by every generation stage.
//!
//! Coordinates are y-up: "above" a cell is `y + 1`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub y: i32,
    pub x: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub const fn up(self) -> Self {
        self.offset(0, 1)
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn squared_distance(self, other: Self) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.squared_distance(other) as f64).sqrt()
    }
}

/// Axis-aligned rectangle anchored at its lowest (x, y) corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive maximum x.
    pub const fn right(self) -> i32 {
        self.x + self.width - 1
    }

    /// Inclusive maximum y.
    pub const fn top(self) -> i32 {
        self.y + self.height - 1
    }

    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(self) -> usize {
        if self.is_empty() { 0 } else { (self.width as usize) * (self.height as usize) }
    }

    pub const fn center(self) -> Cell {
        Cell { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    /// Grows by `margin` on every side, saturating at the `i32` limits.
    pub const fn expanded(self, margin: i32) -> Self {
        let grow = margin.saturating_mul(2);
        Self {
            x: self.x.saturating_sub(margin),
            y: self.y.saturating_sub(margin),
            width: self.width.saturating_add(grow),
            height: self.height.saturating_add(grow),
        }
    }

    /// Shrinks by `margin` on every side; may produce an empty rectangle.
    pub const fn inset(self, margin: i32) -> Self {
        self.expanded(-margin)
    }

    pub fn intersects(self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.top()
            && self.top() >= other.y
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= self.x && cell.x <= self.right() && cell.y >= self.y && cell.y <= self.top()
    }

    /// Steps from `cell` to the nearest edge row or column; zero on the perimeter.
    pub fn edge_distance(self, cell: Cell) -> i32 {
        let horizontal = (cell.x - self.x).min(self.right() - cell.x);
        let vertical = (cell.y - self.y).min(self.top() - cell.y);
        horizontal.min(vertical)
    }

    /// Row-major cells, bottom row first.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let (x0, x1, y0, y1) = (self.x, self.right(), self.y, self.top());
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| Cell { y, x }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_rectangles_detect_rooms_closer_than_twice_the_margin() {
        let left = Rect::new(0, 0, 4, 4);
        let one_cell_gap = Rect::new(5, 0, 4, 4);
        let two_cell_gap = Rect::new(6, 0, 4, 4);

        assert!(left.expanded(1).intersects(&one_cell_gap.expanded(1)));
        assert!(!left.expanded(1).intersects(&two_cell_gap.expanded(1)));
    }

    #[test]
    fn cells_cover_the_whole_footprint_once() {
        let rect = Rect::new(-2, 3, 3, 2);
        let cells: Vec<Cell> = rect.cells().collect();
        assert_eq!(cells.len(), rect.area());
        assert_eq!(cells.first(), Some(&Cell::new(-2, 3)));
        assert_eq!(cells.last(), Some(&Cell::new(0, 4)));
        assert!(cells.iter().all(|&cell| rect.contains(cell)));
    }

    #[test]
    fn inset_past_the_size_yields_an_empty_rectangle() {
        let rect = Rect::new(0, 0, 2, 5);
        assert!(rect.inset(1).is_empty());
        assert_eq!(rect.inset(1).area(), 0);
        assert!(!rect.inset(1).intersects(&rect));
    }

    #[test]
    fn edge_distance_is_zero_on_the_perimeter() {
        let rect = Rect::new(0, 0, 7, 7);
        assert_eq!(rect.edge_distance(Cell::new(0, 3)), 0);
        assert_eq!(rect.edge_distance(Cell::new(1, 5)), 1);
        assert_eq!(rect.edge_distance(Cell::new(3, 3)), 3);
    }
}
