//! Corridor carving between connected rooms: straight (one bend) or curved (two bends).

use log::debug;

use crate::config::CorridorConfig;
use crate::rng::DungeonRng;
use crate::types::{Cell, Rect};

use super::connectivity::Connection;
use super::grid::GridModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CorridorShape {
    Straight,
    Curved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarvedCorridor {
    pub connection: Connection,
    pub start: Cell,
    pub end: Cell,
    pub width: i32,
    pub shape: CorridorShape,
    pub new_cells: usize,
}

pub fn carve_corridors(
    grid: &mut GridModel,
    connections: &[Connection],
    config: &CorridorConfig,
    rng: &mut DungeonRng,
) -> Vec<CarvedCorridor> {
    let mut carved = Vec::with_capacity(connections.len());
    for &connection in connections {
        let from_room = grid.rooms()[connection.from];
        let to_room = grid.rooms()[connection.to];
        let (start, end) = connection_points(from_room, to_room);
        let width = rng.range_i32(config.width.min, config.width.max);

        let wants_curve = rng.chance(config.curve_probability);
        let path = if wants_curve && start.distance(end) >= config.min_curve_length {
            curved_path(start, end, rng)
        } else {
            straight_path(start, end, rng.chance(0.5))
        };

        let new_cells = carve_path(grid, &path.waypoints, width);
        debug!(
            "corridor {}->{} {:?} width {width}: {new_cells} new cells",
            connection.from, connection.to, path.shape
        );
        carved.push(CarvedCorridor {
            connection,
            start,
            end,
            width,
            shape: path.shape,
            new_cells,
        });
    }
    carved
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorridorPath {
    pub shape: CorridorShape,
    pub waypoints: Vec<Cell>,
}

/// Edge cells where a corridor leaves `from` and enters `to`. Both sit on the
/// sides facing each other along the dominant axis, never on a corner.
pub fn connection_points(from: Rect, to: Rect) -> (Cell, Cell) {
    let from_center = from.center();
    let to_center = to.center();
    let dx = to_center.x - from_center.x;
    let dy = to_center.y - from_center.y;

    if dx.abs() >= dy.abs() {
        let (from_x, to_x) = if dx >= 0 { (from.right(), to.x) } else { (from.x, to.right()) };
        let from_y = clamp_inside_side(to_center.y, from.y, from.top(), from_center.y);
        let to_y = clamp_inside_side(from_center.y, to.y, to.top(), to_center.y);
        (Cell::new(from_x, from_y), Cell::new(to_x, to_y))
    } else {
        let (from_y, to_y) = if dy >= 0 { (from.top(), to.y) } else { (from.y, to.top()) };
        let from_x = clamp_inside_side(to_center.x, from.x, from.right(), from_center.x);
        let to_x = clamp_inside_side(from_center.x, to.x, to.right(), to_center.x);
        (Cell::new(from_x, from_y), Cell::new(to_x, to_y))
    }
}

/// Clamps into `low + 1 ..= high - 1`; sides too short for that use `fallback`.
fn clamp_inside_side(value: i32, low: i32, high: i32, fallback: i32) -> i32 {
    if high - low < 2 {
        return fallback;
    }
    value.clamp(low + 1, high - 1)
}

pub fn straight_path(start: Cell, end: Cell, horizontal_first: bool) -> CorridorPath {
    let corner =
        if horizontal_first { Cell::new(end.x, start.y) } else { Cell::new(start.x, end.y) };
    CorridorPath { shape: CorridorShape::Straight, waypoints: vec![start, corner, end] }
}

/// Two-bend path through a random bend inside the start/end bounding box.
/// A bend sharing a coordinate with an endpoint collapses to the straight shape.
pub fn curved_path(start: Cell, end: Cell, rng: &mut DungeonRng) -> CorridorPath {
    let bend = Cell::new(
        interior_coordinate(start.x, end.x, rng),
        interior_coordinate(start.y, end.y, rng),
    );
    CorridorPath {
        shape: CorridorShape::Curved,
        waypoints: vec![
            start,
            Cell::new(bend.x, start.y),
            bend,
            Cell::new(bend.x, end.y),
            end,
        ],
    }
}

fn interior_coordinate(a: i32, b: i32, rng: &mut DungeonRng) -> i32 {
    let (low, high) = (a.min(b), a.max(b));
    if high - low >= 2 { rng.range_i32(low + 1, high - 1) } else { rng.range_i32(low, high) }
}

/// Carves every axis-aligned leg between consecutive waypoints at `width`
/// cells thick. Returns the number of cells that were not floor before.
pub fn carve_path(grid: &mut GridModel, waypoints: &[Cell], width: i32) -> usize {
    let low_offset = -(width / 2);
    let high_offset = low_offset + width - 1;
    let mut new_cells = 0usize;

    for leg in waypoints.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        let span = Rect::new(
            from.x.min(to.x) + low_offset,
            from.y.min(to.y) + low_offset,
            from.x.abs_diff(to.x) as i32 + 1 + (high_offset - low_offset),
            from.y.abs_diff(to.y) as i32 + 1 + (high_offset - low_offset),
        );
        for cell in span.cells() {
            if grid.add_floor(cell) {
                new_cells += 1;
            }
        }
    }
    new_cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::connectivity::ConnectionKind;

    #[test]
    fn horizontal_neighbors_connect_through_facing_sides() {
        let left = Rect::new(0, 0, 5, 5);
        let right = Rect::new(10, 1, 5, 5);
        let (start, end) = connection_points(left, right);
        assert_eq!(start, Cell::new(4, 3));
        assert_eq!(end, Cell::new(10, 2));
    }

    #[test]
    fn vertical_neighbors_connect_through_top_and_bottom() {
        let lower = Rect::new(0, 0, 6, 4);
        let upper = Rect::new(2, 20, 4, 6);
        let (start, end) = connection_points(lower, upper);
        assert_eq!(start.y, lower.top());
        assert_eq!(end.y, upper.y);
        assert!(start.x > lower.x && start.x < lower.right());
        assert!(end.x > upper.x && end.x < upper.right());
    }

    #[test]
    fn connection_points_never_land_on_corners() {
        let rooms = [
            Rect::new(0, 0, 5, 7),
            Rect::new(30, 30, 6, 5),
            Rect::new(-20, 18, 3, 3),
            Rect::new(12, -25, 8, 4),
        ];
        for &from in &rooms {
            for &to in &rooms {
                if from == to {
                    continue;
                }
                let (start, _) = connection_points(from, to);
                let corners = [
                    Cell::new(from.x, from.y),
                    Cell::new(from.right(), from.y),
                    Cell::new(from.x, from.top()),
                    Cell::new(from.right(), from.top()),
                ];
                assert!(from.contains(start));
                assert!(!corners.contains(&start), "{start:?} is a corner of {from:?}");
            }
        }
    }

    #[test]
    fn single_width_straight_corridor_is_an_l() {
        let mut grid = GridModel::new(Rect::new(0, 0, 20, 20));
        let path = straight_path(Cell::new(2, 2), Cell::new(6, 5), true);
        let carved = carve_path(&mut grid, &path.waypoints, 1);
        assert_eq!(carved, 5 + 3);
        assert!(grid.is_floor(Cell::new(6, 2)));
        assert!(!grid.is_floor(Cell::new(2, 5)));
    }

    #[test]
    fn width_three_corridor_is_three_cells_thick() {
        let mut grid = GridModel::new(Rect::new(0, 0, 20, 20));
        carve_path(&mut grid, &[Cell::new(2, 8), Cell::new(12, 8)], 3);
        for y in 6..=10 {
            let expected = (7..=9).contains(&y);
            assert_eq!(grid.is_floor(Cell::new(7, y)), expected, "y={y}");
        }
    }

    #[test]
    fn even_widths_are_exact() {
        let mut grid = GridModel::new(Rect::new(0, 0, 20, 20));
        carve_path(&mut grid, &[Cell::new(5, 2), Cell::new(5, 12)], 2);
        let row: Vec<bool> = (2..=8).map(|x| grid.is_floor(Cell::new(x, 7))).collect();
        assert_eq!(row, vec![false, false, true, true, false, false, false]);
    }

    #[test]
    fn curved_path_bends_inside_the_bounding_box() {
        let mut rng = DungeonRng::new(77);
        let start = Cell::new(0, 0);
        let end = Cell::new(10, 6);
        for _ in 0..50 {
            let path = curved_path(start, end, &mut rng);
            assert_eq!(path.waypoints.len(), 5);
            let bend = path.waypoints[2];
            assert!(bend.x > 0 && bend.x < 10 && bend.y > 0 && bend.y < 6);
            assert_eq!(path.waypoints[1], Cell::new(bend.x, 0));
            assert_eq!(path.waypoints[3], Cell::new(bend.x, 6));
        }
    }

    #[test]
    fn short_corridors_stay_straight_even_when_curves_are_certain() {
        let mut grid = GridModel::new(Rect::new(0, 0, 40, 40));
        grid.push_room(Rect::new(2, 2, 5, 5));
        grid.push_room(Rect::new(9, 2, 5, 5));
        let config = CorridorConfig {
            curve_probability: 1.0,
            min_curve_length: 50.0,
            ..CorridorConfig::default()
        };
        let connection = Connection { from: 0, to: 1, kind: ConnectionKind::Skeleton };
        let carved = carve_corridors(&mut grid, &[connection], &config, &mut DungeonRng::new(4));
        assert_eq!(carved[0].shape, CorridorShape::Straight);
        assert!(grid.is_floor(Cell::new(7, 4)) && grid.is_floor(Cell::new(8, 4)));
    }

    #[test]
    fn carving_existing_floor_is_a_no_op() {
        let mut grid = GridModel::new(Rect::new(0, 0, 20, 20));
        let path = [Cell::new(1, 1), Cell::new(9, 1)];
        assert_eq!(carve_path(&mut grid, &path, 1), 9);
        assert_eq!(carve_path(&mut grid, &path, 1), 0);
        assert_eq!(grid.floor().len(), 9);
    }
}
