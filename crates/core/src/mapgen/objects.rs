//! Object population inside typed rooms.
//!
//! Candidate anchors are rejection-sampled per room. An attempt draws the
//! anchor, the archetype and a quarter-turn rotation, then checks the
//! footprint against floor, occupancy, entrance proximity and spacing.

use std::collections::BTreeSet;

use log::{debug, warn};
use serde::Serialize;

use crate::config::{
    ENTRANCE_BAND, Footprint, OBJECT_ATTEMPTS_PER_OBJECT, ObjectArchetype, RoomTypeConfig,
};
use crate::rng::DungeonRng;
use crate::types::{Cell, Rect};

use super::grid::GridModel;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacedObject {
    pub room: usize,
    pub archetype: String,
    /// Anchor cell; spacing is measured between anchors.
    pub position: Cell,
    pub cells: Vec<Cell>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectPopulation {
    pub objects: Vec<PlacedObject>,
    pub requested: usize,
    pub attempts: usize,
}

pub fn populate_objects(
    grid: &GridModel,
    room_types: &[String],
    table: &[RoomTypeConfig],
    rng: &mut DungeonRng,
) -> ObjectPopulation {
    let mut population = ObjectPopulation::default();
    let mut occupied = BTreeSet::new();

    for (room_index, (&room, type_name)) in grid.rooms().iter().zip(room_types).enumerate() {
        let Some(room_type) = table.iter().find(|room_type| &room_type.name == type_name) else {
            continue;
        };
        if room_type.pool.is_empty() {
            continue;
        }
        let interior = room.inset(1);
        if interior.is_empty() {
            continue;
        }

        let drawn = rng.range_usize(room_type.objects.min, room_type.objects.max);
        let density_cap = (room_type.density * interior.area() as f64).round() as usize;
        let desired = drawn.min(density_cap);
        if desired == 0 {
            continue;
        }

        let candidate_area =
            if room_type.center_biased { central_area(room, interior) } else { interior };
        let budget = desired.saturating_mul(OBJECT_ATTEMPTS_PER_OBJECT);
        let first_in_room = population.objects.len();
        let mut attempts = 0usize;

        while population.objects.len() - first_in_room < desired && attempts < budget {
            attempts += 1;
            let anchor = Cell::new(
                rng.range_i32(candidate_area.x, candidate_area.right()),
                rng.range_i32(candidate_area.y, candidate_area.top()),
            );
            let archetype = &room_type.pool[rng.index(room_type.pool.len())];
            let quarter_turns = rng.below(4) as u8;
            let cells = footprint_cells(archetype.footprint, anchor, quarter_turns);

            let placed_in_room = &population.objects[first_in_room..];
            if !footprint_fits(grid, room, &cells, &occupied)
                || !spaced_from(anchor, placed_in_room, room_type.min_spacing)
            {
                continue;
            }

            occupied.extend(cells.iter().copied());
            population.objects.push(placed(room_index, archetype, anchor, cells));
        }

        let placed_count = population.objects.len() - first_in_room;
        debug!(
            "room {room_index} ({type_name}): placed {placed_count}/{desired} objects \
             in {attempts} attempts"
        );
        if placed_count < desired {
            warn!("room {room_index} ({type_name}) is short {} objects", desired - placed_count);
        }
        population.requested += desired;
        population.attempts += attempts;
    }

    population
}

fn placed(
    room: usize,
    archetype: &ObjectArchetype,
    position: Cell,
    cells: Vec<Cell>,
) -> PlacedObject {
    PlacedObject { room, archetype: archetype.name.clone(), position, cells }
}

/// Middle half of the room on each axis, kept inside `interior`.
fn central_area(room: Rect, interior: Rect) -> Rect {
    let width = (room.width / 2).max(1);
    let height = (room.height / 2).max(1);
    let x0 = (room.x + (room.width - width) / 2).max(interior.x);
    let y0 = (room.y + (room.height - height) / 2).max(interior.y);
    let x1 = (x0 + width - 1).min(interior.right());
    let y1 = (y0 + height - 1).min(interior.top());
    if x0 > x1 || y0 > y1 {
        return interior;
    }
    Rect::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1)
}

pub fn footprint_cells(footprint: Footprint, anchor: Cell, quarter_turns: u8) -> Vec<Cell> {
    let offsets: &[(i32, i32)] = match footprint {
        Footprint::Single => &[(0, 0)],
        Footprint::Bar => &[(-1, 0), (0, 0), (1, 0)],
        Footprint::Elbow => &[(0, 0), (1, 0), (0, 1)],
    };
    offsets
        .iter()
        .map(|&(dx, dy)| {
            let (dx, dy) = rotate(dx, dy, quarter_turns);
            anchor.offset(dx, dy)
        })
        .collect()
}

fn rotate(dx: i32, dy: i32, quarter_turns: u8) -> (i32, i32) {
    (0..quarter_turns % 4).fold((dx, dy), |(x, y), _| (-y, x))
}

fn footprint_fits(grid: &GridModel, room: Rect, cells: &[Cell], occupied: &BTreeSet<Cell>) -> bool {
    cells.iter().all(|&cell| {
        grid.is_floor(cell)
            && room.contains(cell)
            && !occupied.contains(&cell)
            && !near_entrance(grid, room, cell)
    })
}

/// A cell in the room's border band with floor outside the room close by,
/// which is where a corridor enters.
pub fn near_entrance(grid: &GridModel, room: Rect, cell: Cell) -> bool {
    if room.edge_distance(cell) >= ENTRANCE_BAND {
        return false;
    }
    let span = ENTRANCE_BAND * 2 + 1;
    Rect::new(cell.x - ENTRANCE_BAND, cell.y - ENTRANCE_BAND, span, span)
        .cells()
        .any(|nearby| grid.is_floor(nearby) && !room.contains(nearby))
}

fn spaced_from(anchor: Cell, placed_in_room: &[PlacedObject], min_spacing: f64) -> bool {
    placed_in_room.iter().all(|object| object.position.distance(anchor) >= min_spacing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CountRange, keys};

    fn single_room_grid(room: Rect) -> GridModel {
        let mut grid = GridModel::new(Rect::new(0, 0, 40, 40));
        grid.push_room(room);
        grid
    }

    fn crate_room(objects: CountRange, min_spacing: f64) -> RoomTypeConfig {
        RoomTypeConfig {
            name: keys::ROOM_STORAGE.to_string(),
            weight: 1.0,
            objects,
            density: 1.0,
            center_biased: false,
            min_spacing,
            pool: vec![ObjectArchetype::new(keys::OBJECT_CRATE, Footprint::Single)],
        }
    }

    fn populate(grid: &GridModel, table: &[RoomTypeConfig], seed: u64) -> ObjectPopulation {
        let types = vec![table[0].name.clone(); grid.rooms().len()];
        populate_objects(grid, &types, table, &mut DungeonRng::new(seed))
    }

    #[test]
    fn spacing_larger_than_the_interior_diagonal_allows_one_object() {
        let grid = single_room_grid(Rect::new(5, 5, 6, 6));
        let table = [crate_room(CountRange::new(8, 8), 50.0)];
        for seed in 0..20 {
            let population = populate(&grid, &table, seed);
            assert!(population.objects.len() <= 1, "seed={seed}");
        }
    }

    #[test]
    fn objects_respect_spacing_and_stay_on_room_floor() {
        let grid = single_room_grid(Rect::new(2, 2, 12, 10));
        let table = [crate_room(CountRange::new(6, 6), 2.5)];
        let population = populate(&grid, &table, 17);
        assert!(!population.objects.is_empty());
        for (index, object) in population.objects.iter().enumerate() {
            assert!(object.cells.iter().all(|&cell| grid.is_floor(cell)));
            for other in &population.objects[index + 1..] {
                assert!(object.position.distance(other.position) >= 2.5);
            }
        }
    }

    #[test]
    fn no_object_sits_next_to_a_corridor_mouth() {
        let room = Rect::new(4, 4, 9, 9);
        let mut grid = single_room_grid(room);
        for x in 13..=20 {
            grid.add_floor(Cell::new(x, 8));
        }
        let table = [crate_room(CountRange::new(20, 20), 0.0)];
        for seed in 0..10 {
            for object in populate(&grid, &table, seed).objects {
                for cell in object.cells {
                    let blocks = cell.x >= 11 && (6..=10).contains(&cell.y);
                    assert!(!blocks, "{cell:?} blocks the entrance");
                }
            }
        }
    }

    #[test]
    fn entrance_band_only_triggers_near_outside_floor() {
        let room = Rect::new(4, 4, 9, 9);
        let mut grid = single_room_grid(room);
        assert!(!near_entrance(&grid, room, Cell::new(5, 8)));
        grid.add_floor(Cell::new(3, 8));
        assert!(near_entrance(&grid, room, Cell::new(5, 8)));
        assert!(near_entrance(&grid, room, Cell::new(5, 10)));
        assert!(!near_entrance(&grid, room, Cell::new(6, 8)));
    }

    #[test]
    fn density_caps_the_drawn_count() {
        let grid = single_room_grid(Rect::new(2, 2, 7, 7));
        let table = [RoomTypeConfig { density: 0.1, ..crate_room(CountRange::new(10, 10), 0.0) }];
        let population = populate(&grid, &table, 3);
        assert_eq!(population.requested, 3);
        assert!(population.objects.len() <= 3);
    }

    #[test]
    fn rooms_without_a_pool_or_a_known_type_stay_empty() {
        let grid = single_room_grid(Rect::new(2, 2, 8, 8));
        let table = [crate_room(CountRange::new(3, 3), 0.0)];
        let population =
            populate_objects(&grid, &["unknown".to_string()], &table, &mut DungeonRng::new(1));
        assert!(population.objects.is_empty());
        assert_eq!(population.requested, 0);

        let bare = [RoomTypeConfig { pool: Vec::new(), ..table[0].clone() }];
        assert!(populate(&grid, &bare, 1).objects.is_empty());
    }

    #[test]
    fn center_biased_objects_land_in_the_middle_half() {
        let room = Rect::new(0, 0, 12, 12);
        let grid = single_room_grid(room);
        let table =
            [RoomTypeConfig { center_biased: true, ..crate_room(CountRange::new(4, 4), 0.0) }];
        let middle = central_area(room, room.inset(1));
        assert_eq!(middle, Rect::new(3, 3, 6, 6));
        for seed in 0..10 {
            for object in populate(&grid, &table, seed).objects {
                assert!(middle.contains(object.position));
            }
        }
    }

    #[test]
    fn multi_cell_footprints_rotate_around_the_anchor() {
        let anchor = Cell::new(5, 5);
        assert_eq!(
            footprint_cells(Footprint::Bar, anchor, 1),
            vec![Cell::new(5, 4), Cell::new(5, 5), Cell::new(5, 6)]
        );
        assert_eq!(
            footprint_cells(Footprint::Elbow, anchor, 2),
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(5, 4)]
        );
        assert_eq!(footprint_cells(Footprint::Single, anchor, 3), vec![anchor]);
    }

    #[test]
    fn footprints_never_share_cells() {
        let grid = single_room_grid(Rect::new(1, 1, 14, 14));
        let table = [RoomTypeConfig {
            pool: vec![
                ObjectArchetype::new(keys::OBJECT_COVER_BAR, Footprint::Bar),
                ObjectArchetype::new(keys::OBJECT_COVER_ELBOW, Footprint::Elbow),
            ],
            ..crate_room(CountRange::new(12, 12), 0.0)
        }];
        let population = populate(&grid, &table, 99);
        let mut seen = BTreeSet::new();
        for object in &population.objects {
            for &cell in &object.cells {
                assert!(seen.insert(cell), "{cell:?} claimed twice");
            }
        }
    }
}
