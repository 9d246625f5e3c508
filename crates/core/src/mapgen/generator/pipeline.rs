//! Single-pass dungeon pipeline that composes the mapgen stages in order.

use log::info;

use crate::config::GeneratorConfig;
use crate::rng::DungeonRng;

use super::super::connectivity::{ConnectionKind, build_connections, reachable_from_first};
use super::super::corridors::{CorridorShape, carve_corridors};
use super::super::grid::GridModel;
use super::super::model::{GeneratedDungeon, GenerationReport, TypedRoom};
use super::super::objects::populate_objects;
use super::super::room_types::assign_room_types;
use super::super::rooms::place_rooms;
use super::super::walls::classify_walls;

/// Rooms, connections, corridors, walls, room types, objects. Every stage
/// draws from the same stream, so stage order is part of the output.
pub(super) fn run_pipeline(config: &GeneratorConfig) -> GeneratedDungeon {
    let mut rng = DungeonRng::new(config.seed);
    let mut grid = GridModel::new(config.area.to_rect());

    let placement = place_rooms(&mut grid, &config.rooms, &mut rng);
    let connections = build_connections(grid.rooms(), &config.corridors, &mut rng);
    let corridors = carve_corridors(&mut grid, &connections, &config.corridors, &mut rng);
    let walls = classify_walls(&grid);
    let room_types = assign_room_types(grid.rooms().len(), &config.room_types, &mut rng);
    let population = populate_objects(&grid, &room_types, &config.room_types, &mut rng);

    let skeleton_connections =
        connections.iter().filter(|connection| connection.kind == ConnectionKind::Skeleton).count();
    let report = GenerationReport {
        seed: config.seed,
        rooms_requested: placement.requested,
        rooms_placed: placement.placed,
        room_attempts: placement.attempts,
        skeleton_connections,
        extra_connections: connections.len() - skeleton_connections,
        rooms_reachable: reachable_from_first(grid.rooms().len(), &connections)
            .into_iter()
            .filter(|&reached| reached)
            .count(),
        curved_corridors: corridors
            .iter()
            .filter(|corridor| corridor.shape == CorridorShape::Curved)
            .count(),
        floor_cells: grid.floor().len(),
        corridor_cells: grid.corridor_cell_count(),
        wall_cells: walls.walls.len(),
        unclassified_cells: walls.unclassified.len(),
        objects_requested: population.requested,
        objects_placed: population.objects.len(),
        object_attempts: population.attempts,
    };

    info!(
        "seed {}: {}/{} rooms, {} connections, {} floor cells, {} walls, {}/{} objects",
        report.seed,
        report.rooms_placed,
        report.rooms_requested,
        connections.len(),
        report.floor_cells,
        report.wall_cells,
        report.objects_placed,
        report.objects_requested
    );

    let rooms = grid
        .rooms()
        .iter()
        .zip(room_types)
        .map(|(&rect, room_type)| TypedRoom { rect, room_type })
        .collect();

    GeneratedDungeon {
        bounds: grid.bounds(),
        rooms,
        connections,
        corridors,
        floor: grid.floor().clone(),
        walls,
        objects: population.objects,
        report,
    }
}
