//! Public data models for a generated dungeon and its generation report.

use std::collections::BTreeSet;

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Cell, Rect};

use super::connectivity::{Connection, ConnectionKind};
use super::corridors::{CarvedCorridor, CorridorShape};
use super::objects::PlacedObject;
use super::walls::{WallCategory, WallLayout};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypedRoom {
    pub rect: Rect,
    pub room_type: String,
}

/// Requested versus achieved counts for one pass. Shortfalls land here
/// instead of surfacing as errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub rooms_requested: usize,
    pub rooms_placed: usize,
    pub room_attempts: usize,
    pub skeleton_connections: usize,
    pub extra_connections: usize,
    pub rooms_reachable: usize,
    pub curved_corridors: usize,
    pub floor_cells: usize,
    pub corridor_cells: usize,
    pub wall_cells: usize,
    pub unclassified_cells: usize,
    pub objects_requested: usize,
    pub objects_placed: usize,
    pub object_attempts: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDungeon {
    pub bounds: Rect,
    pub rooms: Vec<TypedRoom>,
    pub connections: Vec<Connection>,
    pub corridors: Vec<CarvedCorridor>,
    pub floor: BTreeSet<Cell>,
    pub walls: WallLayout,
    pub objects: Vec<PlacedObject>,
    pub report: GenerationReport,
}

impl GeneratedDungeon {
    pub fn is_floor(&self, cell: Cell) -> bool {
        self.floor.contains(&cell)
    }

    pub fn wall_at(&self, cell: Cell) -> Option<WallCategory> {
        self.walls.walls.get(&cell).map(|placement| placement.category)
    }

    pub fn objects_in_room(&self, room: usize) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter().filter(move |object| object.room == room)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        push_rect(&mut bytes, self.bounds);

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            push_rect(&mut bytes, room.rect);
            push_str(&mut bytes, &room.room_type);
        }

        bytes.extend((self.connections.len() as u32).to_le_bytes());
        for connection in &self.connections {
            bytes.extend((connection.from as u32).to_le_bytes());
            bytes.extend((connection.to as u32).to_le_bytes());
            bytes.push(match connection.kind {
                ConnectionKind::Skeleton => 0,
                ConnectionKind::Extra => 1,
            });
        }

        for corridor in &self.corridors {
            push_cell(&mut bytes, corridor.start);
            push_cell(&mut bytes, corridor.end);
            bytes.extend(corridor.width.to_le_bytes());
            bytes.push(match corridor.shape {
                CorridorShape::Straight => 0,
                CorridorShape::Curved => 1,
            });
        }

        bytes.extend((self.floor.len() as u32).to_le_bytes());
        for &cell in &self.floor {
            push_cell(&mut bytes, cell);
        }

        bytes.extend((self.walls.walls.len() as u32).to_le_bytes());
        for (&cell, placement) in &self.walls.walls {
            push_cell(&mut bytes, cell);
            bytes.push(placement.category as u8);
        }

        bytes.extend((self.objects.len() as u32).to_le_bytes());
        for object in &self.objects {
            bytes.extend((object.room as u32).to_le_bytes());
            push_str(&mut bytes, &object.archetype);
            bytes.extend((object.cells.len() as u32).to_le_bytes());
            for &cell in &object.cells {
                push_cell(&mut bytes, cell);
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_cell(bytes: &mut Vec<u8>, cell: Cell) {
    bytes.extend(cell.y.to_le_bytes());
    bytes.extend(cell.x.to_le_bytes());
}

fn push_rect(bytes: &mut Vec<u8>, rect: Rect) {
    for value in [rect.x, rect.y, rect.width, rect.height] {
        bytes.extend(value.to_le_bytes());
    }
}

fn push_str(bytes: &mut Vec<u8>, value: &str) {
    bytes.extend((value.len() as u32).to_le_bytes());
    bytes.extend(value.as_bytes());
}
