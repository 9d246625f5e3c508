//! Procedural dungeon generation split into one module per pipeline stage.

pub mod connectivity;
pub mod corridors;
pub mod grid;
pub mod model;
pub mod objects;
pub mod room_types;
pub mod rooms;
pub mod walls;

mod generator;

pub use connectivity::{Connection, ConnectionKind};
pub use corridors::{CarvedCorridor, CorridorShape};
pub use generator::{DungeonGenerator, DungeonSession};
pub use grid::{GridModel, NeighborMask};
pub use model::{GeneratedDungeon, GenerationReport, TypedRoom};
pub use objects::PlacedObject;
pub use walls::{WallCategory, WallLayout, WallPlacement};

use crate::config::GeneratorConfig;
use crate::error::ConfigError;

pub fn generate_dungeon(config: GeneratorConfig) -> Result<GeneratedDungeon, ConfigError> {
    Ok(DungeonGenerator::new(config)?.generate())
}
