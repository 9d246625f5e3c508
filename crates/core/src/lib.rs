pub mod config;
pub mod error;
pub mod mapgen;
pub mod render;
pub mod rng;
pub mod types;

pub use config::GeneratorConfig;
pub use error::ConfigError;
pub use mapgen::{DungeonGenerator, DungeonSession, GeneratedDungeon, generate_dungeon};
pub use render::{DrawLayer, TileSink, Visual, paint};
pub use rng::DungeonRng;
pub use types::*;
