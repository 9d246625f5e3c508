//! Generation parameters supplied once per pass, plus the built-in room type table.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Cell, Rect};

pub mod keys {
    pub const ROOM_NORMAL: &str = "normal";
    pub const ROOM_STORAGE: &str = "storage";
    pub const ROOM_SHRINE: &str = "shrine";

    pub const OBJECT_COVER_POST: &str = "cover_post";
    pub const OBJECT_COVER_BAR: &str = "cover_bar";
    pub const OBJECT_COVER_ELBOW: &str = "cover_elbow";
    pub const OBJECT_CRATE: &str = "crate";
    pub const OBJECT_BARREL: &str = "barrel";
    pub const OBJECT_ALTAR: &str = "altar";
}

/// Placement attempts allowed per requested room.
pub const ROOM_ATTEMPTS_PER_ROOM: usize = 40;
/// Placement attempts allowed per requested object.
pub const OBJECT_ATTEMPTS_PER_OBJECT: usize = 30;
/// Cells from a room edge inside which doorway proximity is checked.
pub const ENTRANCE_BAND: i32 = 2;
/// Largest accepted room count and count-range maximum.
pub const MAX_COUNT: usize = 4096;
/// Largest accepted room or corridor size and separation margin.
pub const MAX_EXTENT: i32 = 4096;
/// Area corners must lie within this distance of the origin on each axis.
pub const MAX_COORDINATE: i32 = 1 << 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    fn check_sizes(self, field: &'static str) -> Result<(), ConfigError> {
        if self.min < 1 {
            return Err(ConfigError::NonPositiveSize { field, value: self.min });
        }
        check_extent(field, self.max)?;
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: i64::from(self.min),
                max: i64::from(self.max),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    fn check(self, field: &'static str) -> Result<(), ConfigError> {
        check_count(field, self.max)?;
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: i64::try_from(self.min).unwrap_or(i64::MAX),
                max: i64::try_from(self.max).unwrap_or(i64::MAX),
            });
        }
        Ok(())
    }
}

/// Generation bounds: `min` inclusive, `max` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub min: Cell,
    pub max: Cell,
}

impl Area {
    /// Callers validate the corners first; extreme corners overflow the size.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.min.x, self.min.y, self.max.x - self.min.x, self.max.y - self.min.y)
    }
}

impl Default for Area {
    fn default() -> Self {
        Self { min: Cell::new(0, 0), max: Cell::new(60, 60) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub count: usize,
    pub width: IntRange,
    pub height: IntRange,
    /// Margin reserved around every room; also keeps rooms off the area border.
    pub separation: i32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self { count: 6, width: IntRange::new(5, 10), height: IntRange::new(5, 10), separation: 1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStrategy {
    Nearest,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    Manhattan,
    Euclidean,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    pub width: IntRange,
    pub curve_probability: f64,
    /// Corridors shorter than this (start to end, Euclidean) are always straight.
    pub min_curve_length: f64,
    pub connection_density: f64,
    pub extra_connections: CountRange,
    pub strategy: ConnectionStrategy,
    pub metric: DistanceMetric,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            width: IntRange::new(1, 1),
            curve_probability: 0.3,
            min_curve_length: 6.0,
            connection_density: 1.0,
            extra_connections: CountRange::new(0, 2),
            strategy: ConnectionStrategy::Nearest,
            metric: DistanceMetric::Manhattan,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Footprint {
    Single,
    /// Three cells in a line through the anchor.
    Bar,
    /// Anchor plus one cell to the right and one above, before rotation.
    Elbow,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectArchetype {
    pub name: String,
    #[serde(default = "single_footprint")]
    pub footprint: Footprint,
}

fn single_footprint() -> Footprint {
    Footprint::Single
}

impl ObjectArchetype {
    pub fn new(name: &str, footprint: Footprint) -> Self {
        Self { name: name.to_string(), footprint }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTypeConfig {
    pub name: String,
    pub weight: f64,
    pub objects: CountRange,
    /// Upper bound on objects as a fraction of the room interior area.
    pub density: f64,
    pub center_biased: bool,
    pub min_spacing: f64,
    pub pool: Vec<ObjectArchetype>,
}

impl Default for RoomTypeConfig {
    fn default() -> Self {
        Self {
            name: keys::ROOM_NORMAL.to_string(),
            weight: 1.0,
            objects: CountRange::new(0, 0),
            density: 1.0,
            center_biased: false,
            min_spacing: 0.0,
            pool: Vec::new(),
        }
    }
}

impl RoomTypeConfig {
    pub fn build_default_table() -> Vec<Self> {
        vec![
            Self {
                name: keys::ROOM_NORMAL.to_string(),
                weight: 0.6,
                objects: CountRange::new(0, 3),
                density: 0.1,
                center_biased: false,
                min_spacing: 2.0,
                pool: vec![
                    ObjectArchetype::new(keys::OBJECT_COVER_POST, Footprint::Single),
                    ObjectArchetype::new(keys::OBJECT_COVER_BAR, Footprint::Bar),
                    ObjectArchetype::new(keys::OBJECT_COVER_ELBOW, Footprint::Elbow),
                ],
            },
            Self {
                name: keys::ROOM_STORAGE.to_string(),
                weight: 0.25,
                objects: CountRange::new(2, 5),
                density: 0.2,
                center_biased: false,
                min_spacing: 1.5,
                pool: vec![
                    ObjectArchetype::new(keys::OBJECT_CRATE, Footprint::Single),
                    ObjectArchetype::new(keys::OBJECT_BARREL, Footprint::Single),
                ],
            },
            Self {
                name: keys::ROOM_SHRINE.to_string(),
                weight: 0.15,
                objects: CountRange::new(1, 1),
                density: 1.0,
                center_biased: true,
                min_spacing: 3.0,
                pool: vec![ObjectArchetype::new(keys::OBJECT_ALTAR, Footprint::Single)],
            },
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub area: Area,
    pub rooms: RoomConfig,
    pub corridors: CorridorConfig,
    pub room_types: Vec<RoomTypeConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            area: Area::default(),
            rooms: RoomConfig::default(),
            corridors: CorridorConfig::default(),
            room_types: RoomTypeConfig::build_default_table(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("area.min.x", self.area.min.x),
            ("area.min.y", self.area.min.y),
            ("area.max.x", self.area.max.x),
            ("area.max.y", self.area.max.y),
        ] {
            if value.unsigned_abs() > MAX_COORDINATE.unsigned_abs() {
                return Err(ConfigError::CoordinateOutOfRange {
                    field,
                    value,
                    limit: MAX_COORDINATE,
                });
            }
        }
        let area = self.area.to_rect();
        if area.is_empty() {
            return Err(ConfigError::EmptyArea {
                min_x: self.area.min.x,
                min_y: self.area.min.y,
                max_x: self.area.max.x,
                max_y: self.area.max.y,
            });
        }

        check_count("rooms.count", self.rooms.count)?;
        self.rooms.width.check_sizes("rooms.width")?;
        self.rooms.height.check_sizes("rooms.height")?;
        if self.rooms.separation < 0 {
            return Err(ConfigError::Negative {
                field: "rooms.separation",
                value: f64::from(self.rooms.separation),
            });
        }
        check_extent("rooms.separation", self.rooms.separation)?;

        let corridors = &self.corridors;
        corridors.width.check_sizes("corridors.width")?;
        corridors.extra_connections.check("corridors.extra_connections")?;
        check_probability("corridors.curve_probability", corridors.curve_probability)?;
        check_probability("corridors.connection_density", corridors.connection_density)?;
        check_non_negative("corridors.min_curve_length", corridors.min_curve_length)?;

        for room_type in &self.room_types {
            if !room_type.weight.is_finite() || room_type.weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    name: room_type.name.clone(),
                    weight: room_type.weight,
                });
            }
            room_type.objects.check("room_types.objects")?;
            check_probability("room_types.density", room_type.density)?;
            check_non_negative("room_types.min_spacing", room_type.min_spacing)?;
        }

        let total_weight: f64 = self.room_types.iter().map(|room_type| room_type.weight).sum();
        if total_weight <= 0.0
            && let Some(stocked) =
                self.room_types.iter().find(|room_type| !room_type.pool.is_empty())
        {
            return Err(ConfigError::ZeroWeightTable { name: stocked.name.clone() });
        }

        Ok(())
    }
}

fn check_count(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value > MAX_COUNT {
        return Err(ConfigError::TooLarge {
            field,
            value: u64::try_from(value).unwrap_or(u64::MAX),
            limit: MAX_COUNT as u64,
        });
    }
    Ok(())
}

fn check_extent(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value > MAX_EXTENT {
        return Err(ConfigError::TooLarge {
            field,
            value: u64::from(value.unsigned_abs()),
            limit: u64::from(MAX_EXTENT.unsigned_abs()),
        });
    }
    Ok(())
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidProbability { field, value });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_nan() || value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}
