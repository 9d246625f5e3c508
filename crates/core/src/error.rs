//! Configuration errors: the only conditions that abort a generation pass.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("generation area {min_x},{min_y}..{max_x},{max_y} is empty")]
    EmptyArea { min_x: i32, min_y: i32, max_x: i32, max_y: i32 },

    #[error("{field} must be at least 1, got {value}")]
    NonPositiveSize { field: &'static str, value: i32 },

    #[error("{field} must be at most {limit}, got {value}")]
    TooLarge { field: &'static str, value: u64, limit: u64 },

    #[error("{field} coordinate {value} lies outside -{limit}..={limit}")]
    CoordinateOutOfRange { field: &'static str, value: i32, limit: i32 },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange { field: &'static str, min: i64, max: i64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a probability in [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("room type `{name}` has invalid selection weight {weight}")]
    InvalidWeight { name: String, weight: f64 },

    #[error("room type weights sum to zero but `{name}` declares an object pool")]
    ZeroWeightTable { name: String },
}
