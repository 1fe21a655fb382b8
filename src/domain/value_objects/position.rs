//! Validated 2D map positions

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A point on the game map, relative to the map origin.
///
/// Both coordinates are non-negative. Points may exceed the current map
/// bounds; the map grows to fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct MapPosition {
    x: f64,
    y: f64,
}

impl MapPosition {
    /// Create a validated map position.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if either coordinate is
    /// negative (or not a number).
    pub fn new(x: f64, y: f64) -> Result<Self, DomainError> {
        if !(x >= 0.0 && y >= 0.0) {
            return Err(DomainError::invalid_argument(format!(
                "map position ({x}, {y}) must have non-negative coordinates"
            )));
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Wire format; validation re-runs on deserialization
#[derive(Deserialize)]
struct RawPosition {
    x: f64,
    y: f64,
}

impl TryFrom<RawPosition> for MapPosition {
    type Error = DomainError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y)
    }
}
