//! Integer grid coordinates
//!
//! [`GridPos`] addresses both cells on a tiling grid and tiles inside an
//! atlas image. Its text form is `(x,y)`, which is also how it appears as a
//! key in configuration files.

use crate::pattern::Direction;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a `(x,y)` string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to convert string to position: '{0}'")]
pub struct PositionParseError(pub String);

/// A cell coordinate. Y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ZERO: Self = GridPos::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position of the neighbor in `direction`. Coordinates wrap at the
    /// `i32` edges.
    pub fn neighbor(self, direction: Direction) -> Self {
        self + GridPos::from(direction.offset())
    }

    /// All 8 neighbors, in pattern slot order
    pub fn neighbors(self) -> [GridPos; 8] {
        Direction::ALL.map(|direction| self.neighbor(direction))
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

/// Wrapping component-wise addition
impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl FromStr for GridPos {
    type Err = PositionParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let err = || PositionParseError(text.to_string());
        let inner = text
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;
        let (x, y) = inner.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(GridPos::new(x, y))
    }
}

impl Serialize for GridPos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GridPos {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
