//! Neighbor patterns
//!
//! A [`Pattern`] records the tile-type id found in each of the 8 cells
//! surrounding a grid cell. Slots are ordered clockwise from the top-left:
//!
//! ```text
//!   0|1|2
//!   7|X|3
//!   6|5|4
//! ```
//!
//! - Odd indices (1,3,5,7) = Cardinals (Top, Right, Bottom, Left)
//! - Even indices (0,2,4,6) = Corners (TopLeft, TopRight, BottomRight, BottomLeft)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Slot value meaning "no tile here"
pub const EMPTY_ID: i32 = -1;

/// Slot value that matches any tile-type when it appears in a registered pattern
pub const DEFAULT_WILDCARD_ID: i32 = -2;

/// Errors that can occur when building a pattern from raw values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Pattern must have exactly 8 values, but has {0}")]
    InvalidLength(usize),
}

/// One of the 8 neighbor slots of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    TopLeft = 0,
    Top = 1,
    TopRight = 2,
    Right = 3,
    BottomRight = 4,
    Bottom = 5,
    BottomLeft = 6,
    Left = 7,
}

impl Direction {
    /// All directions in slot order
    pub const ALL: [Direction; 8] = [
        Direction::TopLeft,
        Direction::Top,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
    ];

    /// Slot index of this direction (0..8)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Grid offset of the neighbor in this direction.
    ///
    /// Y grows downward, so `Top` is `(0, -1)`.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::TopLeft => (-1, -1),
            Direction::Top => (0, -1),
            Direction::TopRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::BottomRight => (1, 1),
            Direction::Bottom => (0, 1),
            Direction::BottomLeft => (-1, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// The slot on the neighbor that faces back at us
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 4) % 8]
    }

    /// Check if this is a diagonal slot
    pub const fn is_corner(self) -> bool {
        self.index() % 2 == 0
    }

    /// The two cardinals a corner sits between, `None` for cardinals
    pub const fn supporting_cardinals(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::TopLeft => Some((Direction::Top, Direction::Left)),
            Direction::TopRight => Some((Direction::Top, Direction::Right)),
            Direction::BottomRight => Some((Direction::Bottom, Direction::Right)),
            Direction::BottomLeft => Some((Direction::Bottom, Direction::Left)),
            _ => None,
        }
    }
}

/// Tile-type ids of the 8 cells around a center cell.
///
/// Serialized as a plain array of 8 integers in slot order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern([i32; 8]);

impl Pattern {
    /// A pattern with no neighbors at all
    pub const EMPTY: Self = Pattern([EMPTY_ID; 8]);

    pub const fn new(slots: [i32; 8]) -> Self {
        Pattern(slots)
    }

    /// Create a pattern with all slots set to one tile-type
    pub const fn filled(tile_id: i32) -> Self {
        Pattern([tile_id; 8])
    }

    /// Build a pattern from a slice, which must hold exactly 8 values
    pub fn from_slice(values: &[i32]) -> Result<Self, PatternError> {
        let slots: [i32; 8] = values
            .try_into()
            .map_err(|_| PatternError::InvalidLength(values.len()))?;
        Ok(Pattern(slots))
    }

    pub const fn slots(&self) -> &[i32; 8] {
        &self.0
    }

    pub const fn get(&self, direction: Direction) -> i32 {
        self.0[direction.index()]
    }

    /// Copy of this pattern with one slot replaced
    pub fn with(mut self, direction: Direction, tile_id: i32) -> Self {
        self.0[direction.index()] = tile_id;
        self
    }

    /// A corner counts as connected when both cardinals beside it are occupied.
    /// Cardinals are always reported as connected.
    pub fn is_corner_connected(&self, direction: Direction) -> bool {
        match direction.supporting_cardinals() {
            Some((a, b)) => self.get(a) != EMPTY_ID && self.get(b) != EMPTY_ID,
            None => true,
        }
    }

    /// Blank every corner whose supporting cardinals are not both occupied
    pub fn strip_corners(&self) -> Self {
        let mut stripped = *self;
        for direction in Direction::ALL {
            if direction.is_corner() && !self.is_corner_connected(direction) {
                stripped.0[direction.index()] = EMPTY_ID;
            }
        }
        stripped
    }

    /// Check if every slot is empty
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&id| id == EMPTY_ID)
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<[i32; 8]> for Pattern {
    fn from(slots: [i32; 8]) -> Self {
        Pattern(slots)
    }
}

impl TryFrom<&[i32]> for Pattern {
    type Error = PatternError;

    fn try_from(values: &[i32]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern{self}")
    }
}
