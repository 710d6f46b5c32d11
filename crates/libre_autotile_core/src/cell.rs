//! Per-cell state kept by the tiling grid

use crate::atlas::AtlasRef;
use crate::pattern::{Pattern, EMPTY_ID};
use serde::{Deserialize, Serialize};

/// What the grid knows about one cell.
///
/// A cell can exist without an occupant: neighbor updates keep a pattern
/// for cells that were never placed so later placements see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    /// Tile-type in this cell, or `EMPTY_ID`
    pub occupant: i32,
    /// Tile-types around this cell as of the last write that touched it
    pub pattern: Pattern,
    /// Tile chosen for `pattern`, "none" when unoccupied
    pub atlas: AtlasRef,
}

impl CellState {
    pub const fn new(occupant: i32, pattern: Pattern, atlas: AtlasRef) -> Self {
        Self {
            occupant,
            pattern,
            atlas,
        }
    }

    pub const fn is_occupied(&self) -> bool {
        self.occupant >= 0
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self {
            occupant: EMPTY_ID,
            pattern: Pattern::EMPTY,
            atlas: AtlasRef::none(),
        }
    }
}
