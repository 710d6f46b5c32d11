//! Layered tiling grid and batch dispatcher for libre_autotile
//!
//! - [`TilingGrid`] keeps one cell map per layer and one
//!   [`PatternSearcher`](libre_autotile_search::PatternSearcher) per tile-type.
//!   Placing a tile recomputes its pattern from the 8 neighbors and cascades
//!   the change back into each neighbor.
//! - [`AutoTileDrawer`] applies batches of placements and forwards every
//!   touched cell to a [`TileDrawer`] in one call, on the calling thread or in
//!   the background.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use libre_autotile_core::{AtlasRef, GridPos, Pattern, PatternEntry};
//! use libre_autotile_grid::{AutoTileDrawer, MemoryDrawer, TilingGrid};
//! use libre_autotile_search::PatternSearcher;
//!
//! let mut searchers = HashMap::new();
//! searchers.insert(0, PatternSearcher::new(vec![
//!     PatternEntry::new(Pattern::EMPTY, AtlasRef::new(GridPos::new(0, 0), "grass.png")),
//! ]));
//!
//! let grid = Arc::new(TilingGrid::new(1, searchers).unwrap());
//! let drawer = Arc::new(MemoryDrawer::new());
//! let dispatcher = AutoTileDrawer::new(grid, drawer.clone());
//!
//! dispatcher.draw_tiles(0, &[(GridPos::new(2, 3), 0)]).unwrap();
//! assert!(drawer.tile(0, GridPos::new(2, 3)).is_some());
//! ```

mod dispatch;
mod error;
mod grid;
mod sink;
mod storage;

pub use dispatch::AutoTileDrawer;
pub use error::{DispatchError, GridError};
pub use grid::{touched_positions, TilingGrid, TilingGridBuilder};
pub use sink::{MemoryDrawer, TileDrawer};
pub use storage::{CascadePolicy, LockStrategy};
