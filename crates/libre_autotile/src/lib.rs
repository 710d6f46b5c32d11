//! libre_autotile
//!
//! Single import for the auto-tiling workspace:
//! - [`model`] - patterns, positions, atlas references and cell state
//! - [`search`] - the per-tile-type pattern searcher
//! - [`grid`] - the layered tiling grid and the batch dispatcher
//! - [`config`] - JSON tile definitions and the composer (feature `config`)
//!
//! Most applications only need the [`prelude`]:
//!
//! ```
//! use libre_autotile::prelude::*;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let searcher = PatternSearcher::new([
//!     PatternEntry::new(Pattern::EMPTY, AtlasRef::new(GridPos::new(0, 0), "dirt.png")),
//!     PatternEntry::new(Pattern::filled(0), AtlasRef::new(GridPos::new(1, 0), "dirt.png")),
//! ]);
//! let grid = TilingGrid::new(1, HashMap::from([(0, searcher)])).unwrap();
//!
//! let drawer = Arc::new(MemoryDrawer::new());
//! let dispatcher = AutoTileDrawer::new(Arc::new(grid), drawer.clone());
//! dispatcher.draw_tiles(0, &[(GridPos::ZERO, 0)]).unwrap();
//!
//! let drawn = drawer.tile(0, GridPos::ZERO).unwrap();
//! assert_eq!(drawn.atlas, AtlasRef::new(GridPos::new(0, 0), "dirt.png"));
//! ```

pub use libre_autotile_core as model;
pub use libre_autotile_grid as grid;
pub use libre_autotile_search as search;

#[cfg(feature = "config")]
pub use libre_autotile_config as config;

pub mod prelude {
    pub use libre_autotile_core::{
        AtlasRef, CellState, Direction, GridPos, Pattern, PatternEntry, DEFAULT_WILDCARD_ID,
        EMPTY_ID,
    };
    pub use libre_autotile_grid::{
        AutoTileDrawer, CascadePolicy, DispatchError, GridError, LockStrategy, MemoryDrawer,
        TileDrawer, TilingGrid, TilingGridBuilder,
    };
    pub use libre_autotile_search::PatternSearcher;

    #[cfg(feature = "config")]
    pub use libre_autotile_config::{
        AutoTileConfiguration, AutoTilerComposer, ConfigError, TileColor, TileDefinition,
        TileMaskDefinition,
    };
}
