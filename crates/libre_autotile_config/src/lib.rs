//! JSON configuration for libre_autotile
//!
//! An [`AutoTileConfiguration`] lists every tile type with the atlas cells
//! that draw it and the neighbor masks each cell is drawn for. The
//! [`AutoTilerComposer`] expands it into one searcher per tile type and
//! builds a [`TilingGrid`](libre_autotile_grid::TilingGrid) from them.
//!
//! ```
//! use libre_autotile_config::{AutoTileConfiguration, AutoTilerComposer};
//!
//! let json = r#"{
//!     "tileSize": 16,
//!     "tileDefinitions": {
//!         "0": {
//!             "name": "grass",
//!             "color": "(0,255,0)",
//!             "imageFileNameToTileMaskDefinition": {
//!                 "grass.png": {
//!                     "atlasPositionToTileMasks": {
//!                         "(0,0)": [[-1,-1,-1,-1,-1,-1,-1,-1]]
//!                     }
//!                 }
//!             }
//!         }
//!     }
//! }"#;
//!
//! let configuration = AutoTileConfiguration::from_json_str(json).unwrap();
//! let grid = AutoTilerComposer::new(configuration).tiling_grid(1).unwrap();
//! assert_eq!(grid.tile_ids(), [0]);
//! ```

mod color;
mod composer;
mod configuration;
mod definition;

pub use color::{ColorParseError, TileColor};
pub use composer::AutoTilerComposer;
pub use configuration::AutoTileConfiguration;
pub use definition::{TileDefinition, TileMaskDefinition, UNNAMED_TILE};

use libre_autotile_core::GridPos;
use libre_autotile_grid::GridError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or composing a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Tile mask length must be 8, but is {length} (tile {tile_id}, image '{image}', atlas position {position})")]
    InvalidMask {
        tile_id: u32,
        image: String,
        position: GridPos,
        length: usize,
    },

    #[error("Same tile name '{name}' used by tiles {first} and {second}")]
    DuplicateName { name: String, first: u32, second: u32 },

    #[error("Image file not found: {}", .0.display())]
    MissingImage(PathBuf),

    #[error("Tile id {0} does not fit in a signed 32-bit id")]
    TileIdOutOfRange(u32),

    #[error("Wildcard id {0} collides with the empty id or a tile id")]
    InvalidWildcard(i32),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}
