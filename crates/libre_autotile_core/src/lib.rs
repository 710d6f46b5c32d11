//! Core data structures for libre_autotile
//!
//! This crate provides the fundamental types shared by the searcher, the
//! tiling grid and the configuration layer:
//! - `Pattern` - The 8 neighbor tile-type ids around a cell
//! - `Direction` - One of the 8 slots of a pattern, with its grid offset
//! - `GridPos` - Integer cell (or atlas) coordinate
//! - `AtlasRef` - A drawable sub-image: atlas position plus image name
//! - `PatternEntry` - A registered (pattern, atlas) pair
//! - `CellState` - What the grid stores for a single cell

mod atlas;
mod cell;
mod pattern;
mod position;

pub use atlas::{AtlasRef, PatternEntry};
pub use cell::CellState;
pub use pattern::{Direction, Pattern, PatternError, DEFAULT_WILDCARD_ID, EMPTY_ID};
pub use position::{GridPos, PositionParseError};
