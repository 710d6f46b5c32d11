//! Error types for the tiling grid and the dispatcher

use thiserror::Error;

/// Precondition failures rejected before the grid is touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Grid does not contain layer {layer} (layer count: {layer_count})")]
    InvalidLayer { layer: usize, layer_count: usize },
    #[error("Tile of id does not exist: {0}")]
    UnknownTileId(i32),
    #[error("Layer count must be at least 1")]
    NoLayers,
}

/// Failures reported by the batch dispatcher
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
    #[error("Failed to spawn batch worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Background batch panicked")]
    WorkerPanicked,
}
