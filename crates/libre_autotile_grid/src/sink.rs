//! Drawing sinks that receive resolved tiles

use libre_autotile_core::{CellState, GridPos};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives resolved cells from the dispatcher. Implementations bind the grid
/// to a renderer and may be called from several threads at once.
pub trait TileDrawer: Send + Sync {
    /// Erase everything drawn so far
    fn clear(&self);

    /// Draw a batch of cells on one layer. A cell with a "none" atlas should
    /// be erased.
    fn draw_tiles(&self, layer: usize, tiles: &[(GridPos, CellState)]);
}

/// A drawer that keeps the last state of every drawn cell in memory.
///
/// Useful for headless runs and for checking what a renderer would show.
#[derive(Debug, Default)]
pub struct MemoryDrawer {
    layers: RwLock<HashMap<usize, HashMap<GridPos, CellState>>>,
    draw_calls: AtomicUsize,
}

impl MemoryDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last drawn state at a position, if it is still visible
    pub fn tile(&self, layer: usize, position: GridPos) -> Option<CellState> {
        self.layers
            .read()
            .get(&layer)
            .and_then(|cells| cells.get(&position))
            .cloned()
    }

    /// Number of visible cells on a layer
    pub fn visible_count(&self, layer: usize) -> usize {
        self.layers.read().get(&layer).map_or(0, HashMap::len)
    }

    /// How many times `draw_tiles` has been called
    pub fn draw_calls(&self) -> usize {
        self.draw_calls.load(Ordering::Relaxed)
    }
}

impl TileDrawer for MemoryDrawer {
    fn clear(&self) {
        self.layers.write().clear();
    }

    fn draw_tiles(&self, layer: usize, tiles: &[(GridPos, CellState)]) {
        self.draw_calls.fetch_add(1, Ordering::Relaxed);
        let mut layers = self.layers.write();
        let cells = layers.entry(layer).or_default();
        for (position, cell) in tiles {
            if cell.atlas.is_none() {
                cells.remove(position);
            } else {
                cells.insert(*position, cell.clone());
            }
        }
    }
}
