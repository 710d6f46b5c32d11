//! The layered tiling grid

use crate::error::GridError;
use crate::storage::{CascadePolicy, CellStore, Layers, LockStrategy};
use libre_autotile_core::{AtlasRef, CellState, Direction, GridPos, Pattern, EMPTY_ID};
use libre_autotile_search::PatternSearcher;
use std::collections::HashMap;
use tracing::{debug, trace};

/// The cell written by a placement followed by its 8 neighbors in slot order
pub fn touched_positions(position: GridPos) -> [GridPos; 9] {
    let neighbors = position.neighbors();
    std::array::from_fn(|i| if i == 0 { position } else { neighbors[i - 1] })
}

/// Per-layer cell state plus one searcher per tile-type.
///
/// The grid is the only writer of cell state. Every placement recomputes the
/// target cell's pattern from its live neighbors, then rewrites the slot that
/// points back at it on each of the 8 neighbors and refreshes their atlas.
/// Layers never interact.
#[derive(Debug)]
pub struct TilingGrid {
    layers: Layers,
    layer_count: usize,
    searchers: HashMap<i32, PatternSearcher>,
    cascade: CascadePolicy,
}

impl TilingGrid {
    /// Create a grid with the default whole-grid lock and phantom cells
    pub fn new(layer_count: usize, searchers: HashMap<i32, PatternSearcher>) -> Result<Self, GridError> {
        TilingGridBuilder::new(layer_count, searchers).build()
    }

    pub fn builder(layer_count: usize, searchers: HashMap<i32, PatternSearcher>) -> TilingGridBuilder {
        TilingGridBuilder::new(layer_count, searchers)
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    pub fn strategy(&self) -> LockStrategy {
        self.layers.strategy()
    }

    pub fn cascade_policy(&self) -> CascadePolicy {
        self.cascade
    }

    /// Registered tile-type ids, sorted
    pub fn tile_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.searchers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn searcher(&self, tile_id: i32) -> Option<&PatternSearcher> {
        self.searchers.get(&tile_id)
    }

    pub fn validate_layer(&self, layer: usize) -> Result<(), GridError> {
        if layer < self.layer_count {
            Ok(())
        } else {
            Err(GridError::InvalidLayer {
                layer,
                layer_count: self.layer_count,
            })
        }
    }

    /// Negative ids clear a cell and are always accepted
    pub fn validate_tile_id(&self, tile_id: i32) -> Result<(), GridError> {
        self.resolve(tile_id).map(|_| ())
    }

    fn resolve(&self, tile_id: i32) -> Result<Option<&PatternSearcher>, GridError> {
        if tile_id < 0 {
            return Ok(None);
        }
        self.searchers
            .get(&tile_id)
            .map(Some)
            .ok_or(GridError::UnknownTileId(tile_id))
    }

    /// Place `tile_id` at `position`, or clear the cell when `tile_id` is negative
    pub fn place_tile(&self, layer: usize, position: GridPos, tile_id: i32) -> Result<(), GridError> {
        self.place_tile_touched(layer, position, tile_id).map(|_| ())
    }

    /// Same as [`place_tile`](Self::place_tile), returning every position the
    /// placement may have written
    pub fn place_tile_touched(
        &self,
        layer: usize,
        position: GridPos,
        tile_id: i32,
    ) -> Result<[GridPos; 9], GridError> {
        self.validate_layer(layer)?;
        let searcher = self.resolve(tile_id)?;

        match &self.layers {
            Layers::WholeGrid(lock) => {
                let mut layers = lock.write();
                self.write_placement(&mut layers[layer], position, tile_id, searcher);
            }
            Layers::PerKey(layers) => {
                let mut store = &layers[layer];
                if let Some(written) = self.write_placement(&mut store, position, tile_id, searcher) {
                    self.reconcile_center(&mut store, position, written);
                }
            }
        }

        trace!(layer, position = %position, tile_id, "placed tile");
        Ok(touched_positions(position))
    }

    /// Write the center cell and cascade into its neighbors. Returns the
    /// pattern written to an occupied center.
    fn write_placement<S: CellStore>(
        &self,
        store: &mut S,
        position: GridPos,
        tile_id: i32,
        searcher: Option<&PatternSearcher>,
    ) -> Option<Pattern> {
        let (occupant, written) = match searcher {
            Some(searcher) => {
                let pattern = Pattern::new(position.neighbors().map(|p| store.occupant(p)));
                let atlas = searcher.find_best_match(&pattern).atlas;
                store.update(position, true, |cell| {
                    *cell = CellState::new(tile_id, pattern, atlas);
                });
                (tile_id, Some(pattern))
            }
            None => {
                store.remove(position);
                (EMPTY_ID, None)
            }
        };

        let create = self.cascade.creates_cells();
        for direction in Direction::ALL {
            let facing = direction.opposite();
            store.update(position.neighbor(direction), create, |cell| {
                cell.pattern = cell.pattern.with(facing, occupant);
                cell.atlas = self.match_atlas(cell.occupant, &cell.pattern);
            });
        }
        written
    }

    /// Bring an occupied center back in line with its live neighbors.
    ///
    /// Without a grid-wide lock, an adjacent placement can cascade into the
    /// center between our neighbor read and our center write, and the write
    /// discards it. Re-reading after every patch terminates once no neighbor
    /// changed since the last write.
    fn reconcile_center<S: CellStore>(&self, store: &mut S, position: GridPos, mut written: Pattern) {
        loop {
            let live = Pattern::new(position.neighbors().map(|p| store.occupant(p)));
            if live == written {
                return;
            }
            store.update(position, false, |cell| {
                cell.pattern = live;
                cell.atlas = self.match_atlas(cell.occupant, &cell.pattern);
            });
            written = live;
        }
    }

    fn match_atlas(&self, occupant: i32, pattern: &Pattern) -> AtlasRef {
        match self.searchers.get(&occupant) {
            Some(searcher) => searcher.find_best_match(pattern).atlas,
            None => AtlasRef::none(),
        }
    }

    /// Current state of a cell, or the empty state if nothing is tracked there
    pub fn get_tile(&self, layer: usize, position: GridPos) -> Result<CellState, GridError> {
        self.validate_layer(layer)?;
        let cell = match &self.layers {
            Layers::WholeGrid(lock) => lock.read()[layer].get(&position).cloned(),
            Layers::PerKey(layers) => layers[layer].get(&position).map(|cell| cell.value().clone()),
        };
        Ok(cell.unwrap_or_default())
    }

    /// States for several positions. Under the whole-grid lock they are read
    /// as one consistent snapshot.
    pub fn get_tiles(
        &self,
        layer: usize,
        positions: &[GridPos],
    ) -> Result<Vec<(GridPos, CellState)>, GridError> {
        self.validate_layer(layer)?;
        let tiles = match &self.layers {
            Layers::WholeGrid(lock) => {
                let layers = lock.read();
                let cells = &layers[layer];
                positions
                    .iter()
                    .map(|&p| (p, cells.get(&p).cloned().unwrap_or_default()))
                    .collect()
            }
            Layers::PerKey(layers) => {
                let cells = &layers[layer];
                positions
                    .iter()
                    .map(|&p| (p, cells.get(&p).map(|cell| cell.value().clone()).unwrap_or_default()))
                    .collect()
            }
        };
        Ok(tiles)
    }

    /// Every tracked position on a layer, phantom cells included
    pub fn get_all_positions(&self, layer: usize) -> Result<Vec<GridPos>, GridError> {
        self.validate_layer(layer)?;
        let positions = match &self.layers {
            Layers::WholeGrid(lock) => lock.read()[layer].keys().copied().collect(),
            Layers::PerKey(layers) => layers[layer].iter().map(|entry| *entry.key()).collect(),
        };
        Ok(positions)
    }

    pub fn cell_count(&self, layer: usize) -> Result<usize, GridError> {
        self.validate_layer(layer)?;
        let count = match &self.layers {
            Layers::WholeGrid(lock) => lock.read()[layer].len(),
            Layers::PerKey(layers) => layers[layer].len(),
        };
        Ok(count)
    }

    /// Empty every layer
    pub fn clear(&self) {
        match &self.layers {
            Layers::WholeGrid(lock) => lock.write().iter_mut().for_each(HashMap::clear),
            Layers::PerKey(layers) => layers.iter().for_each(|cells| cells.clear()),
        }
        debug!(layers = self.layer_count, "cleared tiling grid");
    }
}

/// Configures a [`TilingGrid`] before construction
#[derive(Debug)]
pub struct TilingGridBuilder {
    layer_count: usize,
    searchers: HashMap<i32, PatternSearcher>,
    strategy: LockStrategy,
    cascade: CascadePolicy,
}

impl TilingGridBuilder {
    pub fn new(layer_count: usize, searchers: HashMap<i32, PatternSearcher>) -> Self {
        Self {
            layer_count,
            searchers,
            strategy: LockStrategy::default(),
            cascade: CascadePolicy::default(),
        }
    }

    pub fn lock_strategy(mut self, strategy: LockStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn cascade_policy(mut self, cascade: CascadePolicy) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn build(self) -> Result<TilingGrid, GridError> {
        if self.layer_count == 0 {
            return Err(GridError::NoLayers);
        }

        debug!(
            layers = self.layer_count,
            tile_types = self.searchers.len(),
            strategy = ?self.strategy,
            cascade = ?self.cascade,
            "created tiling grid"
        );

        Ok(TilingGrid {
            layers: Layers::new(self.strategy, self.layer_count),
            layer_count: self.layer_count,
            searchers: self.searchers,
            cascade: self.cascade,
        })
    }
}
