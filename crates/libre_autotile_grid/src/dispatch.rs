//! Batch dispatcher between callers, the tiling grid and a drawing sink

use crate::error::{DispatchError, GridError};
use crate::grid::TilingGrid;
use crate::sink::TileDrawer;
use libre_autotile_core::{CellState, GridPos};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};
use uuid::Uuid;

/// A background batch that has not been collected by [`AutoTileDrawer::wait`]
struct PendingBatch {
    id: Uuid,
    handle: JoinHandle<Result<usize, DispatchError>>,
}

/// Applies batches of placements to a [`TilingGrid`] and pushes every cell
/// they touched to a [`TileDrawer`] in a single call.
///
/// Batches can run on the calling thread with [`draw_tiles`](Self::draw_tiles)
/// or on a background thread with [`draw_tiles_async`](Self::draw_tiles_async).
pub struct AutoTileDrawer {
    grid: Arc<TilingGrid>,
    drawer: Arc<dyn TileDrawer>,
    pending: Mutex<Vec<PendingBatch>>,
}

impl AutoTileDrawer {
    pub fn new(grid: Arc<TilingGrid>, drawer: Arc<dyn TileDrawer>) -> Self {
        Self {
            grid,
            drawer,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn grid(&self) -> &Arc<TilingGrid> {
        &self.grid
    }

    /// Current state of a cell
    pub fn get_tile(&self, layer: usize, position: GridPos) -> Result<CellState, DispatchError> {
        Ok(self.grid.get_tile(layer, position)?)
    }

    /// Place every `(position, tile_id)` in order, then draw the touched cells.
    ///
    /// The whole batch is validated first, so an invalid layer or tile id
    /// leaves both the grid and the drawer untouched.
    pub fn draw_tiles(&self, layer: usize, tiles: &[(GridPos, i32)]) -> Result<(), DispatchError> {
        let drawn = run_batch(&self.grid, self.drawer.as_ref(), layer, tiles)?;
        debug!(layer, tiles = tiles.len(), drawn, "drew batch");
        Ok(())
    }

    /// Run a batch on a background thread. Returns the batch id; failures are
    /// reported by [`wait`](Self::wait).
    pub fn draw_tiles_async(
        &self,
        layer: usize,
        tiles: Vec<(GridPos, i32)>,
    ) -> Result<Uuid, DispatchError> {
        let id = Uuid::new_v4();
        let grid = Arc::clone(&self.grid);
        let drawer = Arc::clone(&self.drawer);
        let count = tiles.len();

        let handle = thread::Builder::new()
            .name(format!("autotile-batch-{id}"))
            .spawn(move || run_batch(&grid, drawer.as_ref(), layer, &tiles).map_err(DispatchError::from))?;

        self.pending.lock().push(PendingBatch { id, handle });
        debug!(batch = %id, layer, tiles = count, "queued background batch");
        Ok(id)
    }

    /// Block until every queued background batch has finished.
    ///
    /// All batches are joined even when one fails; the first failure is
    /// returned.
    pub fn wait(&self) -> Result<(), DispatchError> {
        let batches = std::mem::take(&mut *self.pending.lock());
        let mut first_error = None;

        for PendingBatch { id, handle } in batches {
            let outcome = handle
                .join()
                .map_err(|_| DispatchError::WorkerPanicked)
                .and_then(|result| result);
            match outcome {
                Ok(drawn) => debug!(batch = %id, drawn, "background batch finished"),
                Err(err) => {
                    warn!(batch = %id, error = %err, "background batch failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Background batches queued and not yet collected by `wait`
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Redraw the given positions from the grid's current state
    pub fn update_tiles(&self, layer: usize, positions: &[GridPos]) -> Result<(), DispatchError> {
        let tiles = self.grid.get_tiles(layer, positions)?;
        self.drawer.draw_tiles(layer, &tiles);
        Ok(())
    }

    /// Erase the rendered output, then empty the grid
    pub fn clear(&self) {
        self.drawer.clear();
        self.grid.clear();
    }
}

/// Validate, place and draw one batch. Returns the number of cells drawn.
fn run_batch(
    grid: &TilingGrid,
    drawer: &dyn TileDrawer,
    layer: usize,
    tiles: &[(GridPos, i32)],
) -> Result<usize, GridError> {
    grid.validate_layer(layer)?;
    for &(_, tile_id) in tiles {
        grid.validate_tile_id(tile_id)?;
    }
    if tiles.is_empty() {
        return Ok(0);
    }

    let mut seen = HashSet::with_capacity(tiles.len() * 9);
    let mut touched = Vec::with_capacity(tiles.len() * 9);
    for &(position, tile_id) in tiles {
        for cell in grid.place_tile_touched(layer, position, tile_id)? {
            if seen.insert(cell) {
                touched.push(cell);
            }
        }
    }

    let cells = grid.get_tiles(layer, &touched)?;
    drawer.draw_tiles(layer, &cells);
    Ok(cells.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemoryDrawer;
    use libre_autotile_core::{AtlasRef, Pattern, PatternEntry};
    use libre_autotile_search::PatternSearcher;
    use std::collections::HashMap;

    #[derive(Default)]
    struct RecordingDrawer {
        calls: Mutex<Vec<(usize, Vec<(GridPos, CellState)>)>>,
        clears: Mutex<usize>,
    }

    impl TileDrawer for RecordingDrawer {
        fn clear(&self) {
            *self.clears.lock() += 1;
        }

        fn draw_tiles(&self, layer: usize, tiles: &[(GridPos, CellState)]) {
            self.calls.lock().push((layer, tiles.to_vec()));
        }
    }

    fn grid() -> Arc<TilingGrid> {
        let mut searchers = HashMap::new();
        searchers.insert(
            0,
            PatternSearcher::new(vec![PatternEntry::new(
                Pattern::EMPTY,
                AtlasRef::new(GridPos::new(1, 0), "a.png"),
            )]),
        );
        Arc::new(TilingGrid::new(1, searchers).unwrap())
    }

    #[test]
    fn test_batch_draws_touched_set_once() {
        let drawer = Arc::new(RecordingDrawer::default());
        let dispatcher = AutoTileDrawer::new(grid(), drawer.clone());

        dispatcher
            .draw_tiles(0, &[(GridPos::ZERO, 0), (GridPos::new(1, 0), 0)])
            .unwrap();

        let calls = drawer.calls.lock();
        assert_eq!(calls.len(), 1);
        let (layer, tiles) = &calls[0];
        assert_eq!(*layer, 0);
        // Two adjacent cells touch a 4x3 block
        assert_eq!(tiles.len(), 12);
        let centre = tiles.iter().find(|(p, _)| *p == GridPos::ZERO).unwrap();
        assert_eq!(centre.1.occupant, 0);
    }

    #[test]
    fn test_invalid_batch_is_rejected_before_drawing() {
        let drawer = Arc::new(RecordingDrawer::default());
        let dispatcher = AutoTileDrawer::new(grid(), drawer.clone());

        let err = dispatcher
            .draw_tiles(0, &[(GridPos::ZERO, 0), (GridPos::new(5, 5), 9)])
            .unwrap_err();
        assert!(matches!(err, DispatchError::Grid(GridError::UnknownTileId(9))));
        assert!(drawer.calls.lock().is_empty());
        assert_eq!(dispatcher.grid().cell_count(0).unwrap(), 0);

        assert!(dispatcher.draw_tiles(3, &[(GridPos::ZERO, 0)]).is_err());
    }

    #[test]
    fn test_async_batches_drain_on_wait() {
        let drawer = Arc::new(MemoryDrawer::new());
        let dispatcher = AutoTileDrawer::new(grid(), drawer.clone());

        for row in 0..4 {
            let tiles = (0..4).map(|x| (GridPos::new(x * 3, row * 3), 0)).collect();
            dispatcher.draw_tiles_async(0, tiles).unwrap();
        }
        dispatcher.wait().unwrap();

        assert_eq!(dispatcher.pending(), 0);
        assert_eq!(drawer.draw_calls(), 4);
        assert_eq!(drawer.visible_count(0), 16);
        for row in 0..4 {
            for x in 0..4 {
                assert_eq!(dispatcher.get_tile(0, GridPos::new(x * 3, row * 3)).unwrap().occupant, 0);
            }
        }
    }

    #[test]
    fn test_async_error_surfaces_from_wait() {
        let drawer = Arc::new(RecordingDrawer::default());
        let dispatcher = AutoTileDrawer::new(grid(), drawer.clone());

        dispatcher.draw_tiles_async(0, vec![(GridPos::ZERO, 0)]).unwrap();
        dispatcher.draw_tiles_async(0, vec![(GridPos::new(9, 9), 42)]).unwrap();

        let err = dispatcher.wait().unwrap_err();
        assert!(matches!(err, DispatchError::Grid(GridError::UnknownTileId(42))));
        assert_eq!(dispatcher.pending(), 0);
        assert_eq!(drawer.calls.lock().len(), 1);
    }

    #[test]
    fn test_clear_resets_drawer_and_grid() {
        let drawer = Arc::new(RecordingDrawer::default());
        let dispatcher = AutoTileDrawer::new(grid(), drawer.clone());

        dispatcher.draw_tiles(0, &[(GridPos::ZERO, 0)]).unwrap();
        dispatcher.clear();

        assert_eq!(*drawer.clears.lock(), 1);
        assert_eq!(dispatcher.grid().cell_count(0).unwrap(), 0);
    }

    #[test]
    fn test_update_tiles_redraws_requested_positions() {
        let drawer = Arc::new(RecordingDrawer::default());
        let dispatcher = AutoTileDrawer::new(grid(), drawer.clone());
        dispatcher.grid().place_tile(0, GridPos::ZERO, 0).unwrap();

        dispatcher.update_tiles(0, &[GridPos::ZERO, GridPos::new(7, 7)]).unwrap();

        let calls = drawer.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1[0].1.occupant, 0);
        assert_eq!(calls[0].1[1].1, CellState::default());
    }
}
