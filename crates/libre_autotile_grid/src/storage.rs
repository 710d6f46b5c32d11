//! Cell storage behind the two locking strategies

use dashmap::DashMap;
use libre_autotile_core::{CellState, GridPos, EMPTY_ID};
use std::collections::HashMap;

/// How a tiling grid guards its cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LockStrategy {
    /// One read/write lock for all layers. A placement and its 8 neighbor
    /// updates are observed together by readers.
    #[default]
    WholeGrid,
    /// Sharded per-position locking. Placements on distant cells never
    /// contend and adjacent placements reconcile their slots afterwards, but
    /// readers may observe a neighborhood mid-update. Concurrent placements
    /// on the same position may leave a neighbor slot naming the loser.
    PerKey,
}

/// Whether neighbor updates create cells that were never placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CascadePolicy {
    /// Every neighbor update writes back, creating unoccupied "phantom"
    /// cells that remember the pattern around them.
    #[default]
    MaterializePhantoms,
    /// Neighbor updates only touch cells that already exist.
    SkipAbsent,
}

impl CascadePolicy {
    pub(crate) fn creates_cells(self) -> bool {
        self == CascadePolicy::MaterializePhantoms
    }
}

/// Minimal map interface the placement routine runs against
pub(crate) trait CellStore {
    /// Occupant at `position`, `EMPTY_ID` when no cell is tracked there
    fn occupant(&self, position: GridPos) -> i32;

    fn remove(&mut self, position: GridPos);

    /// Run `f` on the cell at `position`. A missing cell is created from the
    /// default state when `create` is set and skipped otherwise.
    fn update<F: FnOnce(&mut CellState)>(&mut self, position: GridPos, create: bool, f: F);
}

impl CellStore for HashMap<GridPos, CellState> {
    fn occupant(&self, position: GridPos) -> i32 {
        self.get(&position).map_or(EMPTY_ID, |cell| cell.occupant)
    }

    fn remove(&mut self, position: GridPos) {
        HashMap::remove(self, &position);
    }

    fn update<F: FnOnce(&mut CellState)>(&mut self, position: GridPos, create: bool, f: F) {
        if create {
            f(self.entry(position).or_default());
        } else if let Some(cell) = self.get_mut(&position) {
            f(cell);
        }
    }
}

impl CellStore for &DashMap<GridPos, CellState> {
    fn occupant(&self, position: GridPos) -> i32 {
        self.get(&position).map_or(EMPTY_ID, |cell| cell.occupant)
    }

    fn remove(&mut self, position: GridPos) {
        DashMap::remove(*self, &position);
    }

    fn update<F: FnOnce(&mut CellState)>(&mut self, position: GridPos, create: bool, f: F) {
        if create {
            let mut cell = self.entry(position).or_default();
            f(&mut *cell);
        } else if let Some(mut cell) = self.get_mut(&position) {
            f(&mut *cell);
        }
    }
}

/// Per-layer cell maps for either strategy
#[derive(Debug)]
pub(crate) enum Layers {
    WholeGrid(parking_lot::RwLock<Vec<HashMap<GridPos, CellState>>>),
    PerKey(Vec<DashMap<GridPos, CellState>>),
}

impl Layers {
    pub fn new(strategy: LockStrategy, layer_count: usize) -> Self {
        match strategy {
            LockStrategy::WholeGrid => {
                Layers::WholeGrid(parking_lot::RwLock::new(vec![HashMap::new(); layer_count]))
            }
            LockStrategy::PerKey => Layers::PerKey((0..layer_count).map(|_| DashMap::new()).collect()),
        }
    }

    pub fn strategy(&self) -> LockStrategy {
        match self {
            Layers::WholeGrid(_) => LockStrategy::WholeGrid,
            Layers::PerKey(_) => LockStrategy::PerKey,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libre_autotile_core::Pattern;

    fn exercise<S: CellStore>(store: &mut S) {
        let origin = GridPos::ZERO;
        assert_eq!(store.occupant(origin), EMPTY_ID);

        // Skipped when absent and not creating
        store.update(origin, false, |cell| cell.occupant = 3);
        assert_eq!(store.occupant(origin), EMPTY_ID);

        store.update(origin, true, |cell| cell.occupant = 3);
        assert_eq!(store.occupant(origin), 3);

        store.update(origin, false, |cell| cell.pattern = Pattern::filled(1));
        assert_eq!(store.occupant(origin), 3);

        store.remove(origin);
        assert_eq!(store.occupant(origin), EMPTY_ID);
    }

    #[test]
    fn test_hashmap_store() {
        let mut map: HashMap<GridPos, CellState> = HashMap::new();
        exercise(&mut map);
        assert!(map.is_empty());
    }

    #[test]
    fn test_dashmap_store() {
        let map: DashMap<GridPos, CellState> = DashMap::new();
        let mut store = &map;
        exercise(&mut store);
        assert!(map.is_empty());
    }

    #[test]
    fn test_layers_report_strategy() {
        assert_eq!(Layers::new(LockStrategy::WholeGrid, 2).strategy(), LockStrategy::WholeGrid);
        assert_eq!(Layers::new(LockStrategy::PerKey, 2).strategy(), LockStrategy::PerKey);
        assert_eq!(LockStrategy::default(), LockStrategy::WholeGrid);
        assert_eq!(CascadePolicy::default(), CascadePolicy::MaterializePhantoms);
    }
}
