//! Turns a configuration into searchers and a ready-to-use grid

use crate::configuration::AutoTileConfiguration;
use crate::ConfigError;
use libre_autotile_core::DEFAULT_WILDCARD_ID;
use libre_autotile_grid::{TilingGrid, TilingGridBuilder};
use libre_autotile_search::PatternSearcher;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Builds one [`PatternSearcher`] per tile definition and wires them into a
/// [`TilingGrid`].
#[derive(Debug, Clone)]
pub struct AutoTilerComposer {
    configuration: AutoTileConfiguration,
    require_images: Option<PathBuf>,
}

impl AutoTilerComposer {
    pub fn new(configuration: AutoTileConfiguration) -> Self {
        Self {
            configuration,
            require_images: None,
        }
    }

    /// Fail composition when a referenced image is missing from `base_dir`
    pub fn require_images(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.require_images = Some(base_dir.into());
        self
    }

    pub fn configuration(&self) -> &AutoTileConfiguration {
        &self.configuration
    }

    /// Wildcard id the searchers are built with
    pub fn wildcard_id(&self) -> i32 {
        self.configuration.wildcard_id.unwrap_or(DEFAULT_WILDCARD_ID)
    }

    /// One searcher per tile id. Entries are added in image name, then atlas
    /// position, then mask order.
    pub fn searchers(&self) -> Result<HashMap<i32, PatternSearcher>, ConfigError> {
        self.configuration.validate()?;
        if let Some(base_dir) = &self.require_images {
            self.configuration.verify_files(base_dir)?;
        }

        let wildcard = self.wildcard_id();
        let mut searchers = HashMap::with_capacity(self.configuration.tile_definitions.len());

        for (&tile_id, definition) in &self.configuration.tile_definitions {
            let id = i32::try_from(tile_id).map_err(|_| ConfigError::TileIdOutOfRange(tile_id))?;
            let searcher = PatternSearcher::with_wildcard(definition.entries(), wildcard);
            debug!(tile_id = id, name = %definition.name, entries = searcher.len(), "composed searcher");
            searchers.insert(id, searcher);
        }

        Ok(searchers)
    }

    /// A grid builder preloaded with this configuration's searchers, for
    /// callers that want a non-default lock strategy or cascade policy
    pub fn builder(&self, layer_count: usize) -> Result<TilingGridBuilder, ConfigError> {
        Ok(TilingGrid::builder(layer_count, self.searchers()?))
    }

    pub fn tiling_grid(&self, layer_count: usize) -> Result<TilingGrid, ConfigError> {
        let grid = self.builder(layer_count)?.build()?;
        info!(
            layers = layer_count,
            tiles = self.configuration.tile_definitions.len(),
            tile_size = self.configuration.tile_size,
            "composed tiling grid"
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{TileDefinition, TileMaskDefinition};
    use libre_autotile_core::{AtlasRef, GridPos, Pattern};
    use libre_autotile_grid::{GridError, LockStrategy};

    fn configuration() -> AutoTileConfiguration {
        let grass = TileMaskDefinition::new()
            .with_mask(GridPos::new(1, 0), Pattern::EMPTY)
            .with_mask(GridPos::new(0, 0), Pattern::filled(0));
        let water = TileMaskDefinition::new().with_mask(
            GridPos::new(0, 0),
            Pattern::new([-2, 1, -2, 1, -2, 1, -2, 1]),
        );
        AutoTileConfiguration::new(16)
            .with_tile(0, TileDefinition::new("grass").with_image("grass.png", grass))
            .with_tile(1, TileDefinition::new("water").with_image("water.png", water))
    }

    #[test]
    fn test_searchers_keyed_by_tile_id() {
        let searchers = AutoTilerComposer::new(configuration()).searchers().unwrap();
        assert_eq!(searchers.len(), 2);

        let grass = &searchers[&0];
        assert_eq!(grass.len(), 2);
        // Sorted by atlas position, so (0,0) comes first
        assert_eq!(grass.entries()[0].atlas, AtlasRef::new(GridPos::new(0, 0), "grass.png"));
        assert_eq!(
            grass.find_best_match(&Pattern::EMPTY).atlas,
            AtlasRef::new(GridPos::new(1, 0), "grass.png")
        );
        assert_eq!(searchers[&1].wildcard(), DEFAULT_WILDCARD_ID);
    }

    #[test]
    fn test_wildcard_override_reaches_searchers() {
        let composer = AutoTilerComposer::new(configuration().with_wildcard_id(-9));
        assert_eq!(composer.wildcard_id(), -9);
        let searchers = composer.searchers().unwrap();
        assert!(searchers.values().all(|s| s.wildcard() == -9));
    }

    #[test]
    fn test_tiling_grid_places_configured_tiles() {
        let grid = AutoTilerComposer::new(configuration()).tiling_grid(2).unwrap();
        assert_eq!(grid.tile_ids(), [0, 1]);

        grid.place_tile(1, GridPos::ZERO, 0).unwrap();
        let cell = grid.get_tile(1, GridPos::ZERO).unwrap();
        assert_eq!(cell.atlas, AtlasRef::new(GridPos::new(1, 0), "grass.png"));
    }

    #[test]
    fn test_builder_keeps_grid_options() {
        let grid = AutoTilerComposer::new(configuration())
            .builder(1)
            .unwrap()
            .lock_strategy(LockStrategy::PerKey)
            .build()
            .unwrap();
        assert_eq!(grid.strategy(), LockStrategy::PerKey);
    }

    #[test]
    fn test_zero_layers_is_a_grid_error() {
        let err = AutoTilerComposer::new(configuration()).tiling_grid(0).unwrap_err();
        assert!(matches!(err, ConfigError::Grid(GridError::NoLayers)));
    }

    #[test]
    fn test_missing_images_fail_when_required() {
        let dir = tempfile::tempdir().unwrap();
        let err = AutoTilerComposer::new(configuration())
            .require_images(dir.path())
            .searchers()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingImage(path) if path == dir.path().join("grass.png")));
    }
}
