//! Tile definitions: which atlas cells draw a tile type, and for which patterns

use crate::color::TileColor;
use crate::ConfigError;
use libre_autotile_core::{AtlasRef, GridPos, Pattern, PatternEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name given to definitions that do not set one
pub const UNNAMED_TILE: &str = "<NONE>";

/// Patterns drawn by each atlas position of a single image.
///
/// Masks are kept as raw integer lists so an entry with the wrong length can
/// be reported with its location instead of as a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMaskDefinition {
    #[serde(default)]
    pub atlas_position_to_tile_masks: BTreeMap<GridPos, Vec<Vec<i32>>>,
}

impl TileMaskDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register another mask for an atlas position
    pub fn with_mask(mut self, position: GridPos, mask: Pattern) -> Self {
        self.atlas_position_to_tile_masks
            .entry(position)
            .or_default()
            .push(mask.slots().to_vec());
        self
    }

    /// Check that every mask has exactly 8 slots
    pub fn validate(&self, tile_id: u32, image: &str) -> Result<(), ConfigError> {
        for (position, masks) in &self.atlas_position_to_tile_masks {
            if let Some(mask) = masks.iter().find(|mask| mask.len() != 8) {
                return Err(ConfigError::InvalidMask {
                    tile_id,
                    image: image.to_string(),
                    position: *position,
                    length: mask.len(),
                });
            }
        }
        Ok(())
    }

    /// Searcher entries for one image, in atlas position order
    pub fn entries<'a>(&'a self, image: &'a str) -> impl Iterator<Item = PatternEntry> + 'a {
        self.atlas_position_to_tile_masks
            .iter()
            .flat_map(move |(position, masks)| {
                masks.iter().filter_map(move |mask| {
                    let pattern = Pattern::from_slice(mask).ok()?;
                    Some(PatternEntry::new(pattern, AtlasRef::new(*position, image)))
                })
            })
    }

    pub fn mask_count(&self) -> usize {
        self.atlas_position_to_tile_masks.values().map(Vec::len).sum()
    }
}

/// Everything needed to draw one tile type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDefinition {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub color: TileColor,
    /// Tiles sharing a group connect visually. `-1` means no group.
    #[serde(default = "default_connection_group")]
    pub connection_group: i32,
    #[serde(default)]
    pub image_file_name_to_tile_mask_definition: BTreeMap<String, TileMaskDefinition>,
}

fn default_name() -> String {
    UNNAMED_TILE.to_string()
}

fn default_connection_group() -> i32 {
    -1
}

impl Default for TileDefinition {
    fn default() -> Self {
        Self {
            name: default_name(),
            color: TileColor::default(),
            connection_group: default_connection_group(),
            image_file_name_to_tile_mask_definition: BTreeMap::new(),
        }
    }
}

impl TileDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: TileColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_connection_group(mut self, group: i32) -> Self {
        self.connection_group = group;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>, masks: TileMaskDefinition) -> Self {
        self.image_file_name_to_tile_mask_definition.insert(image.into(), masks);
        self
    }

    pub fn validate(&self, tile_id: u32) -> Result<(), ConfigError> {
        for (image, masks) in &self.image_file_name_to_tile_mask_definition {
            masks.validate(tile_id, image)?;
        }
        Ok(())
    }

    /// Image file names referenced by this definition
    pub fn image_files(&self) -> impl Iterator<Item = &str> {
        self.image_file_name_to_tile_mask_definition.keys().map(String::as_str)
    }

    /// Every (pattern, atlas) pair, sorted by image then atlas position.
    /// Masks with the wrong length are skipped; call `validate` first.
    pub fn entries(&self) -> impl Iterator<Item = PatternEntry> + '_ {
        self.image_file_name_to_tile_mask_definition
            .iter()
            .flat_map(|(image, masks)| masks.entries(image))
    }
}
