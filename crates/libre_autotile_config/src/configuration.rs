//! The root configuration document and its JSON file format

use crate::definition::TileDefinition;
use crate::ConfigError;
use libre_autotile_core::EMPTY_ID;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tile size, tile definitions keyed by tile id, and an optional wildcard id
/// override for the searchers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoTileConfiguration {
    pub tile_size: u32,
    #[serde(default)]
    pub tile_definitions: BTreeMap<u32, TileDefinition>,
    #[serde(default)]
    pub wildcard_id: Option<i32>,
}

impl AutoTileConfiguration {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            ..Default::default()
        }
    }

    pub fn with_tile(mut self, tile_id: u32, definition: TileDefinition) -> Self {
        self.tile_definitions.insert(tile_id, definition);
        self
    }

    pub fn with_wildcard_id(mut self, wildcard_id: i32) -> Self {
        self.wildcard_id = Some(wildcard_id);
        self
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let configuration: Self = serde_json::from_str(json)?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Parse and validate a configuration from any reader
    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        let configuration: Self = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Load a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let configuration = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            tiles = configuration.tile_definitions.len(),
            "loaded autotile configuration"
        );
        Ok(configuration)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check mask lengths, name uniqueness, and that tile ids and the
    /// wildcard id fit the searchers' id space
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names: BTreeMap<&str, u32> = BTreeMap::new();

        for (&tile_id, definition) in &self.tile_definitions {
            if i32::try_from(tile_id).is_err() {
                return Err(ConfigError::TileIdOutOfRange(tile_id));
            }
            definition.validate(tile_id)?;

            if let Some(&first) = names.get(definition.name.as_str()) {
                return Err(ConfigError::DuplicateName {
                    name: definition.name.clone(),
                    first,
                    second: tile_id,
                });
            }
            names.insert(&definition.name, tile_id);
        }

        if let Some(wildcard) = self.wildcard_id {
            let collides = u32::try_from(wildcard)
                .is_ok_and(|id| self.tile_definitions.contains_key(&id));
            if wildcard == EMPTY_ID || collides {
                return Err(ConfigError::InvalidWildcard(wildcard));
            }
        }

        Ok(())
    }

    /// Every image file referenced by any tile, without duplicates
    pub fn image_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .tile_definitions
            .values()
            .flat_map(TileDefinition::image_files)
            .collect();
        files.sort_unstable();
        files.dedup();
        files
    }

    /// Check that every referenced image exists under `base_dir`
    pub fn verify_files(&self, base_dir: &Path) -> Result<(), ConfigError> {
        for file in self.image_files() {
            let path: PathBuf = base_dir.join(file);
            if !path.is_file() {
                return Err(ConfigError::MissingImage(path));
            }
        }
        Ok(())
    }

    /// Tile id by definition name
    pub fn tile_id(&self, name: &str) -> Option<u32> {
        self.tile_definitions
            .iter()
            .find(|(_, definition)| definition.name == name)
            .map(|(&id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::TileMaskDefinition;
    use libre_autotile_core::{GridPos, Pattern};

    fn sample() -> AutoTileConfiguration {
        let masks = TileMaskDefinition::new()
            .with_mask(GridPos::new(0, 0), Pattern::EMPTY)
            .with_mask(GridPos::new(1, 0), Pattern::filled(0));
        AutoTileConfiguration::new(16)
            .with_tile(0, TileDefinition::new("grass").with_image("grass.png", masks.clone()))
            .with_tile(1, TileDefinition::new("water").with_image("water.png", masks))
    }

    #[test]
    fn test_json_round_trip() {
        let configuration = sample().with_wildcard_id(-5);
        let json = configuration.to_json_string().unwrap();
        assert!(json.contains("\"tileDefinitions\""));
        assert!(json.contains("\"wildcardId\": -5"));
        assert_eq!(AutoTileConfiguration::from_json_str(&json).unwrap(), configuration);
    }

    #[test]
    fn test_missing_wildcard_is_none() {
        let configuration =
            AutoTileConfiguration::from_json_str(r#"{ "tileSize": 32, "tileDefinitions": {} }"#).unwrap();
        assert_eq!(configuration.tile_size, 32);
        assert_eq!(configuration.wildcard_id, None);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let configuration = sample().with_tile(7, TileDefinition::new("grass"));
        match configuration.validate() {
            Err(ConfigError::DuplicateName { name, first, second }) => {
                assert_eq!(name, "grass");
                assert_eq!((first, second), (0, 7));
            }
            other => panic!("expected DuplicateName, got {other:?}"),
        }
    }

    #[test]
    fn test_wildcard_must_not_collide() {
        assert!(matches!(
            sample().with_wildcard_id(EMPTY_ID).validate(),
            Err(ConfigError::InvalidWildcard(-1))
        ));
        assert!(matches!(
            sample().with_wildcard_id(1).validate(),
            Err(ConfigError::InvalidWildcard(1))
        ));
        assert!(sample().with_wildcard_id(99).validate().is_ok());
    }

    #[test]
    fn test_tile_id_must_fit_i32() {
        let configuration = sample().with_tile(u32::MAX, TileDefinition::new("huge"));
        assert!(matches!(
            configuration.validate(),
            Err(ConfigError::TileIdOutOfRange(u32::MAX))
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            AutoTileConfiguration::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        let bad_color = r#"{ "tileSize": 8, "tileDefinitions": { "0": { "color": "red" } } }"#;
        assert!(matches!(
            AutoTileConfiguration::from_json_str(bad_color),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_image_files_and_lookup() {
        let configuration = sample();
        assert_eq!(configuration.image_files(), ["grass.png", "water.png"]);
        assert_eq!(configuration.tile_id("water"), Some(1));
        assert_eq!(configuration.tile_id("lava"), None);
    }
}
