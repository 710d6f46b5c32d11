//! Atlas references and registered pattern entries

use crate::pattern::Pattern;
use crate::position::GridPos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points at a single drawable tile: a position inside a source image.
///
/// The default value is the "none" reference, which has no image and
/// tells a renderer to erase the cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtlasRef {
    /// Tile coordinate inside the image
    pub position: GridPos,
    /// Source image identifier (None = no tile)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl AtlasRef {
    pub fn new(position: GridPos, image: impl Into<String>) -> Self {
        Self {
            position,
            image: Some(image.into()),
        }
    }

    /// The "none" reference
    pub const fn none() -> Self {
        Self {
            position: GridPos::ZERO,
            image: None,
        }
    }

    pub const fn is_none(&self) -> bool {
        self.image.is_none()
    }
}

impl fmt::Display for AtlasRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.image {
            Some(image) => write!(f, "({}, {})", self.position, image),
            None => write!(f, "(none)"),
        }
    }
}

/// A hand-authored neighbor configuration and the tile it renders as
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternEntry {
    pub pattern: Pattern,
    pub atlas: AtlasRef,
}

impl PatternEntry {
    pub const fn new(pattern: Pattern, atlas: AtlasRef) -> Self {
        Self { pattern, atlas }
    }
}

impl From<(Pattern, AtlasRef)> for PatternEntry {
    fn from((pattern, atlas): (Pattern, AtlasRef)) -> Self {
        Self::new(pattern, atlas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_default() {
        assert_eq!(AtlasRef::default(), AtlasRef::none());
        assert!(AtlasRef::none().is_none());
        assert!(!AtlasRef::new(GridPos::new(1, 0), "a.png").is_none());
    }

    #[test]
    fn test_atlas_equality_is_by_value() {
        let a = AtlasRef::new(GridPos::new(1, 0), "a.png");
        let b = AtlasRef::new(GridPos::new(1, 0), String::from("a.png"));
        assert_eq!(a, b);
        assert_ne!(a, AtlasRef::new(GridPos::new(1, 0), "b.png"));
        assert_eq!(a.to_string(), "((1,0), a.png)");
    }
}
