//! Display color attached to a tile definition

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a `(r,g,b[,a])` string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to convert string to color: '{0}'")]
pub struct ColorParseError(pub String);

/// RGBA color, written as `"(r,g,b,a)"` in configuration files.
/// Alpha may be omitted on input and defaults to 255.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TileColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TileColor {
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Components as floats in `0.0..=1.0`
    pub fn to_f32_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for TileColor {
    type Err = ColorParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(text.to_string());
        let inner = text
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;

        let components = inner
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| err()))
            .collect::<Result<Vec<u8>, _>>()?;

        match components.as_slice() {
            &[r, g, b] => Ok(Self::rgb(r, g, b)),
            &[r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
            _ => Err(err()),
        }
    }
}

impl Serialize for TileColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TileColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_alpha() {
        assert_eq!("(1,2,3,4)".parse(), Ok(TileColor::rgba(1, 2, 3, 4)));
        assert_eq!("( 10, 20, 30 )".parse(), Ok(TileColor::rgb(10, 20, 30)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("(1,2)".parse::<TileColor>().is_err());
        assert!("(1,2,3,4,5)".parse::<TileColor>().is_err());
        assert!("(256,0,0)".parse::<TileColor>().is_err());
        assert!("1,2,3".parse::<TileColor>().is_err());
    }

    #[test]
    fn test_display_always_has_alpha() {
        assert_eq!(TileColor::rgb(0, 255, 0).to_string(), "(0,255,0,255)");
        assert_eq!(TileColor::WHITE.to_f32_array(), [1.0; 4]);
    }

    #[test]
    fn test_serde_string_form() {
        let json = serde_json::to_string(&TileColor::rgba(9, 8, 7, 6)).unwrap();
        assert_eq!(json, r#""(9,8,7,6)""#);
        let parsed: TileColor = serde_json::from_str(r#""(9,8,7)""#).unwrap();
        assert_eq!(parsed, TileColor::rgb(9, 8, 7));
    }
}
