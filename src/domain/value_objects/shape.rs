//! Opaque geometry descriptor for physical elements

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path data describing an element's outline on the game map.
///
/// The path's origin is the origin of the map, so elements carry no separate
/// position attribute. The content is opaque to the data model; the rendering
/// surface interprets it (SVG path syntax in practice).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapePath(String);

impl ShapePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ShapePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for ShapePath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}
