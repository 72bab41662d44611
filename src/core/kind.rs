//! Image kinds
//!
//! Every catalog entry exists as an original image plus a protanope
//! (red-blind) rendition. The kind picks both the subdirectory holding the
//! file and the CSV column holding its annotation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Image variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Unmodified image
    Original,
    /// Protanopia-adjusted image
    Protanope,
}

impl ImageKind {
    /// All kinds, in display order
    pub const ALL: [ImageKind; 2] = [ImageKind::Original, ImageKind::Protanope];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Original => "original",
            ImageKind::Protanope => "protanope",
        }
    }

    /// Subdirectory of the images root holding files of this kind
    pub fn dir_name(&self) -> &'static str {
        self.as_str()
    }

    /// Catalog column holding the annotation text for this kind
    pub fn annotation_column(&self) -> &'static str {
        self.as_str()
    }

    /// Comma separated list of accepted names, for error messages
    pub fn expected() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`ImageKind`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid imagetype: {0}. Must be one of: original, protanope")]
pub struct UnknownKind(pub String);

impl FromStr for ImageKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(ImageKind::Original),
            "protanope" => Ok(ImageKind::Protanope),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
