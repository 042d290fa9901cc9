use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown card face: {0}")]
pub struct ParseFaceError(String);

/// One side of a card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    #[default]
    Term,
    Definition,
}

impl Face {
    pub const ALL: [Face; 2] = [Face::Term, Face::Definition];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Face::Term => Face::Definition,
            Face::Definition => Face::Term,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Face::Term => "term",
            Face::Definition => "definition",
        }
    }

    /// Human-readable label used by the views.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Face::Term => "Term",
            Face::Definition => "Definition",
        }
    }

    /// Upload field name used for images of this face.
    #[must_use]
    pub fn image_field(self) -> &'static str {
        match self {
            Face::Term => "term-image",
            Face::Definition => "definition-image",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An empty value selects the default face (`term`).
impl FromStr for Face {
    type Err = ParseFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "term" => Ok(Face::Term),
            "definition" => Ok(Face::Definition),
            other => Err(ParseFaceError(other.to_string())),
        }
    }
}
