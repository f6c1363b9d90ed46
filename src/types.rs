//! Value types shared by the classifier, the risk mapping and the drivers.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MIN_DANGER_SCORE: u8 = 1;
pub const MAX_DANGER_SCORE: u8 = 10;

/// Type label reported when a header was read but nothing in the table matched.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Heuristic risk rating of a file type, always within 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DangerScore(u8);

impl DangerScore {
    /// Fails with [`Error::InvalidScore`] outside 1..=10.
    pub fn new(value: u8) -> Result<Self> {
        if (MIN_DANGER_SCORE..=MAX_DANGER_SCORE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidScore(value))
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DangerScore {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DangerScore> for u8 {
    fn from(score: DangerScore) -> Self {
        score.0
    }
}

impl fmt::Display for DangerScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of resolving one header against the signature table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The header could not be read at all.
    Unreadable,
    /// The header was read but no signature prefixes it.
    Unknown,
    /// The first matching signature.
    Known {
        type_id: String,
        danger_score: DangerScore,
    },
}

impl Classification {
    pub fn type_id(&self) -> Option<&str> {
        match self {
            Classification::Unreadable => None,
            Classification::Unknown => Some(UNKNOWN_TYPE),
            Classification::Known { type_id, .. } => Some(type_id),
        }
    }

    pub fn danger_score(&self) -> Option<DangerScore> {
        match self {
            Classification::Known { danger_score, .. } => Some(*danger_score),
            _ => None,
        }
    }
}

/// A [`Classification`] together with the name of the file it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    file_name: String,
    outcome: Classification,
}

impl ClassificationResult {
    pub fn new(file_name: impl Into<String>, outcome: Classification) -> Self {
        Self {
            file_name: file_name.into(),
            outcome,
        }
    }

    /// Builds a result named after the last component of `path`.
    pub fn for_path(path: &Path, outcome: Classification) -> Self {
        Self::new(display_name(path), outcome)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn outcome(&self) -> &Classification {
        &self.outcome
    }

    pub fn type_id(&self) -> Option<&str> {
        self.outcome.type_id()
    }

    pub fn danger_score(&self) -> Option<DangerScore> {
        self.outcome.danger_score()
    }

    /// False only for [`Classification::Unreadable`].
    pub fn is_readable(&self) -> bool {
        self.outcome != Classification::Unreadable
    }
}

/// Last path component, or the whole path when there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
