//! Header reading and classification.
//!
//! Only the first [`HEADER_LEN`] bytes of a file are ever read. Anything that
//! goes wrong while reading becomes [`Classification::Unreadable`].

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::signatures::{SignatureEntry, SignatureTable};
use crate::types::{Classification, ClassificationResult};

/// Number of leading bytes inspected.
pub const HEADER_LEN: usize = 8;

/// Reads up to [`HEADER_LEN`] bytes from the start of `path`.
pub fn read_header(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    let file = File::open(path.as_ref())?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    Ok(header)
}

/// Uppercase hex with no separators.
pub fn header_hex(header: &[u8]) -> String {
    hex::encode_upper(header)
}

/// Resolves file headers against a [`SignatureTable`].
///
/// Cloning is cheap; clones share the table.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: Arc<SignatureTable>,
}

impl Classifier {
    pub fn new(table: SignatureTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// The table this classifier resolves against.
    pub fn table(&self) -> &SignatureTable {
        &self.table
    }

    /// Classifies the file at `path`. Read failures are reported as
    /// [`Classification::Unreadable`], never returned as errors.
    pub fn classify(&self, path: impl AsRef<Path>) -> ClassificationResult {
        let path = path.as_ref();

        let outcome = match read_header(path) {
            Ok(header) => {
                debug!(
                    path = %path.display(),
                    header = %header_hex(&header),
                    "Read file header"
                );
                self.classify_bytes(&header)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Error reading file");
                Classification::Unreadable
            }
        };

        ClassificationResult::for_path(path, outcome)
    }

    /// Resolves an in-memory header. Only its first [`HEADER_LEN`] bytes
    /// matter, since no builtin prefix is longer.
    pub fn classify_bytes(&self, header: &[u8]) -> Classification {
        to_classification(self.table.resolve(header))
    }

    /// Starts-with resolution on an already-encoded hex header.
    pub fn classify_hex(&self, header_hex: &str) -> Classification {
        let normalized = header_hex.to_ascii_uppercase();
        to_classification(self.table.resolve_hex(&normalized))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(SignatureTable::builtin())
    }
}

fn to_classification(entry: Option<&SignatureEntry>) -> Classification {
    match entry {
        Some(entry) => Classification::Known {
            type_id: entry.type_id().to_string(),
            danger_score: entry.danger_score(),
        },
        None => Classification::Unknown,
    }
}
