//! Ordered registry of magic-number signatures.
//!
//! The table is data: an ordered list of `(type, hex prefix, danger score)`
//! records. Resolution is first-match-wins, so the declared order is the
//! tie-break whenever two entries share a prefix (the ZIP container formats,
//! the OLE2 office formats, and the `MZ` executables all do).

use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::DangerScore;

/// Builtin signatures in resolution order.
const BUILTIN_SIGNATURES: &[(&str, &str, u8)] = &[
    ("JPEG", "FFD8FF", 1),
    ("PNG", "89504E47", 1),
    ("GIF", "47494638", 1),
    ("PDF", "25504446", 2),
    ("ZIP", "504B0304", 3),
    ("RAR", "52617221", 3),
    ("EXE", "4D5A", 10),
    ("DLL", "4D5A", 10),
    ("DOC", "D0CF11E0A1B11AE1", 5),
    ("DOCX", "504B0304", 5),
    ("XLS", "D0CF11E0A1B11AE1", 5),
    ("XLSX", "504B0304", 5),
    ("PPT", "D0CF11E0A1B11AE1", 5),
    ("PPTX", "504B0304", 5),
    ("JS", "2F2A", 9),
    ("BAT", "4D5A", 9),
    ("SH", "2321", 9),
    ("ISO", "4344303031", 8),
    ("LNK", "4C00000001140200", 8),
];

/// One magic-number record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub struct SignatureEntry {
    type_id: String,
    prefix_hex: String,
    prefix: Vec<u8>,
    danger_score: DangerScore,
}

impl SignatureEntry {
    /// Validates and normalizes a record. The prefix must be non-empty,
    /// even-length hex; it is stored uppercase.
    pub fn new(type_id: impl Into<String>, prefix_hex: &str, danger_score: u8) -> Result<Self> {
        let type_id = type_id.into();
        let invalid = |reason: String| Error::InvalidSignature {
            type_id: type_id.clone(),
            reason,
        };

        if type_id.trim().is_empty() {
            return Err(invalid("type id is empty".to_string()));
        }
        if prefix_hex.is_empty() {
            return Err(invalid("prefix is empty".to_string()));
        }
        if prefix_hex.len() % 2 != 0 {
            return Err(invalid(format!(
                "prefix '{}' has odd length {}",
                prefix_hex,
                prefix_hex.len()
            )));
        }

        let prefix =
            hex::decode(prefix_hex).map_err(|e| invalid(format!("prefix '{prefix_hex}': {e}")))?;
        let danger_score = DangerScore::new(danger_score)?;

        Ok(Self {
            prefix_hex: prefix_hex.to_ascii_uppercase(),
            type_id,
            prefix,
            danger_score,
        })
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Uppercase hex form of the prefix, no separators.
    pub fn prefix_hex(&self) -> &str {
        &self.prefix_hex
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn danger_score(&self) -> DangerScore {
        self.danger_score
    }

    pub fn matches_hex(&self, header_hex: &str) -> bool {
        header_hex.starts_with(&self.prefix_hex)
    }

    pub fn matches_header(&self, header: &[u8]) -> bool {
        header.starts_with(&self.prefix)
    }
}

impl fmt::Display for SignatureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, danger {}/10)",
            self.type_id, self.prefix_hex, self.danger_score
        )
    }
}

/// Serialized shape of a [`SignatureEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryRecord {
    type_id: String,
    prefix_hex: String,
    danger_score: u8,
}

impl TryFrom<EntryRecord> for SignatureEntry {
    type Error = Error;

    fn try_from(record: EntryRecord) -> Result<Self> {
        SignatureEntry::new(record.type_id, &record.prefix_hex, record.danger_score)
    }
}

impl From<SignatureEntry> for EntryRecord {
    fn from(entry: SignatureEntry) -> Self {
        Self {
            type_id: entry.type_id,
            prefix_hex: entry.prefix_hex,
            danger_score: entry.danger_score.get(),
        }
    }
}

/// Read-only, ordered signature table.
///
/// Matching runs through an anchored leftmost-first Aho-Corasick automaton.
/// Leftmost-first reports the earliest declared pattern among those matching
/// at offset 0, which is exactly the first-match policy.
#[derive(Debug)]
pub struct SignatureTable {
    entries: Vec<SignatureEntry>,
    /// Pattern `i` of the automaton is `entries[i].prefix`.
    matcher: Option<AhoCorasick>,
}

impl SignatureTable {
    pub fn from_entries(entries: Vec<SignatureEntry>) -> Result<Self> {
        let matcher = build_matcher(&entries)?;
        Ok(Self {
            entries,
            matcher: Some(matcher),
        })
    }

    /// Loads an ordered JSON array of `{type_id, prefix_hex, danger_score}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<SignatureEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// The default table.
    pub fn builtin() -> Self {
        Self::from_rows(BUILTIN_SIGNATURES)
    }

    /// Builds a table from static rows, keeping their order. A row that
    /// fails validation is logged and left out; it never aborts startup.
    fn from_rows(rows: &[(&str, &str, u8)]) -> Self {
        let entries: Vec<SignatureEntry> = rows
            .iter()
            .filter_map(|&(type_id, prefix_hex, score)| {
                match SignatureEntry::new(type_id, prefix_hex, score) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!(error = %e, "Skipping malformed builtin signature");
                        None
                    }
                }
            })
            .collect();

        // The automaton only fails on size limits; linear search covers that.
        let matcher = match build_matcher(&entries) {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                warn!(error = %e, "Falling back to linear signature search");
                None
            }
        };
        Self { entries, matcher }
    }

    pub fn entries(&self) -> &[SignatureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry registered under `type_id`.
    pub fn get(&self, type_id: &str) -> Option<&SignatureEntry> {
        self.entries.iter().find(|e| e.type_id == type_id)
    }

    /// First entry whose hex prefix starts `header_hex`.
    pub fn resolve_hex(&self, header_hex: &str) -> Option<&SignatureEntry> {
        self.entries.iter().find(|e| e.matches_hex(header_hex))
    }

    /// First entry whose prefix bytes start `header`.
    pub fn resolve(&self, header: &[u8]) -> Option<&SignatureEntry> {
        let matcher = match &self.matcher {
            Some(m) => m,
            None => return self.resolve_linear(header),
        };

        let input = Input::new(header).anchored(Anchored::Yes);
        matcher
            .try_find(input)
            .ok()
            .flatten()
            .and_then(|mat| self.entries.get(mat.pattern().as_usize()))
    }

    fn resolve_linear(&self, header: &[u8]) -> Option<&SignatureEntry> {
        self.entries.iter().find(|e| e.matches_header(header))
    }

    /// Pairs of `(shadowed, shadowing)` entries: the first can never be
    /// selected because the earlier second one's prefix starts it.
    pub fn shadowed_entries(&self) -> Vec<(&SignatureEntry, &SignatureEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                self.entries[..idx]
                    .iter()
                    .find(|earlier| entry.prefix.starts_with(&earlier.prefix))
                    .map(|earlier| (entry, earlier))
            })
            .collect()
    }
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn build_matcher(entries: &[SignatureEntry]) -> Result<AhoCorasick> {
    let matcher = AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostFirst)
        .start_kind(StartKind::Anchored)
        .build(entries.iter().map(|e| e.prefix()))?;
    Ok(matcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keeps_every_declared_entry() {
        let table = SignatureTable::builtin();
        assert_eq!(table.len(), BUILTIN_SIGNATURES.len());
        let declared = table.entries().iter().zip(BUILTIN_SIGNATURES);
        for (entry, &(type_id, prefix_hex, score)) in declared {
            assert_eq!(entry.type_id(), type_id);
            assert_eq!(entry.prefix_hex(), prefix_hex);
            assert_eq!(entry.danger_score().get(), score);
        }
        assert!(table.matcher.is_some());
    }

    #[test]
    fn test_linear_fallback_matches_automaton() {
        let table = SignatureTable::builtin();
        let header = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00];
        let via_matcher = table.resolve(&header).map(|e| e.type_id().to_string());
        let via_linear = table.resolve_linear(&header).map(|e| e.type_id().to_string());
        assert_eq!(via_matcher.as_deref(), Some("ZIP"));
        assert_eq!(via_matcher, via_linear);
    }

    #[test]
    fn test_from_rows_skips_malformed_rows_and_keeps_order() {
        let rows = [
            ("PNG", "89504E47", 1),
            ("BROKEN", "ABC", 4),
            ("ZERO", "00", 0),
            ("GIF", "47494638", 1),
        ];
        let table = SignatureTable::from_rows(&rows);

        let ids: Vec<&str> = table.entries().iter().map(|e| e.type_id()).collect();
        assert_eq!(ids, ["PNG", "GIF"]);
        assert_eq!(table.resolve(b"GIF89a").map(|e| e.type_id()), Some("GIF"));
        assert!(table.resolve(&[0xAB, 0xC0]).is_none());
    }
}
