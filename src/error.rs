//! Library error type.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building tables, watching directories or talking to
/// the desktop. Classification itself never fails; see
/// [`Classification::Unreadable`](crate::types::Classification::Unreadable).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid signature for {type_id}: {reason}")]
    InvalidSignature { type_id: String, reason: String },

    #[error("Danger score {0} is out of range (expected 1..=10)")]
    InvalidScore(u8),

    #[error("The directory '{}' does not exist.", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to build signature matcher: {0}")]
    Matcher(#[from] aho_corasick::BuildError),

    #[error("Watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("File picker error: {0}")]
    Picker(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid signature table: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
