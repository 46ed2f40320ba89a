// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors that abort an export or import.
//!
//! Problems that only affect one node, socket or link never show up here;
//! they are collected in the operation's manifest instead.

use std::path::PathBuf;

/// Fatal interchange error
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Nothing to export
    #[error("No active node graph: {0}")]
    NoActiveGraph(String),

    /// Document is not valid JSON or lacks required keys
    #[error("Malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// Document could not be written as JSON
    #[error("Could not serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Document was written by a newer format
    #[error("Document format version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the document
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Settings file could not be read or written
    #[error("Settings error: {0}")]
    Settings(String),
}

/// Result type for interchange operations
pub type CodecResult<T> = Result<T, CodecError>;
