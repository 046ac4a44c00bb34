#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistence codecs for tile map documents.
//!
//! Two independent formats are provided. The [`binary`] format round-trips a
//! [`Document`](tilemap_editor_document::Document) exactly and is the only
//! format accepted when loading. The [`json`] format is a human-readable,
//! export-only snapshot with a different shape and no importer.

pub mod binary;
mod fs;
pub mod json;

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while saving, loading, or exporting documents.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The target file could not be opened, read, or written.
    #[error("could not access {}: {}", .path.display(), .source)]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The data ended before the format header was complete.
    #[error("map data ended before the format header was complete")]
    Truncated,
    /// The data does not start with the binary map signature.
    #[error("data is not a tile map file")]
    InvalidMagic,
    /// The data was written by an unsupported format version.
    #[error("map format version {found} is not supported (expected {expected})")]
    UnsupportedVersion {
        /// Version recorded in the file.
        found: u32,
        /// Version this build reads and writes.
        expected: u32,
    },
    /// The document could not be encoded.
    #[error("could not encode map: {0}")]
    Encode(#[source] bincode::Error),
    /// The payload could not be decoded into a valid document.
    #[error("could not decode map: {0}")]
    Decode(#[source] bincode::Error),
    /// The JSON export could not be produced.
    #[error("could not encode JSON export: {0}")]
    Json(#[from] serde_json::Error),
}
