//! Lossless binary format.
//!
//! Layout: the 4-byte signature [`MAGIC`], the format version as a
//! little-endian `u32`, then the bincode encoding of the document (tile grid
//! followed by object grid).

use std::path::Path;

use tilemap_editor_document::Document;

use crate::{fs, PersistError};

/// Signature that opens every binary map file.
pub const MAGIC: [u8; 4] = *b"TMAP";

/// Format version written by this build and the only one it reads.
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = MAGIC.len() + 4;

/// Encodes the document into an in-memory binary blob.
pub fn encode(document: &Document) -> Result<Vec<u8>, PersistError> {
    let mut bytes = Vec::with_capacity(HEADER_LEN);
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bincode::serialize_into(&mut bytes, document).map_err(PersistError::Encode)?;
    Ok(bytes)
}

/// Decodes a binary blob produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<Document, PersistError> {
    let Some(magic) = bytes.get(..MAGIC.len()) else {
        return Err(if MAGIC.starts_with(bytes) {
            PersistError::Truncated
        } else {
            PersistError::InvalidMagic
        });
    };
    if magic != MAGIC {
        return Err(PersistError::InvalidMagic);
    }

    let version = bytes
        .get(MAGIC.len()..HEADER_LEN)
        .and_then(|slice| <[u8; 4]>::try_from(slice).ok())
        .map(u32::from_le_bytes)
        .ok_or(PersistError::Truncated)?;
    if version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }

    bincode::deserialize(&bytes[HEADER_LEN..]).map_err(PersistError::Decode)
}

/// Saves the document to `path` without leaving a partial file on failure.
pub fn save(path: &Path, document: &Document) -> Result<(), PersistError> {
    let bytes = encode(document)?;
    fs::write_atomically(path, &bytes)
}

/// Loads a document previously written by [`save`].
pub fn load(path: &Path) -> Result<Document, PersistError> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}
