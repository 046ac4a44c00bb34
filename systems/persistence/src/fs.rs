use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::debug;

use crate::PersistError;

/// Writes `bytes` to a sibling temporary file, then renames it over `path`.
///
/// On failure the temporary file is removed and `path` keeps its previous
/// contents.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), PersistError> {
    let temporary = temporary_path(path);

    if let Err(source) = write_file(&temporary, bytes) {
        discard(&temporary);
        return Err(PersistError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if let Err(source) = fs::rename(&temporary, path) {
        discard(&temporary);
        return Err(PersistError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Reads the whole file at `path`.
pub(crate) fn read(path: &Path) -> Result<Vec<u8>, PersistError> {
    fs::read(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn discard(path: &Path) {
    if let Err(error) = fs::remove_file(path) {
        if error.kind() != io::ErrorKind::NotFound {
            debug!("could not remove {}: {error}", path.display());
        }
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("map"));
    name.push(".tmp");
    path.with_file_name(name)
}
