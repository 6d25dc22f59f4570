//! Source file loading.

use std::path::Path;

use crate::error::ConstTableError;

/// Read the raw bytes of a source file.
///
/// Directories and other non-regular files are rejected before any read
/// is attempted.
pub fn read_source(path: &Path) -> Result<Vec<u8>, ConstTableError> {
    let metadata = std::fs::metadata(path).map_err(|e| ConstTableError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !metadata.is_file() {
        return Err(ConstTableError::NotAFile(path.to_path_buf()));
    }

    std::fs::read(path).map_err(|e| ConstTableError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}
