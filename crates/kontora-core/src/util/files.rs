//! Async file utilities for the Kontora crates.
//!
//! The documentation tree is developer-controlled content, so only a missing
//! file is treated as an expected condition. Every other I/O failure is
//! returned to the caller with the offending path attached.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// List immediate subdirectories of a path.
///
/// Entries are returned in the order the filesystem yields them; callers
/// that need a stable order must sort.
pub async fn list_subdirectories(base_path: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    let mut entries = fs::read_dir(base_path)
        .await
        .map_err(|e| Error::io_with_path(e, base_path))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_with_path(e, base_path))?
    {
        let path = entry.path();
        // Follows symlinks, so a linked document directory still counts.
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("Skipping dangling entry {}", path.display());
                continue;
            }
            Err(e) => return Err(Error::io_with_path(e, &path)),
        };
        if metadata.is_dir() {
            dirs.push(path);
        } else {
            log::trace!("Skipping non-directory entry {}", path.display());
        }
    }

    Ok(dirs)
}

/// Read a file's contents, returning `None` when the file does not exist.
///
/// Any other failure (permissions, invalid UTF-8, a directory in place of
/// the file) is returned as an error.
pub async fn read_file_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io_with_path(e, path)),
    }
}

/// Check if a path is an existing directory.
pub async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}
