//! File output for rendered documents

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while writing rendered output to disk
///
/// Both variants are fatal to the current render; callers propagate them
/// instead of continuing with a partial tree.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A missing intermediate directory could not be created
    #[error("failed to create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The rendered body could not be written
    #[error("failed to write '{}': {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write a file body, creating any missing directories in its path
///
/// An existing file at `path` is overwritten in full.
pub fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| WriteError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
