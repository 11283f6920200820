use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::SessionError;
use crate::serializer::FILE_EXTENSION;
use crate::state::EditorState;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: SessionError,
    },
}

pub type FileResult<T> = Result<T, FileError>;

/// Adds the sheet extension when `path` has none.
pub fn with_sheet_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(FILE_EXTENSION)
    }
}

/// Writes the current sheet and returns the path actually written.
pub fn save_to_path(path: &Path, state: &EditorState) -> FileResult<PathBuf> {
    let path = with_sheet_extension(path);
    fs::write(&path, state.save()).map_err(|source| FileError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("Saved sheet to {}", path.display());
    Ok(path)
}

/// Replaces the session's sheet with the file's content.
///
/// Nothing in `state` changes unless the whole file parses.
pub fn load_from_path(path: &Path, state: &mut EditorState) -> FileResult<()> {
    let text = fs::read_to_string(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    state.load(&text).map_err(|source| {
        log::warn!("Rejected sheet file {}: {}", path.display(), source);
        FileError::Load {
            path: path.to_path_buf(),
            source,
        }
    })
}
