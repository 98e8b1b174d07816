// src/fs/ops.rs
//! File operations executed against the session's current directory.
//!
//! None of these refresh a listing. Callers re-query the session afterwards.

use std::{fs, path::Path, path::PathBuf};

use tracing::{info, warn};

use super::{launcher::Launcher, session::DirectorySession};
use crate::error::{FmError, Result};

/// Open `path` with the default application. Only regular files qualify.
pub fn open_file(path: &Path, launcher: &dyn Launcher) -> Result<()> {
    ensure_regular_file(path)?;
    launcher.launch(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "launch failed");
        FmError::operation(format!("failed to open {}: {}", path.display(), e))
    })?;
    info!(path = %path.display(), "opened file");
    Ok(())
}

/// Remove the regular file at `path`.
pub fn delete_file(path: &Path) -> Result<()> {
    ensure_regular_file(path)?;
    fs::remove_file(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "delete failed");
        FmError::from_io(e, path)
    })?;
    info!(path = %path.display(), "deleted file");
    Ok(())
}

/// Create an empty directory `name` inside the current directory.
pub fn create_folder(session: &DirectorySession, name: &str) -> Result<PathBuf> {
    validate_name(name)?;
    let path = session.resolve(name);
    fs::create_dir(&path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "create folder failed");
        FmError::from_io(e, &path)
    })?;
    info!(path = %path.display(), "created folder");
    Ok(path)
}

/// Create a zero-byte file `name` inside the current directory.
///
/// An existing file of the same name is truncated.
pub fn create_file(session: &DirectorySession, name: &str) -> Result<PathBuf> {
    validate_name(name)?;
    let path = session.resolve(name);
    fs::write(&path, b"").map_err(|e| {
        warn!(path = %path.display(), error = %e, "create file failed");
        FmError::from_io(e, &path)
    })?;
    info!(path = %path.display(), "created file");
    Ok(path)
}

fn ensure_regular_file(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(FmError::NotAFile {
            path: path.to_path_buf(),
        }),
    }
}

/// A name must denote a single new child of the current directory.
fn validate_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains(std::path::MAIN_SEPARATOR);
    if invalid {
        return Err(FmError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
