// src/fs/session.rs
//! The directory session: the one piece of mutable state in the engine.

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
    time::SystemTime,
};

use tracing::{debug, info, warn};

use super::entry::ListingEntry;
use crate::error::{FmError, Result};

/// Owns the directory currently being browsed.
///
/// The path is only ever replaced after the new target has been checked, so
/// a failed change leaves the session where it was.
#[derive(Debug, Clone)]
pub struct DirectorySession {
    current: PathBuf,
}

impl DirectorySession {
    /// Start a session in `path`, which must be a readable directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let start = normalize(&absolute_base(), path.as_ref());
        check_readable_dir(&start)?;
        info!(dir = %start.display(), "session started");
        Ok(Self { current: start })
    }

    /// Start a session in the user's home directory.
    pub fn at_home() -> Result<Self> {
        Self::new(home_dir())
    }

    /// The directory being browsed.
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Switch to `path`. Relative paths are taken from the current directory.
    pub fn set_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let target = normalize(&self.current, path.as_ref());
        if let Err(err) = check_readable_dir(&target) {
            warn!(dir = %target.display(), error = %err, "directory change rejected");
            return Err(err);
        }
        info!(from = %self.current.display(), to = %target.display(), "changed directory");
        self.current = target;
        Ok(())
    }

    /// Descend into the child directory `name`.
    pub fn enter(&mut self, name: &str) -> Result<()> {
        let target = self.resolve(name);
        self.set_directory(target)
    }

    /// Move to the parent directory. Returns `false` at the filesystem root.
    pub fn go_up(&mut self) -> Result<bool> {
        match self.current.parent() {
            Some(parent) => {
                let parent = parent.to_path_buf();
                self.set_directory(parent)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Join `name` onto the current directory. Existence is not checked.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.current.join(name)
    }

    /// Enumerate the immediate children of the current directory, in the
    /// order the OS yields them.
    pub fn list_entries(&self) -> Result<Vec<ListingEntry>> {
        let dir = fs::read_dir(&self.current).map_err(|e| listing_error(e, &self.current))?;

        let mut entries = Vec::new();
        for item in dir {
            let item = item.map_err(|e| listing_error(e, &self.current))?;
            // A lossy name would resolve to a path that does not exist, so
            // such children are left out of the listing.
            let name = match item.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(dir = %self.current.display(), name = ?raw, "skipping non UTF-8 name");
                    continue;
                }
            };
            // Follow symlinks like a plain stat would; fall back to the link
            // itself when it dangles.
            let meta = match fs::metadata(item.path()) {
                Ok(meta) => meta,
                Err(_) => item
                    .metadata()
                    .map_err(|e| listing_error(e, &self.current))?,
            };
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            entries.push(ListingEntry::new(name, meta.is_file(), modified));
        }

        debug!(dir = %self.current.display(), count = entries.len(), "listed directory");
        Ok(entries)
    }
}

/// Render the last `n` components of `path`, e.g. `…/music/rock/live`.
pub fn tail_path(path: &Path, n: usize) -> String {
    let parts: Vec<String> = path
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.len() <= n {
        return path.display().to_string();
    }
    format!("…/{}", parts[parts.len() - n..].join("/"))
}

fn home_dir() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("/"))
}

fn absolute_base() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| home_dir())
}

/// Lexically join `path` onto `base`, folding `.` and `..`.
fn normalize(base: &Path, path: &Path) -> PathBuf {
    let joined = base.join(path);
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn check_readable_dir(path: &Path) -> Result<()> {
    let meta = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => FmError::AccessDenied {
            path: path.to_path_buf(),
        },
        _ => FmError::NotADirectory {
            path: path.to_path_buf(),
        },
    })?;
    if !meta.is_dir() {
        return Err(FmError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| listing_error(e, path))
}

fn listing_error(err: io::Error, dir: &Path) -> FmError {
    match err.kind() {
        io::ErrorKind::NotFound => FmError::NotADirectory {
            path: dir.to_path_buf(),
        },
        _ => FmError::from_io(err, dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_immediate_children_with_file_flags() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), b"a").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("nested.txt"), b"n").unwrap();

        let session = DirectorySession::new(tmp.path()).unwrap();
        let mut entries = session.list_entries().unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let summary: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.is_file)).collect();
        assert_eq!(summary, vec![("a.txt", true), ("sub", false)]);
    }

    #[test]
    fn listing_is_fresh_on_every_call() {
        let tmp = tempdir().unwrap();
        let session = DirectorySession::new(tmp.path()).unwrap();
        assert!(session.list_entries().unwrap().is_empty());

        fs::write(tmp.path().join("late.txt"), b"").unwrap();
        let names: Vec<_> = session
            .list_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["late.txt".to_string()]);
    }

    #[test]
    fn set_directory_rejects_a_file_and_keeps_state() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        let mut session = DirectorySession::new(tmp.path()).unwrap();
        let err = session.set_directory(&file).unwrap_err();
        assert_eq!(err, FmError::NotADirectory { path: file });
        assert_eq!(session.current(), tmp.path());
    }

    #[test]
    fn set_directory_rejects_missing_paths() {
        let tmp = tempdir().unwrap();
        let mut session = DirectorySession::new(tmp.path()).unwrap();
        let err = session.set_directory("does-not-exist").unwrap_err();
        assert!(matches!(err, FmError::NotADirectory { .. }));
        assert_eq!(session.current(), tmp.path());
    }

    #[test]
    fn enter_and_go_up_round_trip() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("child")).unwrap();

        let mut session = DirectorySession::new(tmp.path()).unwrap();
        session.enter("child").unwrap();
        assert_eq!(session.current(), tmp.path().join("child"));

        assert!(session.go_up().unwrap());
        assert_eq!(session.current(), tmp.path());
    }

    #[test]
    fn relative_dot_dot_is_folded() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();

        let mut session = DirectorySession::new(tmp.path().join("a")).unwrap();
        session.set_directory("../b").unwrap();
        assert_eq!(session.current(), tmp.path().join("b"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_left_out() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join(OsStr::from_bytes(b"bad\xff.txt")), b"x").unwrap();
        fs::write(tmp.path().join(OsStr::from_bytes(b"bad\xfe.txt")), b"x").unwrap();
        fs::write(tmp.path().join("good.txt"), b"x").unwrap();
        let session = DirectorySession::new(tmp.path()).unwrap();

        let names: Vec<_> = session.list_entries().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["good.txt"]);
        assert!(names.iter().all(|n| session.resolve(n).is_file()));
    }

    #[test]
    fn resolve_does_not_check_existence() {
        let tmp = tempdir().unwrap();
        let session = DirectorySession::new(tmp.path()).unwrap();
        assert_eq!(session.resolve("ghost.pdf"), tmp.path().join("ghost.pdf"));
    }

    #[test]
    fn tail_path_keeps_last_components() {
        let path = Path::new("/home/user/music/rock/live");
        assert_eq!(tail_path(path, 3), "…/music/rock/live");
        assert_eq!(tail_path(Path::new("/tmp"), 3), "/tmp");
    }
}
