// src/fs/entry.rs
//! A single child of the browsed directory.

use std::time::SystemTime;

/// One row of a directory listing.
///
/// Listings are rebuilt on every request, so an entry is only a snapshot of
/// the child at the time it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_file: bool,
    pub last_modified: SystemTime,
}

impl ListingEntry {
    pub fn new(name: impl Into<String>, is_file: bool, last_modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            is_file,
            last_modified,
        }
    }

    /// Anything that is not a regular file (directories, sockets, ...).
    pub fn is_dir(&self) -> bool {
        !self.is_file
    }
}
