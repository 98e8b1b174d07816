// src/fs/mod.rs
//! Filesystem module - the directory session, file operations and type hints.

pub mod detection;
pub mod entry;
pub mod launcher;
pub mod ops;
pub mod session;

// Re-export commonly used types
pub use detection::mime_hint;
pub use entry::ListingEntry;
pub use launcher::{Launcher, SystemLauncher};
pub use ops::{create_file, create_folder, delete_file, open_file};
pub use session::{DirectorySession, tail_path};
