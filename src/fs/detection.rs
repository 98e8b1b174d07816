// src/fs/detection.rs
//! Extension-based MIME hints shown next to file names.

use std::path::Path;

use mime_guess::MimeGuess;

/// Best-effort MIME type for a file name, or `None` when the extension is
/// unknown. Only the name is inspected; file contents are never read.
pub fn mime_hint(name: &str) -> Option<String> {
    MimeGuess::from_path(Path::new(name))
        .first()
        .map(|mime| mime.essence_str().to_string())
}
