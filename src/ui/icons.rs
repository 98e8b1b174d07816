// src/ui/icons.rs
//! Icon mappings for entries in the browser.

use crate::{fs::ListingEntry, intel::Category};

/// Get the appropriate icon for a file or directory entry.
pub fn icon_for_entry(entry: &ListingEntry) -> &'static str {
    if entry.is_dir() {
        "\u{f07b}" // folder icon
    } else {
        match Category::of(&entry.name) {
            Category::Audio => "\u{f1c7}",
            Category::Images => "\u{f1c5}",
            Category::Videos => "\u{f1c8}",
            Category::Documents => "\u{f15c}",
            Category::Others => "\u{f016}",
        }
    }
}
