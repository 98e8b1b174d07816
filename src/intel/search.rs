// src/intel/search.rs
//! Case-insensitive substring search over a listing.

use crate::fs::ListingEntry;

/// Does `name` contain `term`, ignoring case?
pub fn matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Names containing `term`, in listing order.
///
/// An empty term matches nothing; callers should not issue such a search.
pub fn search(entries: &[ListingEntry], term: &str) -> Vec<String> {
    if term.is_empty() {
        return Vec::new();
    }
    entries
        .iter()
        .filter(|e| matches(&e.name, term))
        .map(|e| e.name.clone())
        .collect()
}
