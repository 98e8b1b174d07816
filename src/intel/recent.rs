// src/intel/recent.rs
//! Most-recently-modified ranking.

use std::cmp::Reverse;

use crate::fs::ListingEntry;

/// How many names the recency list shows unless configured otherwise.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Names of the `n` most recently modified entries, newest first.
///
/// Entries with equal timestamps keep their listing order.
pub fn top_recent(entries: &[ListingEntry], n: usize) -> Vec<String> {
    let mut ranked: Vec<&ListingEntry> = entries.iter().collect();
    // `sort_by_key` is stable.
    ranked.sort_by_key(|e| Reverse(e.last_modified));
    ranked.into_iter().take(n).map(|e| e.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn at(name: &str, secs: u64) -> ListingEntry {
        ListingEntry::new(name, true, SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    #[test]
    fn newest_first() {
        let entries = vec![at("old", 10), at("new", 30), at("mid", 20)];
        assert_eq!(top_recent(&entries, 5), ["new", "mid", "old"]);
    }

    #[test]
    fn truncates_to_n() {
        let entries: Vec<_> = (0..8).map(|i| at(&format!("f{i}"), i)).collect();
        assert_eq!(top_recent(&entries, DEFAULT_RECENT_LIMIT), ["f7", "f6", "f5", "f4", "f3"]);
    }

    #[test]
    fn ties_keep_listing_order() {
        let entries = vec![at("b", 5), at("a", 5), at("c", 9), at("d", 5)];
        assert_eq!(top_recent(&entries, 4), ["c", "b", "a", "d"]);
    }

    #[test]
    fn ordering_is_monotonic() {
        let entries = vec![at("x", 3), at("y", 1), at("z", 4), at("w", 1), at("v", 5)];
        let ranked = top_recent(&entries, 5);
        let times: Vec<_> = ranked
            .iter()
            .map(|n| entries.iter().find(|e| &e.name == n).unwrap().last_modified)
            .collect();
        assert!(times.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn directories_are_ranked_too() {
        let mut dir = at("folder", 100);
        dir.is_file = false;
        let entries = vec![at("file", 1), dir];
        assert_eq!(top_recent(&entries, 1), ["folder"]);
    }
}
