// src/intel/mod.rs
//! Pure heuristics over a directory listing: categories, recency and search.

pub mod categorize;
pub mod recent;
pub mod search;

pub use categorize::{Categorized, Category, categorize};
pub use recent::{DEFAULT_RECENT_LIMIT, top_recent};
pub use search::search;
