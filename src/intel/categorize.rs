// src/intel/categorize.rs
//! Extension-based grouping of a listing.

use std::fmt;

use crate::fs::ListingEntry;

/// High-level file categories, in the order they are checked.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Category {
    Documents,
    Images,
    Videos,
    Audio,
    Others,
}

impl Category {
    /// Every category, `Others` last.
    pub const ALL: [Category; 5] = [
        Category::Documents,
        Category::Images,
        Category::Videos,
        Category::Audio,
        Category::Others,
    ];

    /// Extensions claimed by this category. `Others` claims nothing
    /// explicitly; it receives whatever is left over.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Category::Documents => &[".pdf", ".docx", ".txt"],
            Category::Images => &[".jpg", ".jpeg", ".png", ".gif"],
            Category::Videos => &[".mp4", ".mkv", ".avi"],
            Category::Audio => &[".mp3", ".wav", ".m4a"],
            Category::Others => &[],
        }
    }

    /// Category for a bare file name.
    pub fn of(name: &str) -> Category {
        let ext = extension_of(name);
        Category::ALL
            .into_iter()
            .find(|c| c.extensions().contains(&ext.as_str()))
            .unwrap_or(Category::Others)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Documents => "Documents",
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Audio => "Audio",
            Category::Others => "Others",
        };
        write!(f, "{}", s)
    }
}

/// Lower-cased extension including the dot, or `""`.
///
/// Leading dots are part of the stem, so `.bashrc` has no extension while
/// `.config.txt` has `.txt`.
pub fn extension_of(name: &str) -> String {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(idx) => name[stem_start + idx..].to_lowercase(),
        None => String::new(),
    }
}

/// A listing partitioned into every category, each keeping input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorized {
    buckets: Vec<(Category, Vec<String>)>,
}

impl Categorized {
    /// Names that landed in `category`.
    pub fn get(&self, category: Category) -> &[String] {
        self.buckets
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[])
    }

    /// All categories in check order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.buckets.iter().map(|(c, names)| (*c, names.as_slice()))
    }

    /// Total number of names across all categories.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, names)| names.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Group `entries` by extension. Directories are not special-cased.
pub fn categorize(entries: &[ListingEntry]) -> Categorized {
    let mut buckets: Vec<(Category, Vec<String>)> =
        Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

    for entry in entries {
        let category = Category::of(&entry.name);
        if let Some((_, names)) = buckets.iter_mut().find(|(c, _)| *c == category) {
            names.push(entry.name.clone());
        }
    }

    Categorized { buckets }
}
