// SPDX-License-Identifier: MPL-2.0
//! Pure photo/category model shared by the grid and the lightbox.
//!
//! This module contains no I/O: the source adapter produces the photo list,
//! and everything here is plain filtering and index arithmetic so it can be
//! unit-tested without a window or a network.

/// Category key meaning "no filter". Always present and always listed first.
pub const ALL_CATEGORY: &str = "all";

/// Category key for photos found at the collection root, outside any
/// subdirectory.
pub const UNCATEGORIZED: &str = "uncategorized";

/// A single photo as reported by the source adapter.
///
/// Immutable once constructed; uniquely identified by `path` within a
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Repository-relative path, e.g. `photos/travel/rome.jpg`.
    pub path: String,
    /// Grouping key derived from the first path segment under the root.
    pub category: String,
    /// File name without directories, e.g. `rome.jpg`.
    pub filename: String,
}

impl Photo {
    pub fn new(
        path: impl Into<String>,
        category: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            category: category.into(),
            filename: filename.into(),
        }
    }
}

/// A category with its canonical key and its display label.
///
/// The key is what filtering compares against; the label is only ever shown.
/// Keeping both means filter activation never has to lower-case display text
/// back into a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: String,
    pub label: String,
}

impl Category {
    fn from_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            label: display_label(key),
        }
    }
}

/// Capitalizes only the first character of a category key for display.
fn display_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Derives the distinct category set from a photo list.
///
/// The result always contains [`ALL_CATEGORY`] at position 0; the remaining
/// keys are distinct and sorted ascending.
pub fn build_categories(photos: &[Photo]) -> Vec<Category> {
    let mut keys: Vec<&str> = photos.iter().map(|p| p.category.as_str()).collect();
    keys.sort_unstable();
    keys.dedup();

    let mut categories = Vec::with_capacity(keys.len() + 1);
    categories.push(Category::from_key(ALL_CATEGORY));
    for key in keys {
        if key != ALL_CATEGORY {
            categories.push(Category::from_key(key));
        }
    }
    categories
}

/// Returns the subset of `photos` visible under `category_key`, in stable
/// original relative order.
///
/// [`ALL_CATEGORY`] passes every photo through.
pub fn visible_photos(photos: &[Photo], category_key: &str) -> Vec<Photo> {
    if category_key == ALL_CATEGORY {
        photos.to_vec()
    } else {
        photos
            .iter()
            .filter(|p| p.category == category_key)
            .cloned()
            .collect()
    }
}

/// Returns the first position in `photos` whose path equals `path`.
pub fn position_of(photos: &[Photo], path: &str) -> Option<usize> {
    photos.iter().position(|p| p.path == path)
}

/// Advances `index` by one with wraparound. Identity when fewer than two
/// photos are visible.
pub fn next_index(index: usize, len: usize) -> usize {
    if len <= 1 {
        index
    } else {
        (index + 1) % len
    }
}

/// Retreats `index` by one with wraparound. Identity when fewer than two
/// photos are visible.
pub fn previous_index(index: usize, len: usize) -> usize {
    if len <= 1 {
        index
    } else {
        (index + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_photos() -> Vec<Photo> {
        vec![
            Photo::new("photos/a/1.jpg", "a", "1.jpg"),
            Photo::new("photos/b/2.jpg", "b", "2.jpg"),
            Photo::new("photos/a/3.jpg", "a", "3.jpg"),
        ]
    }

    #[test]
    fn build_categories_puts_all_first() {
        let categories = build_categories(&sample_photos());
        assert_eq!(categories[0].key, ALL_CATEGORY);
    }

    #[test]
    fn build_categories_sorts_remaining_keys_without_duplicates() {
        let categories = build_categories(&sample_photos());
        let keys: Vec<&str> = categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["all", "a", "b"]);
    }

    #[test]
    fn build_categories_on_empty_list_still_contains_all() {
        let categories = build_categories(&[]);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].key, ALL_CATEGORY);
    }

    #[test]
    fn build_categories_is_case_sensitive_for_distinct_keys() {
        let photos = vec![
            Photo::new("photos/Travel/x.jpg", "Travel", "x.jpg"),
            Photo::new("photos/travel/y.jpg", "travel", "y.jpg"),
        ];
        let categories = build_categories(&photos);
        let keys: Vec<&str> = categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["all", "Travel", "travel"]);
    }

    #[test]
    fn display_label_capitalizes_only_the_first_character() {
        let categories = build_categories(&sample_photos());
        assert_eq!(categories[1].label, "A");

        let photos = vec![Photo::new("photos/travel/x.jpg", "travel", "x.jpg")];
        let categories = build_categories(&photos);
        assert_eq!(categories[1].label, "Travel");
        assert_eq!(categories[1].key, "travel");
    }

    #[test]
    fn visible_photos_with_all_passes_everything_through() {
        let photos = sample_photos();
        assert_eq!(visible_photos(&photos, ALL_CATEGORY).len(), photos.len());
    }

    #[test]
    fn visible_photos_filters_by_category_in_stable_order() {
        let photos = sample_photos();
        let subset = visible_photos(&photos, "a");
        assert_eq!(subset.len(), 2);
        assert_eq!(subset[0].path, "photos/a/1.jpg");
        assert_eq!(subset[1].path, "photos/a/3.jpg");
    }

    #[test]
    fn visible_photos_for_unknown_category_is_empty() {
        assert!(visible_photos(&sample_photos(), "zzz").is_empty());
    }

    #[test]
    fn position_of_finds_first_matching_path() {
        let subset = visible_photos(&sample_photos(), "a");
        assert_eq!(position_of(&subset, "photos/a/3.jpg"), Some(1));
    }

    #[test]
    fn position_of_returns_none_for_missing_path() {
        let subset = visible_photos(&sample_photos(), "a");
        assert_eq!(position_of(&subset, "photos/b/2.jpg"), None);
    }

    #[test]
    fn next_index_wraps_around() {
        assert_eq!(next_index(1, 2), 0);
        assert_eq!(next_index(0, 3), 1);
    }

    #[test]
    fn previous_index_wraps_around() {
        assert_eq!(previous_index(0, 2), 1);
        assert_eq!(previous_index(2, 3), 1);
    }

    #[test]
    fn navigation_is_identity_for_single_or_empty_subsets() {
        assert_eq!(next_index(0, 1), 0);
        assert_eq!(previous_index(0, 1), 0);
        assert_eq!(next_index(0, 0), 0);
        assert_eq!(previous_index(0, 0), 0);
    }

    #[test]
    fn full_cycle_of_next_returns_to_start() {
        let len = 5;
        let start = 2;
        let mut index = start;
        for _ in 0..len {
            index = next_index(index, len);
        }
        assert_eq!(index, start);
    }

    #[test]
    fn full_cycle_of_previous_returns_to_start() {
        let len = 5;
        let start = 4;
        let mut index = start;
        for _ in 0..len {
            index = previous_index(index, len);
        }
        assert_eq!(index, start);
    }
}
