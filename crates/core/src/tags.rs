//! Tags
//!
//! A small sorted tag set used for product search.

use std::string::ToString;

use smallvec::SmallVec;

/// A sorted, de-duplicated set of tags backed by `SmallVec<[String; 5]>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    tags: SmallVec<[String; 5]>,
}

impl Tags {
    /// Create a tag set from owned strings.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut collection = Self { tags };

        collection.tags.sort();
        collection.tags.dedup();

        collection
    }

    /// Create a tag set from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(
            tags.iter()
                .map(ToString::to_string)
                .collect::<SmallVec<[String; 5]>>(),
        )
    }

    /// Check if the set contains an exact tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags
            .binary_search_by(|existing| existing.as_str().cmp(tag))
            .is_ok()
    }

    /// Check if any tag contains `needle`, ignoring case.
    ///
    /// `needle` is expected to be lowercase already.
    pub fn any_contains(&self, needle: &str) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

impl<'a> FromIterator<&'a str> for Tags {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_sorted_and_deduplicated() {
        let tags = Tags::from_strs(&["pollo", "carne", "pollo"]);

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["carne", "pollo"]);
    }

    #[test]
    fn contains_is_exact() {
        let tags = Tags::from_strs(&["vegetariana", "verduras"]);

        assert!(tags.contains("verduras"));
        assert!(!tags.contains("verdura"));
        assert!(!tags.contains("Verduras"));
    }

    #[test]
    fn any_contains_matches_substrings_ignoring_case() {
        let tags = Tags::from_strs(&["Verduras", "queso"]);

        assert!(tags.any_contains("verd"));
        assert!(tags.any_contains("ques"));
        assert!(!tags.any_contains("carne"));
    }

    #[test]
    fn empty_tags() {
        let tags = Tags::default();

        assert!(tags.is_empty());
        assert!(!tags.any_contains(""));
    }
}
