//! Facet derivation over content collections.
//!
//! A facet is a value drawn from an item's facet field. Identity is exact,
//! case-sensitive string equality: "XSS" and "xss" are two facets. Facets come
//! from curated content, so no normalization is applied.

use std::collections::HashMap;

use crate::content::ContentItem;

// ---------------------------------------------------------------------------
// FacetSet
// ---------------------------------------------------------------------------

/// The distinct facet values of a collection, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSet {
    values: Vec<String>,
}

impl FacetSet {
    /// Whether the set holds the given facet.
    pub fn contains(&self, facet: &str) -> bool {
        self.values.iter().any(|v| v == facet)
    }

    /// Number of distinct facets.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate facets in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Facets in first-seen order.
    pub fn as_slice(&self) -> &[String] {
        &self.values
    }
}

impl<'a> IntoIterator for &'a FacetSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Collect every distinct facet value across `items`, preserving the order in
/// which each value is first seen. Items with no facet field contribute nothing.
pub fn compute_facets<T: ContentItem>(items: &[T]) -> FacetSet {
    FacetIndex::build(items).into_facets()
}

// ---------------------------------------------------------------------------
// FacetIndex
// ---------------------------------------------------------------------------

/// Facet values plus the number of items carrying each one.
///
/// Built once per collection (or whenever the collection changes) and used to
/// render filter controls with per-facet counts.
#[derive(Debug, Clone, Default)]
pub struct FacetIndex {
    facets: FacetSet,
    counts: HashMap<String, usize>,
}

impl FacetIndex {
    /// Build the index for a collection.
    pub fn build<T: ContentItem>(items: &[T]) -> Self {
        let mut facets = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for item in items {
            // An item repeating a tag still counts once for that tag.
            let mut seen_in_item: Vec<&str> = Vec::new();
            for value in item.facet_field().values() {
                if seen_in_item.contains(&value) {
                    continue;
                }
                seen_in_item.push(value);
                match counts.get_mut(value) {
                    Some(n) => *n += 1,
                    None => {
                        counts.insert(value.to_string(), 1);
                        facets.push(value.to_string());
                    }
                }
            }
        }

        Self {
            facets: FacetSet { values: facets },
            counts,
        }
    }

    /// The distinct facets in first-seen order.
    pub fn facets(&self) -> &FacetSet {
        &self.facets
    }

    /// Number of items carrying `facet`. Zero for unknown facets.
    pub fn count(&self, facet: &str) -> usize {
        self.counts.get(facet).copied().unwrap_or(0)
    }

    /// Consume the index, keeping only the facet set.
    pub fn into_facets(self) -> FacetSet {
        self.facets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn empty_collection_has_no_facets() {
        let items: Vec<crate::content::Project> = Vec::new();
        assert!(compute_facets(&items).is_empty());
    }

    #[test]
    fn facets_preserve_first_seen_order() {
        let items = vec![
            project(1, "A", "", &["Rust", "Tokio"]),
            project(2, "B", "", &["Serde", "Rust"]),
        ];
        let facets = compute_facets(&items);
        let order: Vec<&str> = facets.iter().collect();
        assert_eq!(order, vec!["Rust", "Tokio", "Serde"]);
    }

    #[test]
    fn facets_are_case_sensitive() {
        let items = vec![
            project(1, "A", "", &["XSS"]),
            project(2, "B", "", &["xss"]),
        ];
        let facets = compute_facets(&items);
        assert_eq!(facets.len(), 2);
        assert!(facets.contains("XSS"));
        assert!(facets.contains("xss"));
    }

    #[test]
    fn untagged_items_contribute_nothing() {
        let items = vec![project(1, "A", "", &[]), project(2, "B", "", &["Go"])];
        assert_eq!(compute_facets(&items).as_slice(), &["Go".to_string()]);
    }

    #[test]
    fn category_facets_come_from_skills() {
        let items = vec![
            skill(1, "Rust", Some("Languages"), 90),
            skill(2, "Burp Suite", Some("Security"), 70),
            skill(3, "Java", Some("Languages"), 60),
            skill(4, "Vim", None, 50),
        ];
        let index = FacetIndex::build(&items);
        assert_eq!(index.facets().len(), 2);
        assert_eq!(index.count("Languages"), 2);
        assert_eq!(index.count("Security"), 1);
        assert_eq!(index.count("Editors"), 0);
    }

    #[test]
    fn duplicate_tag_in_one_item_counts_once() {
        let items = vec![project(1, "A", "", &["Rust", "Rust"])];
        let index = FacetIndex::build(&items);
        assert_eq!(index.facets().len(), 1);
        assert_eq!(index.count("Rust"), 1);
    }

    #[test]
    fn security_portfolio_yields_six_facets() {
        let items = security_projects();
        let facets = compute_facets(&items);
        let order: Vec<&str> = facets.iter().collect();
        assert_eq!(
            order,
            vec![
                "Burp Suite",
                "Firefox",
                "VirtualBox",
                "Kali Linux",
                "Android Studio",
                "Java"
            ]
        );
    }
}
