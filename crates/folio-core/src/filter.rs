//! Free-text and single-facet filtering of content collections.
//!
//! The filter is a pure function of `(collection, state)`. It is a stable
//! filter, never a sort: output is always a subsequence of the input.
//! Callers must always filter the original collection. Filtering a previous
//! result with a new state loses items the old state excluded.

use std::collections::VecDeque;

use crate::clock::Fingerprint;
use crate::content::{ContentItem, FacetField};

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Which facet, if any, narrows the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FacetSelection {
    /// No facet narrowing.
    #[default]
    All,
    /// Only items carrying this exact facet value.
    Facet(String),
}

impl FacetSelection {
    /// The keyword filter controls use for "no facet".
    pub const ALL_KEYWORD: &'static str = "all";

    /// Parse a control value. `"all"` selects everything; any other string
    /// selects that exact facet.
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL_KEYWORD {
            FacetSelection::All
        } else {
            FacetSelection::Facet(value.to_string())
        }
    }

    /// The control value for this selection.
    pub fn as_str(&self) -> &str {
        match self {
            FacetSelection::All => Self::ALL_KEYWORD,
            FacetSelection::Facet(f) => f,
        }
    }
}

/// The current query and facet selection of one view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterState {
    query: String,
    selection: FacetSelection,
}

impl FilterState {
    /// Empty query, all facets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style constructor used by tests and fixtures.
    pub fn with(query: &str, selection: FacetSelection) -> Self {
        Self {
            query: query.to_string(),
            selection,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    /// Replace the free-text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Select a facet.
    pub fn select_facet(&mut self, selection: FacetSelection) {
        self.selection = selection;
    }

    /// Go back to all facets, keeping the query.
    pub fn clear_facet(&mut self) {
        self.selection = FacetSelection::All;
    }

    /// Back to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether this state admits every item.
    pub fn is_identity(&self) -> bool {
        self.query.is_empty() && self.selection == FacetSelection::All
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Case-insensitive substring match of `query` against the title or any
/// searchable field. An empty query matches everything.
pub fn text_matches<T: ContentItem>(item: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    text_matches_lowered(item, &needle)
}

fn text_matches_lowered<T: ContentItem>(item: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.title().to_lowercase().contains(needle)
        || item
            .search_fields()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Whether the item's facet field admits the selection. Tag lists match by
/// containment, categories by equality.
pub fn facet_matches<T: ContentItem>(item: &T, selection: &FacetSelection) -> bool {
    match selection {
        FacetSelection::All => true,
        FacetSelection::Facet(f) => item.facet_field().matches(f),
    }
}

/// The full predicate: text AND facet.
pub fn matches<T: ContentItem>(item: &T, state: &FilterState) -> bool {
    text_matches(item, &state.query) && facet_matches(item, &state.selection)
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

/// Indices of the items of `collection` admitted by `state`, ascending.
pub fn apply_indices<T: ContentItem>(collection: &[T], state: &FilterState) -> Vec<usize> {
    if state.is_identity() {
        return (0..collection.len()).collect();
    }
    // Lowercase the query once rather than per item.
    let needle = state.query.to_lowercase();
    collection
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            text_matches_lowered(*item, &needle) && facet_matches(*item, &state.selection)
        })
        .map(|(i, _)| i)
        .collect()
}

/// The items of `collection` admitted by `state`, in input order.
pub fn apply<'a, T: ContentItem>(collection: &'a [T], state: &FilterState) -> Vec<&'a T> {
    apply_indices(collection, state)
        .into_iter()
        .map(|i| &collection[i])
        .collect()
}

/// Fingerprint of everything the filter reads from a collection: length,
/// then per item the id, title, search fields and facet field.
pub fn collection_fingerprint<T: ContentItem>(collection: &[T]) -> Fingerprint {
    let mut h = Fingerprint::new();
    h.write_u64(collection.len() as u64);
    for item in collection {
        h.write_u32(item.id().0);
        h.write_str(item.title());
        h.write_u64(item.search_fields().count() as u64);
        for field in item.search_fields() {
            h.write_str(field);
        }
        let kind = match item.facet_field() {
            FacetField::None => 0,
            FacetField::Tags(_) => 1,
            FacetField::Category(_) => 2,
        };
        h.write_u32(kind);
        h.write_u64(item.facet_field().values().count() as u64);
        for value in item.facet_field().values() {
            h.write_str(value);
        }
    }
    h
}

// ---------------------------------------------------------------------------
// Memoized filter
// ---------------------------------------------------------------------------

/// Caches recent results for one collection, keyed on filter state.
///
/// Entries are kept most recently used first and the oldest is evicted once
/// `capacity` is reached, so typing and then deleting a query hits. A
/// different collection fingerprint clears the cache.
#[derive(Debug, Clone)]
pub struct MemoFilter {
    capacity: usize,
    collection: Option<u64>,
    entries: VecDeque<(FilterState, Vec<usize>)>,
    hits: u64,
    misses: u64,
}

impl Default for MemoFilter {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl MemoFilter {
    pub const DEFAULT_CAPACITY: usize = 16;

    pub fn new() -> Self {
        Self::default()
    }

    /// A memo holding at most `capacity` states (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            collection: None,
            entries: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Filter `collection`, reusing a cached result for the same content
    /// and state.
    pub fn apply_indices<T: ContentItem>(&mut self, collection: &[T], state: &FilterState) -> &[usize] {
        let fingerprint = collection_fingerprint(collection);
        self.apply_fingerprinted(fingerprint, collection, state)
    }

    /// Like [`apply_indices`](Self::apply_indices) with a fingerprint the
    /// caller computed once for a collection it never mutates.
    /// `fingerprint` must be `collection_fingerprint(collection)`.
    pub fn apply_fingerprinted<T: ContentItem>(
        &mut self,
        fingerprint: Fingerprint,
        collection: &[T],
        state: &FilterState,
    ) -> &[usize] {
        let key = fingerprint.finish();
        if self.collection != Some(key) {
            self.entries.clear();
            self.collection = Some(key);
        }
        match self.entries.iter().position(|(s, _)| s == state) {
            Some(pos) => {
                self.hits += 1;
                if let Some(entry) = self.entries.remove(pos) {
                    self.entries.push_front(entry);
                }
            }
            None => {
                self.misses += 1;
                if self.entries.len() == self.capacity {
                    self.entries.pop_back();
                }
                self.entries
                    .push_front((state.clone(), apply_indices(collection, state)));
            }
        }
        &self.entries[0].1
    }

    /// Drop every cached result.
    pub fn invalidate(&mut self) {
        self.collection = None;
        self.entries.clear();
    }

    /// Number of cached states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
