//! Per-page filter state holders.
//!
//! A [`CollectionView`] pairs a read-only collection with the filter state
//! of the page showing it. Every [`FilterEvent`] re-derives the visible
//! subset from the original collection; nothing is ever filtered from a
//! previous result.

use std::sync::Arc;

use folio_core::content::ContentItem;
use folio_core::facet::{FacetIndex, FacetSet};
use folio_core::clock::Fingerprint;
use folio_core::filter::{
    FacetSelection, FilterState, MemoFilter, apply_indices, collection_fingerprint,
};

/// A user-driven change to a view's filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// The search box text changed.
    QueryChanged(String),
    /// A facet button was activated (`FacetSelection::All` for "all").
    FacetSelected(FacetSelection),
    /// Clear query and facet.
    Reset,
}

fn apply_event(state: &mut FilterState, event: FilterEvent) {
    match event {
        FilterEvent::QueryChanged(q) => state.set_query(q),
        FilterEvent::FacetSelected(sel) => state.select_facet(sel),
        FilterEvent::Reset => state.reset(),
    }
}

/// Filter state plus derived results for one collection.
#[derive(Debug, Clone)]
pub struct CollectionView<T> {
    items: Arc<[T]>,
    facets: FacetIndex,
    state: FilterState,
    /// Recent results by state, with the collection fingerprint taken once.
    memo: Option<(Fingerprint, MemoFilter)>,
    visible: Vec<usize>,
    /// Bumped whenever the visible subset is re-derived.
    revision: u64,
}

impl<T: ContentItem> CollectionView<T> {
    /// Create a view showing the whole collection.
    pub fn new(items: impl Into<Arc<[T]>>, memoize: bool) -> Self {
        let items = items.into();
        let facets = FacetIndex::build(&items[..]);
        let memo = memoize.then(|| (collection_fingerprint(&items[..]), MemoFilter::new()));
        let mut view = Self {
            items,
            facets,
            state: FilterState::new(),
            memo,
            visible: Vec::new(),
            revision: 0,
        };
        view.refresh();
        view
    }

    /// Apply a filter event. Returns `true` if the filter state changed.
    pub fn dispatch(&mut self, event: FilterEvent) -> bool {
        let before = self.state.clone();
        apply_event(&mut self.state, event);
        if self.state == before {
            return false;
        }
        tracing::trace!(
            query = self.state.query(),
            facet = self.state.selection().as_str(),
            "filter changed"
        );
        self.refresh();
        true
    }

    /// Apply a burst of events, deriving the result once for the final state.
    pub fn dispatch_all(&mut self, events: impl IntoIterator<Item = FilterEvent>) -> bool {
        let before = self.state.clone();
        for event in events {
            apply_event(&mut self.state, event);
        }
        if self.state == before {
            return false;
        }
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        self.visible = match self.memo.as_mut() {
            Some((fingerprint, memo)) => memo
                .apply_fingerprinted(*fingerprint, &self.items[..], &self.state)
                .to_vec(),
            None => apply_indices(&self.items[..], &self.state),
        };
        self.revision += 1;
    }

    // -- Queries -----------------------------------------------------------

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Every item, unfiltered.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Facets for rendering filter controls, in first-seen order.
    pub fn facets(&self) -> &FacetSet {
        self.facets.facets()
    }

    /// Number of items carrying a facet, for control badges.
    pub fn facet_count(&self, facet: &str) -> usize {
        self.facets.count(facet)
    }

    /// The visible items in collection order.
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().map(|&i| &self.items[i])
    }

    /// Indices of the visible items.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Whether the current state matches nothing; the page shows an
    /// empty-state message.
    pub fn is_empty_result(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Memo hit count, if memoizing.
    pub fn memo_hits(&self) -> Option<u64> {
        self.memo.as_ref().map(|(_, memo)| memo.hits())
    }
}
