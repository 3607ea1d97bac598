//! Property-based tests for facets, filtering and reveals.
//!
//! Uses proptest to generate random collections, filter states and clock
//! schedules, then verify the structural invariants hold.

use folio_core::content::{ContentItem, Project};
use folio_core::facet::compute_facets;
use folio_core::filter::{FacetSelection, FilterState, MemoFilter, apply, apply_indices};
use folio_core::id::ViewId;
use folio_core::reveal::{RevealScheduler, RevealSpec, RevealStatus};
use folio_core::test_utils::*;
use proptest::prelude::*;
use slotmap::SlotMap;

// ===========================================================================
// Generators
// ===========================================================================

const VOCAB: [&str; 6] = ["Rust", "rust", "Java", "Kali Linux", "XSS", "Web"];

fn arb_project(id: u32) -> impl Strategy<Value = Project> {
    (
        "[a-zA-Z ]{0,12}",
        "[a-zA-Z ]{0,24}",
        proptest::collection::vec(0..VOCAB.len(), 0..4),
    )
        .prop_map(move |(title, desc, tags)| {
            let tags: Vec<&str> = tags.into_iter().map(|i| VOCAB[i]).collect();
            project(id, &title, &desc, &tags)
        })
}

fn arb_collection(max: usize) -> impl Strategy<Value = Vec<Project>> {
    (0..=max).prop_flat_map(|n| {
        (0..n as u32)
            .map(arb_project)
            .collect::<Vec<_>>()
    })
}

fn arb_state() -> impl Strategy<Value = FilterState> {
    (
        prop_oneof![Just(String::new()), "[a-zA-Z]{1,3}"],
        prop_oneof![
            Just(FacetSelection::All),
            (0..VOCAB.len()).prop_map(|i| FacetSelection::parse(VOCAB[i])),
        ],
    )
        .prop_map(|(q, sel)| FilterState::with(&q, sel))
}

fn view() -> ViewId {
    let mut views: SlotMap<ViewId, ()> = SlotMap::with_key();
    views.insert(())
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Output is an order-preserving subsequence of the input.
    #[test]
    fn filter_is_subsequence(items in arb_collection(20), state in arb_state()) {
        let idx = apply_indices(&items, &state);
        prop_assert!(idx.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(idx.iter().all(|&i| i < items.len()));
    }

    /// The default state is the identity filter.
    #[test]
    fn default_state_is_identity(items in arb_collection(20)) {
        let out: Vec<&Project> = apply(&items, &FilterState::new());
        prop_assert_eq!(out.len(), items.len());
        prop_assert!(out.iter().zip(items.iter()).all(|(a, b)| *a == b));
    }

    /// Filtering is idempotent for a fixed state.
    #[test]
    fn filter_is_idempotent(items in arb_collection(20), state in arb_state()) {
        let once: Vec<Project> = apply(&items, &state).into_iter().cloned().collect();
        let twice: Vec<Project> = apply(&once, &state).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    /// Chained filtering is never wider than filtering the original.
    #[test]
    fn chained_filter_is_subset_of_fresh(
        items in arb_collection(20),
        s1 in arb_state(),
        s2 in arb_state(),
    ) {
        let first: Vec<Project> = apply(&items, &s1).into_iter().cloned().collect();
        let chained: Vec<u32> = apply(&first, &s2).iter().map(|p| p.id().0).collect();
        let fresh: Vec<u32> = apply(&items, &s2).iter().map(|p| p.id().0).collect();
        prop_assert!(chained.iter().all(|id| fresh.contains(id)));
    }

    /// Memoized results equal full re-evaluation across a sequence of states.
    #[test]
    fn memo_equals_full_evaluation(
        items in arb_collection(20),
        states in proptest::collection::vec(arb_state(), 1..10),
    ) {
        let mut memo = MemoFilter::new();
        for state in &states {
            let memoized = memo.apply_indices(&items, state).to_vec();
            prop_assert_eq!(memoized, apply_indices(&items, state));
        }
    }

    /// Switching between collections never serves one collection's result
    /// for the other.
    #[test]
    fn memo_tracks_collection_switches(
        a in arb_collection(8),
        b in arb_collection(8),
        steps in proptest::collection::vec((any::<bool>(), arb_state()), 1..16),
    ) {
        let mut memo = MemoFilter::with_capacity(4);
        for (use_a, state) in &steps {
            let items = if *use_a { &a } else { &b };
            let memoized = memo.apply_indices(items, state).to_vec();
            prop_assert_eq!(memoized, apply_indices(items, state));
        }
    }

    /// Facets contain every tag that appears and nothing else.
    #[test]
    fn facets_are_exactly_the_tags(items in arb_collection(20)) {
        let facets = compute_facets(&items);
        for item in &items {
            for tag in &item.tags {
                prop_assert!(facets.contains(tag));
            }
        }
        for facet in facets.iter() {
            prop_assert!(items.iter().any(|p| p.tags.iter().any(|t| t == facet)));
        }
        let mut sorted: Vec<&str> = facets.iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), facets.len());
    }

    /// Selecting any derived facet yields exactly the items tagged with it.
    #[test]
    fn every_facet_selects_its_items(items in arb_collection(20)) {
        for facet in compute_facets(&items).iter() {
            let state = FilterState::with("", FacetSelection::parse(facet));
            let got: Vec<u32> = apply(&items, &state).iter().map(|p| p.id().0).collect();
            let want: Vec<u32> = items
                .iter()
                .filter(|p| p.tags.iter().any(|t| t == facet))
                .map(|p| p.id().0)
                .collect();
            prop_assert_eq!(got, want);
        }
    }

    /// Text progress never decreases while revealing and ends at the target.
    #[test]
    fn text_reveal_is_monotonic(
        text in "[a-z]{0,16}",
        interval in 0u64..40,
        steps in proptest::collection::vec(0u64..60, 1..40),
    ) {
        let mut sched = RevealScheduler::default();
        let id = sched.request(view(), RevealSpec::text(text.clone(), interval));
        let mut last = 0;
        for dt in steps {
            sched.advance_by(dt);
            let state = sched.state(id).unwrap();
            prop_assert!(state.step >= last);
            last = state.step;
            let shown = sched.visible_text(id).unwrap();
            prop_assert!(text.starts_with(&shown));
        }
        sched.advance_by(interval * (text.len() as u64 + 1));
        prop_assert_eq!(sched.status(id), Some(RevealStatus::Complete));
        prop_assert_eq!(sched.visible_text(id), Some(text));
        prop_assert_eq!(sched.pending_ticks(), 0);
    }

    /// Advancing in many small steps or one large jump ends in the same state.
    #[test]
    fn reveal_is_deterministic_under_clock_granularity(
        text in "[a-z]{1,12}",
        interval in 1u64..30,
        cut in 0u64..400,
    ) {
        let v = view();
        let mut fine = RevealScheduler::default();
        let mut coarse = RevealScheduler::default();
        let a = fine.request(v, RevealSpec::text(text.clone(), interval));
        let b = coarse.request(v, RevealSpec::text(text, interval));
        for t in 0..=cut {
            fine.advance_to(t);
        }
        coarse.advance_to(cut);
        prop_assert_eq!(fine.state(a), coarse.state(b));
        prop_assert_eq!(fine.drain_events(), coarse.drain_events());
    }

    /// After teardown no event for the torn-down view is ever observed.
    #[test]
    fn teardown_is_final(
        text in "[a-z]{1,12}",
        interval in 1u64..30,
        before in 0u64..200,
        after in 0u64..2_000,
    ) {
        let v = view();
        let mut sched = RevealScheduler::default();
        sched.request(v, RevealSpec::text(text, interval));
        sched.advance_to(before);
        sched.teardown(v);
        sched.drain_events();
        sched.advance_by(after);
        prop_assert!(sched.drain_events().is_empty());
        prop_assert_eq!(sched.pending_ticks(), 0);
    }
}
