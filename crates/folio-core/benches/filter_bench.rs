//! Criterion benchmarks for facet derivation, filtering and reveals.
//!
//! - `facet_index_10k`: FacetIndex over 10k projects
//! - `filter`: full re-evaluation for query-only, facet-only and combined states
//! - `memo_hit_10k`: MemoFilter hit path with a precomputed fingerprint
//! - `reveal_tagline_to_completion`: one long tagline driven to the end

use criterion::{Criterion, criterion_group, criterion_main};
use folio_core::facet::FacetIndex;
use folio_core::filter::{
    FacetSelection, FilterState, MemoFilter, apply_indices, collection_fingerprint,
};
use folio_core::reveal::{RevealScheduler, RevealSpec};
use folio_core::test_utils::*;
use slotmap::SlotMap;

const ITEMS: usize = 10_000;

fn bench_facets(c: &mut Criterion) {
    let items = synthetic_projects(ITEMS);
    c.bench_function("facet_index_10k", |b| {
        b.iter(|| FacetIndex::build(&items));
    });
}

fn bench_filter(c: &mut Criterion) {
    let items = synthetic_projects(ITEMS);
    let mut group = c.benchmark_group("filter");

    let query = FilterState::with("docker", FacetSelection::All);
    group.bench_function("query_10k", |b| b.iter(|| apply_indices(&items, &query)));

    let facet = FilterState::with("", FacetSelection::parse("Rust"));
    group.bench_function("facet_10k", |b| b.iter(|| apply_indices(&items, &facet)));

    let both = FilterState::with("tooling", FacetSelection::parse("Security"));
    group.bench_function("combined_10k", |b| b.iter(|| apply_indices(&items, &both)));

    group.finish();
}

fn bench_memo(c: &mut Criterion) {
    let items = synthetic_projects(ITEMS);
    let state = FilterState::with("docker", FacetSelection::All);
    let fingerprint = collection_fingerprint(&items);
    let mut memo = MemoFilter::new();
    memo.apply_fingerprinted(fingerprint, &items, &state);
    c.bench_function("memo_hit_10k", |b| {
        b.iter(|| memo.apply_fingerprinted(fingerprint, &items, &state).len());
    });
}

fn bench_reveal(c: &mut Criterion) {
    let tagline = "Security researcher, Rust developer, occasional writer.".repeat(4);
    c.bench_function("reveal_tagline_to_completion", |b| {
        b.iter(|| {
            let mut views: SlotMap<folio_core::id::ViewId, ()> = SlotMap::with_key();
            let mut sched = RevealScheduler::default();
            sched.request(views.insert(()), RevealSpec::text(tagline.clone(), 50));
            sched.advance_to(1_000_000)
        });
    });
}

criterion_group!(benches, bench_facets, bench_filter, bench_memo, bench_reveal);
criterion_main!(benches);
