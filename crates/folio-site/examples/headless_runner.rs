//! Headless runner: loads the bundled content, visits every page, drives the
//! reveal clock frame by frame and prints what a renderer would show.
//!
//! Run with: `cargo run --package folio-site --example headless_runner`
//! Set `RUST_LOG=debug` to see scheduler logs.

use std::path::Path;

use folio_core::filter::FacetSelection;
use folio_core::fixed::ratio_to_f64;
use folio_site::{FilterEvent, Page, SiteSession};
use tracing_subscriber::EnvFilter;

/// One frame at roughly 60 Hz.
const FRAME: u64 = 16;

fn run_until_idle(site: &mut SiteSession) -> u32 {
    let mut frames = 0;
    while site.is_animating() {
        site.advance_by(FRAME);
        frames += 1;
    }
    frames
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let content_dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/content"));
    let mut site = SiteSession::load(content_dir).unwrap_or_else(|e| {
        panic!("failed to load content: {e}");
    });

    println!("=== {} ===\n{}\n", site.profile().name, site.profile().title);

    // Home
    site.open_page(Page::Home);
    let frames = run_until_idle(&mut site);
    println!(
        "[home] tagline after {frames} frames: {:?}",
        site.tagline().unwrap_or_default()
    );

    // Projects
    site.open_page(Page::Projects);
    let facets: Vec<&str> = site.projects().facets().iter().collect();
    println!("[projects] facets: {}", facets.join(", "));
    for facet in ["Java", "Firefox", "all"] {
        site.dispatch(FilterEvent::FacetSelected(FacetSelection::parse(facet)))
            .unwrap_or_else(|e| panic!("dispatch failed: {e}"));
        let titles: Vec<&str> = site.projects().visible().map(|p| p.title.as_str()).collect();
        println!("    facet {facet:>8}: {titles:?}");
    }

    // Blog
    site.open_page(Page::Blog);
    site.dispatch(FilterEvent::QueryChanged("xss".into()))
        .unwrap_or_else(|e| panic!("dispatch failed: {e}"));
    for post in site.posts().visible() {
        println!("[blog] {} ({})", post.title, post.date);
    }

    // Skills
    site.open_page(Page::Skills);
    let frames = run_until_idle(&mut site);
    println!("[skills] bars settled after {frames} frames");
    for (skill, (_, bar)) in site.skills().visible().zip(site.visible_skill_bars()) {
        println!("    {:<12} {:>5.1}%", skill.name, ratio_to_f64(bar) * 100.0);
    }

    site.close();
    let events = site.drain_reveal_events();
    println!("\n{} reveal events buffered.", events.len());
}
