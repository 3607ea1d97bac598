//! Folio Core -- filtering and progressive reveal for a personal profile site.
//!
//! The site's content (projects, blog posts, skills) is static and read-only.
//! This crate provides the only stateful pieces that sit between that content
//! and the page:
//!
//! - [`facet`] -- derives the distinct facet values of a collection, used to
//!   build filter controls.
//! - [`filter`] -- combines a free-text query and a single facet selection
//!   into a stable, order-preserving filter over a collection.
//! - [`reveal`] -- a tick-driven scheduler that reveals text one character at
//!   a time and numeric ratios in interpolation steps, with per-reveal
//!   cancellation tokens and per-view teardown.
//!
//! Facet and filter operations are pure functions of their inputs and can be
//! re-run on every state change. The scheduler never reads the system clock;
//! callers advance it explicitly, which keeps reveals deterministic.
//!
//! # Key Types
//!
//! - [`content::ContentItem`] -- the trait filtering and facets see records through.
//! - [`filter::FilterState`] -- query plus [`filter::FacetSelection`].
//! - [`facet::FacetIndex`] -- facets in first-seen order with item counts.
//! - [`reveal::RevealScheduler`] -- owns reveals and their pending ticks.
//! - [`event::RevealEvent`] -- lifecycle events buffered for the presentation layer.

pub mod clock;
pub mod content;
pub mod event;
pub mod facet;
pub mod filter;
pub mod fixed;
pub mod id;
pub mod reveal;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
