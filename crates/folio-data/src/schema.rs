//! Serde data file structs that do not map one-to-one onto core types.
//!
//! Content records deserialize straight into the `folio_core::content` types.
//! Site configuration is read into the raw form below first, so that values
//! the scheduler cannot represent (negative durations) can be clamped during
//! resolution instead of failing the whole load.

use serde::Deserialize;

// ===========================================================================
// Site configuration
// ===========================================================================

/// Site configuration as written in `site.{ron,toml,json}`. Every field is
/// optional; missing fields take the defaults of [`crate::SiteConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfigData {
    /// Milliseconds per tagline character.
    pub tagline_interval: Option<i64>,
    /// Milliseconds before the first tagline character.
    pub tagline_delay: Option<i64>,
    /// Milliseconds before a skill bar starts filling.
    pub skill_bar_delay: Option<i64>,
    /// Milliseconds a skill bar takes to fill.
    pub skill_bar_duration: Option<i64>,
    /// Interpolation steps per skill bar. 1 = single transition.
    pub skill_bar_steps: Option<u32>,
    /// Reveal event buffer capacity.
    pub event_capacity: Option<usize>,
    /// Whether collection views memoize filter results.
    pub memoize: Option<bool>,
}
