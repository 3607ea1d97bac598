//! Resolved site configuration.
//!
//! Produced from [`SiteConfigData`] after clamping: negative timings become
//! zero (and therefore complete immediately), step counts become at least 1.

use std::path::Path;

use folio_core::fixed::{Ratio, Ticks};
use folio_core::reveal::{DEFAULT_EVENT_CAPACITY, MAX_NUMERIC_STEPS, RevealSpec};

use crate::loader::{DataLoadError, deserialize_file, find_data_file};
use crate::schema::SiteConfigData;

// ===========================================================================
// Resolved config types
// ===========================================================================

/// Tagline timing: one character per `interval` after `delay`, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub interval: Ticks,
    pub delay: Ticks,
}

/// Skill-bar timing: `steps` interpolation steps over `duration` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillTiming {
    pub delay: Ticks,
    pub duration: Ticks,
    pub steps: u32,
}

/// Site-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub tagline: TypewriterTiming,
    pub skill_bar: FillTiming,
    pub event_capacity: usize,
    pub memoize: bool,
}

pub const DEFAULT_TAGLINE_INTERVAL: Ticks = 50;
pub const DEFAULT_SKILL_BAR_DELAY: Ticks = 200;
pub const DEFAULT_SKILL_BAR_DURATION: Ticks = 1_000;

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            tagline: TypewriterTiming {
                interval: DEFAULT_TAGLINE_INTERVAL,
                delay: 0,
            },
            skill_bar: FillTiming {
                delay: DEFAULT_SKILL_BAR_DELAY,
                duration: DEFAULT_SKILL_BAR_DURATION,
                steps: 1,
            },
            event_capacity: DEFAULT_EVENT_CAPACITY,
            memoize: true,
        }
    }
}

impl SiteConfig {
    /// Resolve raw config data, filling defaults and clamping out-of-range values.
    pub fn from_data(data: &SiteConfigData) -> Self {
        Self {
            tagline: TypewriterTiming {
                interval: data
                    .tagline_interval
                    .map_or(DEFAULT_TAGLINE_INTERVAL, clamp_ticks),
                delay: data.tagline_delay.map_or(0, clamp_ticks),
            },
            skill_bar: FillTiming {
                delay: data
                    .skill_bar_delay
                    .map_or(DEFAULT_SKILL_BAR_DELAY, clamp_ticks),
                duration: data
                    .skill_bar_duration
                    .map_or(DEFAULT_SKILL_BAR_DURATION, clamp_ticks),
                steps: data
                    .skill_bar_steps
                    .unwrap_or(1)
                    .clamp(1, MAX_NUMERIC_STEPS),
            },
            event_capacity: data
                .event_capacity
                .unwrap_or(DEFAULT_EVENT_CAPACITY)
                .max(1),
            memoize: data.memoize.unwrap_or(true),
        }
    }

    /// Reveal spec for the home page tagline.
    pub fn tagline_spec(&self, text: &str) -> RevealSpec {
        self.tagline.spec(text)
    }

    /// Reveal spec for a skill bar filling to `target`.
    pub fn skill_bar_spec(&self, target: Ratio) -> RevealSpec {
        self.skill_bar.spec(target)
    }
}

impl TypewriterTiming {
    pub fn spec(&self, text: &str) -> RevealSpec {
        RevealSpec::Text {
            text: text.to_string(),
            interval: self.interval,
            delay: self.delay,
        }
    }
}

impl FillTiming {
    pub fn spec(&self, target: Ratio) -> RevealSpec {
        RevealSpec::Numeric {
            target,
            delay: self.delay,
            duration: self.duration,
            steps: self.steps,
        }
    }
}

/// Negative durations are treated as zero.
fn clamp_ticks(v: i64) -> Ticks {
    Ticks::try_from(v).unwrap_or(0)
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load `site.{ron,toml,json}` from `dir`, or defaults if absent.
pub fn load_site_config(dir: &Path) -> Result<SiteConfig, DataLoadError> {
    match find_data_file(dir, "site")? {
        Some(path) => {
            let data: SiteConfigData = deserialize_file(&path)?;
            tracing::debug!(file = %path.display(), "loaded site config");
            Ok(SiteConfig::from_data(&data))
        }
        None => {
            tracing::debug!(dir = %dir.display(), "no site config, using defaults");
            Ok(SiteConfig::default())
        }
    }
}
