//! Reveal time and content fingerprints.
//!
//! The scheduler never reads the system clock. The presentation layer feeds it
//! either absolute timestamps or elapsed deltas, which keeps every reveal
//! fully determined by its `RevealSpec` and the sequence of clock updates.

use crate::fixed::Ticks;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Monotonic reveal clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clock {
    /// Current time in ticks.
    now: Ticks,
}

impl Clock {
    /// Create a clock starting at tick 0.
    pub fn new() -> Self {
        Self { now: 0 }
    }

    /// Create a clock starting at the given time.
    pub fn starting_at(now: Ticks) -> Self {
        Self { now }
    }

    /// The current time.
    pub fn now(&self) -> Ticks {
        self.now
    }

    /// Move to an absolute time. Earlier times are ignored so the clock
    /// never runs backwards. Returns the resulting time.
    pub fn advance_to(&mut self, t: Ticks) -> Ticks {
        self.now = self.now.max(t);
        self.now
    }

    /// Move forward by `dt` ticks. Returns the resulting time.
    pub fn advance_by(&mut self, dt: Ticks) -> Ticks {
        self.now = self.now.saturating_add(dt);
        self.now
    }
}

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// 64-bit FNV-1a over a collection's filterable content, keying memoized filter
/// results. Stable across runs and platforms; not cryptographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    /// Start a new hash.
    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 ^ u64::from(b)).wrapping_mul(Self::FNV_PRIME);
        }
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write(&v.to_le_bytes());
    }

    /// Feed a length-prefixed string into the hash, so that adjacent strings
    /// cannot alias ("ab" + "c" vs "a" + "bc").
    pub fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write(s.as_bytes());
    }

    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}
