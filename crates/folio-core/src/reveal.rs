//! Timed progressive reveal of text and numeric values.
//!
//! Each reveal is a small state machine, `Idle -> Revealing -> Complete`,
//! advanced one unit per tick: one character of a tagline, or one
//! interpolation step of a skill-bar ratio. The scheduler owns every reveal
//! and a single min-ordered queue of pending ticks.
//!
//! # Cancellation
//!
//! Every reveal carries a generation number, and every pending tick records
//! the generation it was scheduled under. Retargeting or cancelling a reveal
//! bumps its generation and drops its pending tick from the queue, and
//! tearing down a view removes its reveals entirely. The queue therefore
//! holds at most one tick per revealing reveal. `fire` still checks the
//! generation, so two timers can never drive the same reveal.
//!
//! # Timing
//!
//! Unit `k` of a reveal started at `t0` is due at `t0 + offset(k)`, computed
//! from the `RevealSpec` rather than from the previous tick, so progress offsets
//! never drift. Advancing the clock over a span fires every due tick in
//! `(due, scheduling order)` order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use slotmap::SlotMap;

use crate::clock::Clock;
use crate::event::{EventBuffer, RevealEvent};
use crate::fixed::{Ratio, Ticks, interpolate};
use crate::id::{RevealId, ViewId};

/// Upper bound on interpolation steps for a numeric reveal.
pub const MAX_NUMERIC_STEPS: u32 = 1_000;

/// Default event buffer capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// Spec
// ---------------------------------------------------------------------------

/// What to reveal and how fast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealSpec {
    /// Reveal `text` one character per `interval`, starting after `delay`.
    Text {
        text: String,
        interval: Ticks,
        delay: Ticks,
    },
    /// Reveal a ratio in `steps` equal interpolation steps spread over
    /// `duration`, starting after `delay`. One step is a single delayed
    /// transition to the final value.
    Numeric {
        target: Ratio,
        delay: Ticks,
        duration: Ticks,
        steps: u32,
    },
}

impl RevealSpec {
    /// Typewriter text with no start delay.
    pub fn text(text: impl Into<String>, interval: Ticks) -> Self {
        RevealSpec::Text {
            text: text.into(),
            interval,
            delay: 0,
        }
    }

    /// Single delayed transition to `target`.
    pub fn numeric(target: Ratio, delay: Ticks, duration: Ticks) -> Self {
        RevealSpec::Numeric {
            target,
            delay,
            duration,
            steps: 1,
        }
    }

    /// Number of units the reveal advances through.
    fn total_units(&self) -> u32 {
        match self {
            RevealSpec::Text { text, .. } => {
                u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
            }
            RevealSpec::Numeric { target, steps, .. } => {
                if *target == Ratio::ZERO {
                    0
                } else {
                    (*steps).clamp(1, MAX_NUMERIC_STEPS)
                }
            }
        }
    }

    /// Offset from the reveal's start at which unit `k` (1-based) is due.
    fn unit_offset(&self, k: u32) -> Ticks {
        match self {
            RevealSpec::Text {
                interval, delay, ..
            } => delay.saturating_add(interval.saturating_mul(u64::from(k))),
            RevealSpec::Numeric {
                delay, duration, ..
            } => {
                let steps = u64::from(self.total_units().max(1));
                let spread = u128::from(*duration) * u128::from(k) / u128::from(steps);
                delay.saturating_add(Ticks::try_from(spread).unwrap_or(Ticks::MAX))
            }
        }
    }

    /// Whether the reveal skips straight to complete: an empty target, or no
    /// time to spread the reveal over.
    fn completes_immediately(&self) -> bool {
        if self.total_units() == 0 {
            return true;
        }
        match self {
            RevealSpec::Text { interval, .. } => *interval == 0,
            RevealSpec::Numeric {
                delay, duration, ..
            } => *delay == 0 && *duration == 0,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Lifecycle of a single reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealStatus {
    /// Created or reset; nothing shown, nothing scheduled.
    Idle,
    /// Ticks are pending.
    Revealing,
    /// Progress equals the full target. No ticks are pending.
    Complete,
}

/// Current progress of a reveal, in units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    pub status: RevealStatus,
    /// Units revealed so far.
    pub step: u32,
    /// Units in the full target.
    pub total: u32,
}

/// The displayable value of a reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealValue {
    /// The visible prefix of the text.
    Text(String),
    /// The current ratio.
    Ratio(Ratio),
}

/// An owned, read-only view of a reveal for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSnapshot {
    pub id: RevealId,
    pub owner: ViewId,
    pub state: RevealState,
    pub value: RevealValue,
}

#[derive(Debug)]
struct RevealEntry {
    owner: ViewId,
    spec: RevealSpec,
    /// Pre-split characters for text reveals, empty otherwise.
    chars: Vec<char>,
    state: RevealState,
    /// Cancellation token: ticks scheduled under another generation are stale.
    generation: u64,
    started_at: Ticks,
}

impl RevealEntry {
    fn new(owner: ViewId, spec: RevealSpec) -> Self {
        let chars = match &spec {
            RevealSpec::Text { text, .. } => text.chars().collect(),
            RevealSpec::Numeric { .. } => Vec::new(),
        };
        let total = spec.total_units();
        Self {
            owner,
            spec,
            chars,
            state: RevealState {
                status: RevealStatus::Idle,
                step: 0,
                total,
            },
            generation: 0,
            started_at: 0,
        }
    }

    fn value(&self) -> RevealValue {
        match &self.spec {
            RevealSpec::Text { .. } => {
                RevealValue::Text(self.chars[..self.state.step as usize].iter().collect())
            }
            RevealSpec::Numeric { target, .. } => {
                RevealValue::Ratio(interpolate(*target, self.state.step, self.state.total))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pending ticks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTick {
    due: Ticks,
    seq: u64,
    reveal: RevealId,
    generation: u64,
    step: u32,
}

impl Ord for PendingTick {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the earliest (due, seq) first.
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

impl PartialOrd for PendingTick {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Owns every active reveal and drives them from clock updates.
#[derive(Debug)]
pub struct RevealScheduler {
    reveals: SlotMap<RevealId, RevealEntry>,
    queue: BinaryHeap<PendingTick>,
    clock: Clock,
    next_seq: u64,
    events: EventBuffer,
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl RevealScheduler {
    /// Create a scheduler at tick 0 with the given event buffer capacity.
    pub fn new(event_capacity: usize) -> Self {
        Self {
            reveals: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            clock: Clock::new(),
            next_seq: 0,
            events: EventBuffer::new(event_capacity),
        }
    }

    /// Current scheduler time.
    pub fn now(&self) -> Ticks {
        self.clock.now()
    }

    /// Number of reveals (any status) held by the scheduler.
    pub fn len(&self) -> usize {
        self.reveals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reveals.is_empty()
    }

    // -- Lifecycle ---------------------------------------------------------

    /// Create a reveal owned by `owner` and start it at the current time.
    pub fn request(&mut self, owner: ViewId, spec: RevealSpec) -> RevealId {
        let id = self.reveals.insert(RevealEntry::new(owner, spec));
        tracing::debug!(reveal = ?id, owner = ?owner, now = self.now(), "reveal requested");
        self.start(id);
        id
    }

    /// Replace a reveal's target. Pending ticks are cancelled first, the
    /// reveal resets to idle, then starts again from zero. Returns `false`
    /// if the reveal does not exist.
    pub fn retarget(&mut self, id: RevealId, spec: RevealSpec) -> bool {
        if !self.cancel(id) {
            return false;
        }
        if let Some(entry) = self.reveals.get_mut(id) {
            let owner = entry.owner;
            let generation = entry.generation;
            *entry = RevealEntry::new(owner, spec);
            entry.generation = generation;
        }
        self.start(id);
        true
    }

    /// Restart a reveal from zero with its current target.
    pub fn restart(&mut self, id: RevealId) -> bool {
        if !self.cancel(id) {
            return false;
        }
        self.start(id);
        true
    }

    /// Cancel pending ticks and reset the reveal to idle. Returns `false` if
    /// the reveal does not exist.
    pub fn cancel(&mut self, id: RevealId) -> bool {
        let now = self.now();
        let Some(entry) = self.reveals.get_mut(id) else {
            return false;
        };
        entry.generation += 1;
        if entry.state.status == RevealStatus::Revealing {
            self.events.push(RevealEvent::Cancelled {
                reveal: id,
                owner: entry.owner,
                tick: now,
            });
            tracing::debug!(reveal = ?id, step = entry.state.step, now, "reveal cancelled");
        }
        entry.state.status = RevealStatus::Idle;
        entry.state.step = 0;
        self.purge(id);
        true
    }

    /// Jump straight to the full target, cancelling pending ticks.
    pub fn complete_now(&mut self, id: RevealId) -> bool {
        let now = self.now();
        let Some(entry) = self.reveals.get_mut(id) else {
            return false;
        };
        if entry.state.status == RevealStatus::Complete {
            return true;
        }
        entry.generation += 1;
        entry.state.step = entry.state.total;
        entry.state.status = RevealStatus::Complete;
        self.events.push(RevealEvent::Completed {
            reveal: id,
            owner: entry.owner,
            tick: now,
        });
        self.purge(id);
        true
    }

    /// Remove a single reveal, cancelling its pending ticks.
    pub fn remove(&mut self, id: RevealId) -> bool {
        if !self.cancel(id) {
            return false;
        }
        self.reveals.remove(id);
        true
    }

    /// Cancel and remove every reveal owned by `owner`. After this call no
    /// further events are produced for those reveals. Returns the number of
    /// reveals removed.
    pub fn teardown(&mut self, owner: ViewId) -> usize {
        let owned: Vec<RevealId> = self
            .reveals
            .iter()
            .filter(|(_, e)| e.owner == owner)
            .map(|(id, _)| id)
            .collect();
        for &id in &owned {
            self.remove(id);
        }
        tracing::debug!(owner = ?owner, removed = owned.len(), "view torn down");
        owned.len()
    }

    // -- Clock -------------------------------------------------------------

    /// Advance to absolute time `t`, firing every tick due at or before it.
    /// Returns the number of progress steps applied.
    pub fn advance_to(&mut self, t: Ticks) -> usize {
        let target = self.clock.advance_to(t);
        let mut applied = 0;
        while let Some(top) = self.queue.peek() {
            if top.due > target {
                break;
            }
            let Some(tick) = self.queue.pop() else {
                break;
            };
            if self.fire(tick) {
                applied += 1;
            }
        }
        applied
    }

    /// Advance by `dt` ticks. Returns the number of progress steps applied.
    pub fn advance_by(&mut self, dt: Ticks) -> usize {
        let t = self.now().saturating_add(dt);
        self.advance_to(t)
    }

    /// Time of the earliest pending tick, if any.
    pub fn next_due(&self) -> Option<Ticks> {
        self.queue.peek().map(|t| t.due)
    }

    /// Number of pending ticks. At most one per revealing reveal.
    pub fn pending_ticks(&self) -> usize {
        self.queue.len()
    }

    // -- Queries -----------------------------------------------------------

    pub fn contains(&self, id: RevealId) -> bool {
        self.reveals.contains_key(id)
    }

    pub fn state(&self, id: RevealId) -> Option<RevealState> {
        self.reveals.get(id).map(|e| e.state)
    }

    pub fn status(&self, id: RevealId) -> Option<RevealStatus> {
        self.reveals.get(id).map(|e| e.state.status)
    }

    pub fn owner(&self, id: RevealId) -> Option<ViewId> {
        self.reveals.get(id).map(|e| e.owner)
    }

    /// The current displayable value.
    pub fn value(&self, id: RevealId) -> Option<RevealValue> {
        self.reveals.get(id).map(RevealEntry::value)
    }

    /// The visible prefix of a text reveal. `None` for numeric reveals.
    pub fn visible_text(&self, id: RevealId) -> Option<String> {
        match self.value(id)? {
            RevealValue::Text(s) => Some(s),
            RevealValue::Ratio(_) => None,
        }
    }

    /// Units revealed so far: characters for text, steps for numeric.
    pub fn progress(&self, id: RevealId) -> Option<u32> {
        self.reveals.get(id).map(|e| e.state.step)
    }

    /// Current ratio of a numeric reveal, or fraction of characters shown for
    /// a text reveal.
    pub fn ratio(&self, id: RevealId) -> Option<Ratio> {
        let entry = self.reveals.get(id)?;
        Some(match entry.value() {
            RevealValue::Ratio(r) => r,
            RevealValue::Text(_) => interpolate(Ratio::ONE, entry.state.step, entry.state.total),
        })
    }

    pub fn snapshot(&self, id: RevealId) -> Option<RevealSnapshot> {
        let entry = self.reveals.get(id)?;
        Some(RevealSnapshot {
            id,
            owner: entry.owner,
            state: entry.state,
            value: entry.value(),
        })
    }

    /// Reveals owned by a view, in slot order.
    pub fn reveals_of(&self, owner: ViewId) -> Vec<RevealId> {
        self.reveals
            .iter()
            .filter(|(_, e)| e.owner == owner)
            .map(|(id, _)| id)
            .collect()
    }

    // -- Events ------------------------------------------------------------

    pub fn events(&self) -> &EventBuffer {
        &self.events
    }

    /// Remove and return all buffered events, oldest first.
    pub fn drain_events(&mut self) -> Vec<RevealEvent> {
        self.events.drain()
    }

    // -- Internals ---------------------------------------------------------

    /// Drop the pending tick of a reveal whose generation just moved on.
    fn purge(&mut self, id: RevealId) {
        self.queue.retain(|t| t.reveal != id);
    }

    /// Transition an idle reveal to revealing (or straight to complete).
    fn start(&mut self, id: RevealId) {
        let now = self.now();
        let Some(entry) = self.reveals.get_mut(id) else {
            return;
        };
        debug_assert_eq!(entry.state.status, RevealStatus::Idle);
        entry.started_at = now;
        entry.state.step = 0;

        if entry.spec.completes_immediately() {
            entry.state.step = entry.state.total;
            entry.state.status = RevealStatus::Complete;
            self.events.push(RevealEvent::Completed {
                reveal: id,
                owner: entry.owner,
                tick: now,
            });
            tracing::debug!(reveal = ?id, now, "reveal completed immediately");
            return;
        }

        entry.state.status = RevealStatus::Revealing;
        self.events.push(RevealEvent::Started {
            reveal: id,
            owner: entry.owner,
            tick: now,
        });
        let due = now.saturating_add(entry.spec.unit_offset(1));
        let generation = entry.generation;
        self.schedule(id, generation, 1, due);
    }

    fn schedule(&mut self, reveal: RevealId, generation: u64, step: u32, due: Ticks) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(PendingTick {
            due,
            seq,
            reveal,
            generation,
            step,
        });
    }

    /// Apply one pending tick. Stale ticks are discarded and return `false`.
    fn fire(&mut self, tick: PendingTick) -> bool {
        let Some(entry) = self.reveals.get_mut(tick.reveal) else {
            tracing::trace!(reveal = ?tick.reveal, "discarding tick for removed reveal");
            return false;
        };
        if entry.generation != tick.generation || entry.state.status != RevealStatus::Revealing {
            tracing::trace!(reveal = ?tick.reveal, "discarding stale tick");
            return false;
        }

        entry.state.step = tick.step;
        let owner = entry.owner;
        self.events.push(RevealEvent::Progressed {
            reveal: tick.reveal,
            owner,
            step: tick.step,
            tick: tick.due,
        });
        tracing::trace!(reveal = ?tick.reveal, step = tick.step, at = tick.due, "reveal tick");

        if tick.step >= entry.state.total {
            entry.state.status = RevealStatus::Complete;
            self.events.push(RevealEvent::Completed {
                reveal: tick.reveal,
                owner,
                tick: tick.due,
            });
            tracing::debug!(reveal = ?tick.reveal, at = tick.due, "reveal complete");
        } else {
            let next = tick.step + 1;
            let due = entry.started_at.saturating_add(entry.spec.unit_offset(next));
            let generation = entry.generation;
            self.schedule(tick.reveal, generation, next, due);
        }
        true
    }
}
