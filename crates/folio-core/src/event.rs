//! Reveal lifecycle events and the bounded buffer that holds them.
//!
//! The scheduler records one event per state change. The presentation layer
//! drains the buffer after each clock update and re-renders whatever changed.
//! When the buffer is full the oldest events are dropped. Current progress
//! can always be read back from the scheduler.

use std::collections::VecDeque;

use crate::fixed::Ticks;
use crate::id::{RevealId, ViewId};

/// A change in a reveal's lifecycle, stamped with the tick it happened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// A reveal entered `revealing`.
    Started {
        reveal: RevealId,
        owner: ViewId,
        tick: Ticks,
    },
    /// Progress advanced by one unit. `step` is the new unit count.
    Progressed {
        reveal: RevealId,
        owner: ViewId,
        step: u32,
        tick: Ticks,
    },
    /// The reveal reached its full target.
    Completed {
        reveal: RevealId,
        owner: ViewId,
        tick: Ticks,
    },
    /// Pending ticks were cancelled (retarget, explicit cancel or teardown).
    Cancelled {
        reveal: RevealId,
        owner: ViewId,
        tick: Ticks,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealEventKind {
    Started,
    Progressed,
    Completed,
    Cancelled,
}

impl RevealEvent {
    pub fn kind(&self) -> RevealEventKind {
        match self {
            RevealEvent::Started { .. } => RevealEventKind::Started,
            RevealEvent::Progressed { .. } => RevealEventKind::Progressed,
            RevealEvent::Completed { .. } => RevealEventKind::Completed,
            RevealEvent::Cancelled { .. } => RevealEventKind::Cancelled,
        }
    }

    /// The reveal this event concerns.
    pub fn reveal(&self) -> RevealId {
        match self {
            RevealEvent::Started { reveal, .. }
            | RevealEvent::Progressed { reveal, .. }
            | RevealEvent::Completed { reveal, .. }
            | RevealEvent::Cancelled { reveal, .. } => *reveal,
        }
    }

    /// The view that owns the reveal.
    pub fn owner(&self) -> ViewId {
        match self {
            RevealEvent::Started { owner, .. }
            | RevealEvent::Progressed { owner, .. }
            | RevealEvent::Completed { owner, .. }
            | RevealEvent::Cancelled { owner, .. } => *owner,
        }
    }

    /// The tick at which the event occurred.
    pub fn tick(&self) -> Ticks {
        match self {
            RevealEvent::Started { tick, .. }
            | RevealEvent::Progressed { tick, .. }
            | RevealEvent::Completed { tick, .. }
            | RevealEvent::Cancelled { tick, .. } => *tick,
        }
    }
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// Bounded FIFO of events, allocated once. Pushing into a full buffer evicts
/// the oldest event.
#[derive(Debug)]
pub struct EventBuffer {
    events: VecDeque<RevealEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventBuffer {
    /// A buffer holding at most `capacity` events (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: RevealEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events evicted before anyone drained them.
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    /// Oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &RevealEvent> {
        self.events.iter()
    }

    /// Take every buffered event, oldest first. Capacity is kept.
    pub fn drain(&mut self) -> Vec<RevealEvent> {
        self.events.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
