//! Deadline-ordered delayed callbacks driven by an injected clock.
//!
//! Nothing here sleeps or spawns. Owners schedule keys against an `Instant`
//! and drain whatever is due from their `tick`, so every timer is owned by
//! exactly one deck instance and dies with it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer whose deadline has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    /// When the timer was due. Follow-up timers are scheduled from here,
    /// not from the tick's `now`, so late ticks don't stretch sequences.
    pub deadline: Instant,
    pub key: K,
}

#[derive(Debug)]
struct Pending<K> {
    id: TimerId,
    deadline: Instant,
    key: K,
}

#[derive(Debug)]
pub struct TimerQueue<K> {
    next_id: u64,
    pending: Vec<Pending<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<K> TimerQueue<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, from: Instant, delay: Duration, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            deadline: from + delay,
            key,
        });
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| !predicate(&p.key));
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Remove and return the earliest due timer. Equal deadlines fire in
    /// scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired<K>> {
        let (pos, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(_, p)| (p.deadline, p.id))?;
        let Pending { id, deadline, key } = self.pending.swap_remove(pos);
        Some(Fired { id, deadline, key })
    }
}
