//! Cancellable timer queue.
//!
//! Views register timers here instead of spawning sleeps. The owner polls
//! with the current instant and receives due timers in deterministic order:
//! earliest deadline first, ties broken by insertion order. Cancelled timers
//! never fire, and `cancel_all` drops everything synchronously, so a view
//! that is torn down cannot be called back.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;

/// Handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A timer that has come due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due<K> {
    /// The instant the timer was scheduled for (not the poll instant).
    pub at: Instant,
    pub key: K,
}

#[derive(Debug)]
struct Entry<K> {
    at: Instant,
    seq: u64,
    key: K,
}

impl<K> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<K> Eq for Entry<K> {}

impl<K> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the max-heap pops the earliest deadline, then the lowest sequence.
impl<K> Ord for Entry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deterministic, cancellable timer queue keyed by `K`.
#[derive(Debug)]
pub struct Scheduler<K> {
    heap: BinaryHeap<Entry<K>>,
    live: HashSet<u64>,
    next_seq: u64,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Registers `key` to fire at `at`.
    pub fn schedule(&mut self, key: K, at: Instant) -> TimerId {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Entry { at, seq, key });
        self.live.insert(seq);
        TimerId(seq)
    }

    /// Cancels a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id.0)
    }

    /// Drops every pending timer.
    pub fn cancel_all(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    /// Number of pending (not cancelled) timers.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap
            .iter()
            .filter(|entry| self.live.contains(&entry.seq))
            .map(|entry| entry.at)
            .min()
    }

    /// Pops the next timer due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Due<K>> {
        while let Some(top) = self.heap.peek() {
            if top.at > now {
                return None;
            }
            let entry = self.heap.pop()?;
            if self.live.remove(&entry.seq) {
                return Some(Due {
                    at: entry.at,
                    key: entry.key,
                });
            }
            // Cancelled: discard and keep looking.
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn ms(base: Instant, n: u64) -> Instant {
        base + Duration::from_millis(n)
    }

    #[test]
    fn test_pops_in_deadline_order() {
        let base = Instant::now();
        let mut s = Scheduler::new();
        s.schedule("late", ms(base, 30));
        s.schedule("early", ms(base, 10));
        s.schedule("mid", ms(base, 20));

        let now = ms(base, 100);
        assert_eq!(s.pop_due(now).unwrap().key, "early");
        assert_eq!(s.pop_due(now).unwrap().key, "mid");
        assert_eq!(s.pop_due(now).unwrap().key, "late");
        assert!(s.pop_due(now).is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let base = Instant::now();
        let mut s = Scheduler::new();
        for key in ["a", "b", "c"] {
            s.schedule(key, ms(base, 5));
        }
        let keys: Vec<_> = std::iter::from_fn(|| s.pop_due(ms(base, 5)).map(|d| d.key)).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_not_due_yet() {
        let base = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(1, ms(base, 50));
        assert!(s.pop_due(ms(base, 49)).is_none());
        let due = s.pop_due(ms(base, 50)).unwrap();
        assert_eq!(due.at, ms(base, 50));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let base = Instant::now();
        let mut s = Scheduler::new();
        let id = s.schedule("gone", ms(base, 1));
        s.schedule("kept", ms(base, 2));
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert_eq!(s.len(), 1);
        assert_eq!(s.next_deadline(), Some(ms(base, 2)));
        assert_eq!(s.pop_due(ms(base, 10)).unwrap().key, "kept");
    }

    #[test]
    fn test_cancel_all() {
        let base = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(1, ms(base, 1));
        s.schedule(2, ms(base, 2));
        s.cancel_all();
        assert!(s.is_empty());
        assert_eq!(s.next_deadline(), None);
        assert!(s.pop_due(ms(base, 10)).is_none());
    }
}
