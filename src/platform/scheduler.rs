//! Cancellable one-shot timers
//!
//! Timers are ordered by due time, then by the order they were scheduled.
//! Nothing fires on its own: the owner asks for the next due timer.

use std::collections::BTreeMap;

/// Handle for cancelling a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    due_ms: u64,
    seq: u64,
}

impl TimerHandle {
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}

/// Timer queue carrying a task payload per timer
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    timers: BTreeMap<(u64, u64), T>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            timers: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at `due_ms`
    pub fn schedule(&mut self, due_ms: u64, task: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert((due_ms, seq), task);
        TimerHandle { due_ms, seq }
    }

    /// Cancel a timer; returns its task if it had not fired yet
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        self.timers.remove(&(handle.due_ms, handle.seq))
    }

    /// Due time of the earliest timer
    pub fn next_due(&self) -> Option<u64> {
        self.timers.keys().next().map(|&(due, _)| due)
    }

    /// Remove and return the earliest timer if it is due at `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerHandle, T)> {
        let (&(due_ms, seq), _) = self.timers.first_key_value()?;
        if due_ms > now_ms {
            return None;
        }
        self.timers
            .pop_first()
            .map(|(_, task)| (TimerHandle { due_ms, seq }, task))
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&(handle.due_ms, handle.seq))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
