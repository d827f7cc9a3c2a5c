//! Virtual-time timer queue
//!
//! Native hosts and tests schedule [`Effect::StartTimer`](crate::types::Effect)
//! here instead of on a wall clock, then move time forward explicitly.

use std::time::Duration;

use crate::types::TimerId;

#[derive(Debug, Clone)]
struct Scheduled {
    due: Duration,
    seq: u64,
    timer: TimerId,
}

/// Pending timers ordered by due time, ties broken by scheduling order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// `timer` is waiting to fire.
    pub fn is_pending(&self, timer: &TimerId) -> bool {
        self.pending.iter().any(|s| s.timer == *timer)
    }

    pub fn schedule(&mut self, timer: TimerId, after: Duration) {
        log::debug!("[timer] {timer:?} in {}ms", after.as_millis());
        self.pending.push(Scheduled {
            due: self.now + after,
            seq: self.next_seq,
            timer,
        });
        self.next_seq += 1;
    }

    /// Pop the earliest timer due at or before `deadline`, moving the clock to
    /// its due time.
    ///
    /// Callers that react to a timer by scheduling more should loop on this
    /// rather than use [`advance`](Self::advance), so chained timers falling
    /// inside the same window still fire.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= deadline)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(i, _)| i)?;
        let scheduled = self.pending.remove(index);
        self.now = self.now.max(scheduled.due);
        Some(scheduled.timer)
    }

    /// Move the clock forward to `deadline` without firing anything.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    /// Fire everything due within `by` and move the clock forward.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let deadline = self.now + by;
        let mut fired = Vec::new();
        while let Some(timer) = self.pop_due(deadline) {
            fired.push(timer);
        }
        self.settle(deadline);
        fired
    }
}
