//! Recurring tasks on a simulated clock.
//!
//! [`Scheduler`] is the seam the carousel uses to start and cancel its
//! auto-play task. [`VirtualClock`] implements it over a millisecond timeline
//! that only moves when told to, so pause/resume behaviour is testable without
//! wall-clock delays. The live driver moves the same clock with real time.
//!
//! The clock never calls back into controllers. The owner pulls due firings one
//! at a time with [`VirtualClock::pop_due`] and routes each to completion before
//! pulling the next, which keeps handlers run-to-completion.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a recurring task.
    pub struct TimerId;
}

/// Start and cancel recurring tasks.
pub trait Scheduler {
    /// Start a task that first fires one `period` from now, then every `period`.
    fn start_interval(&mut self, period: Duration) -> TimerId;

    /// Cancel a task. Cancelling an unknown or already-cancelled task is a no-op.
    fn cancel(&mut self, id: TimerId);

    /// Whether the task is still scheduled.
    fn is_active(&self, id: TimerId) -> bool;

    /// Number of scheduled tasks.
    fn active_count(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Interval {
    period: Duration,
    next_due: Duration,
    /// Creation order, breaks ties between tasks due at the same instant.
    seq: u64,
}

/// A manually advanced clock measured from page load.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Duration,
    timers: SlotMap<TimerId, Interval>,
    next_seq: u64,
}

impl VirtualClock {
    /// A clock at time zero with no tasks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Earliest pending deadline, if any task is scheduled.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.next_due).min()
    }

    /// Pop the earliest firing due at or before `until`.
    ///
    /// Moves `now` to the firing instant and reschedules the task one period
    /// later. Returns `None` once nothing is due; `now` is then left unchanged,
    /// so callers finish with [`VirtualClock::set_now`].
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (id, due) = self
            .timers
            .iter()
            .filter(|(_, t)| t.next_due <= until)
            .min_by_key(|(_, t)| (t.next_due, t.seq))
            .map(|(id, t)| (id, t.next_due))?;

        self.now = self.now.max(due);
        if let Some(timer) = self.timers.get_mut(id) {
            timer.next_due = due + timer.period;
        }
        Some(id)
    }

    /// Move the clock forward to `at`. Never moves backwards.
    pub fn set_now(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }

    /// Advance by `by`, returning every firing in order.
    ///
    /// Convenience for owners with nothing to route between firings.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let until = self.now + by;
        let mut fired = Vec::new();
        while let Some(id) = self.pop_due(until) {
            fired.push(id);
        }
        self.set_now(until);
        fired
    }
}

impl Scheduler for VirtualClock {
    fn start_interval(&mut self, period: Duration) -> TimerId {
        // Zero periods would fire forever within a single advance.
        let period = period.max(Duration::from_millis(1));
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Interval {
            period,
            next_due: self.now + period,
            seq,
        })
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(id);
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    fn active_count(&self) -> usize {
        self.timers.len()
    }
}
