//! Timer scheduling
//!
//! Everything time-driven in the avatar (the thinking delay, the word-by-word
//! reveal) goes through the [`Scheduler`] trait. The app drives a
//! [`TimerQueue`] over the [`SystemClock`]; tests drive the same queue over a
//! [`ManualClock`] so timings are exact.
//!
//! The queue never runs callbacks itself. Owners ask it for the next due
//! [`TimerId`] and dispatch on their own, which keeps all mutation in the
//! single context that owns the state.

mod clock;
mod queue;

pub use clock::{Clock, ManualClock, SystemClock};
pub use queue::TimerQueue;

use std::fmt;
use std::time::Duration;

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, unique per queue
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedule-after / schedule-every / cancel over some clock
pub trait Scheduler {
    /// Current time as seen by this scheduler
    fn now(&self) -> Duration;

    /// Arm a one-shot timer that becomes due after `delay`.
    ///
    /// While due timers are being drained the delay counts from the deadline
    /// of the timer being handled rather than from `now`.
    fn schedule_after(&mut self, delay: Duration) -> TimerId;

    /// Arm a recurring timer that becomes due every `period`
    fn schedule_every(&mut self, period: Duration) -> TimerId;

    /// Disarm a timer. Returns `false` if it was not armed.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Take the earliest timer whose deadline has passed.
    ///
    /// One-shot timers are removed; recurring timers are re-armed one period
    /// after the deadline that just fired.
    fn pop_due(&mut self) -> Option<TimerId>;

    /// Earliest armed deadline, if any
    fn next_deadline(&self) -> Option<Duration>;

    /// Check whether a timer is still armed
    fn is_scheduled(&self, id: TimerId) -> bool;

    /// Number of armed timers
    fn pending(&self) -> usize;
}
