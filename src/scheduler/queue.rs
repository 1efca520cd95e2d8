use super::{Clock, Scheduler, TimerId};
use std::time::Duration;
use tracing::trace;

/// Shortest period a recurring timer may have. A zero period would make
/// `pop_due` yield the same timer forever.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    deadline: Duration,
    period: Option<Duration>,
    /// Arming order, used to break deadline ties
    seq: u64,
}

/// Timer queue over a [`Clock`]
///
/// Holds at most a handful of timers in practice, so entries live in a flat
/// `Vec` and lookups are linear.
///
/// Timers armed while due timers are being drained are measured from the
/// deadline of the timer just popped, not from the clock. A clock that jumps
/// far ahead therefore produces the same sequence as one that steps.
#[derive(Debug)]
pub struct TimerQueue<C: Clock> {
    clock: C,
    entries: Vec<Entry>,
    next_id: u64,
    next_seq: u64,
    /// Deadline of the last popped timer until the queue reports nothing due
    firing_at: Option<Duration>,
}

impl<C: Clock> TimerQueue<C> {
    /// Create an empty queue reading time from `clock`
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            entries: Vec::new(),
            next_id: 1,
            next_seq: 0,
            firing_at: None,
        }
    }

    /// Get the underlying clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn arm(&mut self, delay: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        let base = self.firing_at.unwrap_or_else(|| self.clock.now());
        let deadline = base + delay;
        self.entries.push(Entry {
            id,
            deadline,
            period,
            seq,
        });
        trace!("Armed {} at {:?} (period {:?})", id, deadline, period);
        id
    }
}

impl<C: Clock> Scheduler for TimerQueue<C> {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn schedule_after(&mut self, delay: Duration) -> TimerId {
        self.arm(delay, None)
    }

    fn schedule_every(&mut self, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.arm(period, Some(period))
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            trace!("Cancelled {}", id);
        }
        removed
    }

    fn pop_due(&mut self) -> Option<TimerId> {
        let now = self.clock.now();
        let due = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
            .map(|(index, _)| index);
        let Some(index) = due else {
            self.firing_at = None;
            return None;
        };

        let id = self.entries[index].id;
        self.firing_at = Some(self.entries[index].deadline);
        match self.entries[index].period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[index];
                entry.deadline += period;
                entry.seq = seq;
            }
            None => {
                self.entries.swap_remove(index);
            }
        }
        Some(id)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    fn pending(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualClock;

    fn queue() -> (TimerQueue<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (TimerQueue::new(clock.clone()), clock)
    }

    fn drain(queue: &mut TimerQueue<ManualClock>) -> Vec<TimerId> {
        std::iter::from_fn(|| queue.pop_due()).collect()
    }

    #[test]
    fn test_one_shot_fires_at_deadline() {
        let (mut queue, clock) = queue();
        let id = queue.schedule_after(Duration::from_millis(3000));

        clock.advance_ms(2999);
        assert_eq!(queue.pop_due(), None);

        clock.advance_ms(1);
        assert_eq!(queue.pop_due(), Some(id));
        assert_eq!(queue.pop_due(), None);
        assert!(!queue.is_scheduled(id));
    }

    #[test]
    fn test_recurring_rearms_from_deadline() {
        let (mut queue, clock) = queue();
        let id = queue.schedule_every(Duration::from_millis(150));

        // A large jump catches up on every missed period
        clock.advance_ms(450);
        assert_eq!(drain(&mut queue), vec![id, id, id]);
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(600)));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let (mut queue, clock) = queue();
        let id = queue.schedule_every(Duration::from_millis(100));

        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));

        clock.advance_ms(1000);
        assert_eq!(queue.pop_due(), None);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_fires_in_deadline_then_arming_order() {
        let (mut queue, clock) = queue();
        let late = queue.schedule_after(Duration::from_millis(200));
        let first = queue.schedule_after(Duration::from_millis(100));
        let second = queue.schedule_after(Duration::from_millis(100));

        clock.advance_ms(200);
        assert_eq!(drain(&mut queue), vec![first, second, late]);
    }

    #[test]
    fn test_arming_while_draining_uses_fired_deadline() {
        let (mut queue, clock) = queue();
        let first = queue.schedule_after(Duration::from_millis(100));

        clock.advance_ms(1000);
        assert_eq!(queue.pop_due(), Some(first));

        // Handling `first` arms a follow-up relative to its deadline
        let follow_up = queue.schedule_after(Duration::from_millis(100));
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(200)));
        assert_eq!(queue.pop_due(), Some(follow_up));
        assert_eq!(queue.pop_due(), None);

        // Once drained, arming is relative to the clock again
        queue.schedule_after(Duration::from_millis(100));
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(1100)));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let (mut queue, clock) = queue();
        let id = queue.schedule_every(Duration::ZERO);

        clock.advance_ms(2);
        assert_eq!(drain(&mut queue), vec![id, id]);
    }
}
