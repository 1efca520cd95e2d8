//! Word-by-word reply reveal
//!
//! Simulates an assistant typing: every tick exposes one more word of a fixed
//! reply. Words are the pieces of `text.split(' ')`, so runs of spaces yield
//! empty words and the revealed prefix briefly grows by a lone space.

use crate::scheduler::{Scheduler, TimerId};
use std::time::Duration;
use tracing::{debug, trace};

/// Receives reveal progress
pub trait RevealSink {
    /// Called with the revealed prefix after each tick
    fn on_word(&mut self, revealed: &str);

    /// Called once when the whole reply has been revealed
    fn on_done(&mut self);
}

/// Where a revealer is in its run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealStatus {
    /// Never started
    #[default]
    Inactive,
    /// Ticking
    Revealing,
    /// Revealed everything and reported done
    Finished,
    /// Stopped before finishing
    Cancelled,
}

/// Split a reply into reveal tokens, keeping empty tokens
pub fn split_words(text: &str) -> Vec<String> {
    text.split(' ').map(str::to_owned).collect()
}

/// Time from `start` until `on_done` for `text` at `word_delay`
pub fn reveal_duration(text: &str, word_delay: Duration) -> Duration {
    if text.is_empty() {
        return Duration::ZERO;
    }
    let words = u32::try_from(text.split(' ').count()).unwrap_or(u32::MAX);
    word_delay.saturating_mul(words)
}

/// Reveals one reply at a time on a recurring timer
#[derive(Debug, Default)]
pub struct ResponseRevealer {
    words: Vec<String>,
    cursor: usize,
    timer: Option<TimerId>,
    status: RevealStatus,
}

impl ResponseRevealer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin revealing `text`, one word every `word_delay`.
    ///
    /// Any reveal already running is cancelled first. An empty `text` reports
    /// done immediately without any words.
    pub fn start<S: Scheduler + ?Sized>(
        &mut self,
        text: &str,
        word_delay: Duration,
        scheduler: &mut S,
        sink: &mut dyn RevealSink,
    ) {
        self.cancel(scheduler);
        self.cursor = 0;

        if text.is_empty() {
            self.words.clear();
            self.status = RevealStatus::Finished;
            debug!("Empty reply, reveal finished immediately");
            sink.on_done();
            return;
        }

        self.words = split_words(text);
        self.timer = Some(scheduler.schedule_every(word_delay));
        self.status = RevealStatus::Revealing;
        debug!(
            "Revealing {} words every {}ms",
            self.words.len(),
            word_delay.as_millis()
        );
    }

    /// Check if `id` is this revealer's live timer
    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Handle a fired timer. Returns `false` if the timer is not ours.
    pub fn on_tick<S: Scheduler + ?Sized>(
        &mut self,
        id: TimerId,
        scheduler: &mut S,
        sink: &mut dyn RevealSink,
    ) -> bool {
        if !self.owns(id) {
            return false;
        }

        let Some(words) = self.words.get(..=self.cursor) else {
            // Ticking past the end cannot happen; treat it as completion.
            self.finish(scheduler, sink);
            return true;
        };
        let revealed = words.join(" ");
        self.cursor += 1;
        trace!("Revealed {}/{} words", self.cursor, self.words.len());
        sink.on_word(&revealed);

        if self.cursor >= self.words.len() {
            self.finish(scheduler, sink);
        }
        true
    }

    fn finish<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, sink: &mut dyn RevealSink) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        self.status = RevealStatus::Finished;
        debug!("Reveal finished");
        sink.on_done();
    }

    /// Stop revealing. No sink calls happen after this returns.
    ///
    /// Returns `true` if a running reveal was stopped.
    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        let Some(timer) = self.timer.take() else {
            return false;
        };
        scheduler.cancel(timer);
        self.status = RevealStatus::Cancelled;
        debug!("Reveal cancelled after {} words", self.cursor);
        true
    }

    pub fn status(&self) -> RevealStatus {
        self.status
    }

    /// Check if a reveal is running
    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ManualClock, TimerQueue};

    const JOKE: &str = "How does the ocean say hi? It waves!";

    #[derive(Default)]
    struct Recorder {
        words: Vec<String>,
        done: usize,
    }

    impl RevealSink for Recorder {
        fn on_word(&mut self, revealed: &str) {
            self.words.push(revealed.to_string());
        }

        fn on_done(&mut self) {
            self.done += 1;
        }
    }

    fn pump(
        revealer: &mut ResponseRevealer,
        queue: &mut TimerQueue<ManualClock>,
        sink: &mut Recorder,
    ) {
        while let Some(id) = queue.pop_due() {
            revealer.on_tick(id, queue, sink);
        }
    }

    #[test]
    fn test_split_keeps_empty_words() {
        assert_eq!(split_words("a  b"), vec!["a", "", "b"]);
        assert_eq!(split_words(JOKE).len(), 8);
    }

    #[test]
    fn test_reveal_duration() {
        let delay = Duration::from_millis(150);
        assert_eq!(reveal_duration(JOKE, delay), Duration::from_millis(1200));
        assert_eq!(reveal_duration("", delay), Duration::ZERO);
    }

    #[test]
    fn test_reveals_growing_prefixes() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new(clock.clone());
        let mut revealer = ResponseRevealer::new();
        let mut sink = Recorder::default();

        revealer.start(JOKE, Duration::from_millis(150), &mut queue, &mut sink);

        for _ in 0..8 {
            clock.advance_ms(150);
            pump(&mut revealer, &mut queue, &mut sink);
        }

        assert_eq!(sink.words.len(), 8);
        assert_eq!(sink.words[0], "How");
        assert_eq!(sink.words[1], "How does");
        assert_eq!(sink.words[2], "How does the");
        assert_eq!(sink.words[7], JOKE);
        assert_eq!(sink.done, 1);
        assert_eq!(revealer.status(), RevealStatus::Finished);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_done_fires_exactly_at_total_duration() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new(clock.clone());
        let mut revealer = ResponseRevealer::new();
        let mut sink = Recorder::default();

        revealer.start(JOKE, Duration::from_millis(150), &mut queue, &mut sink);

        clock.advance_ms(1199);
        pump(&mut revealer, &mut queue, &mut sink);
        assert_eq!(sink.words.len(), 7);
        assert_eq!(sink.done, 0);

        clock.advance_ms(1);
        pump(&mut revealer, &mut queue, &mut sink);
        assert_eq!(sink.done, 1);

        clock.advance_ms(10_000);
        pump(&mut revealer, &mut queue, &mut sink);
        assert_eq!(sink.words.len(), 8);
        assert_eq!(sink.done, 1);
    }

    #[test]
    fn test_empty_text_finishes_immediately() {
        let mut queue = TimerQueue::new(ManualClock::new());
        let mut revealer = ResponseRevealer::new();
        let mut sink = Recorder::default();

        revealer.start("", Duration::from_millis(150), &mut queue, &mut sink);

        assert!(sink.words.is_empty());
        assert_eq!(sink.done, 1);
        assert_eq!(queue.pending(), 0);
        assert_eq!(revealer.status(), RevealStatus::Finished);
    }

    #[test]
    fn test_consecutive_spaces_emit_blank_growth() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new(clock.clone());
        let mut revealer = ResponseRevealer::new();
        let mut sink = Recorder::default();

        revealer.start("hi  there", Duration::from_millis(100), &mut queue, &mut sink);
        clock.advance_ms(300);
        pump(&mut revealer, &mut queue, &mut sink);

        assert_eq!(sink.words, vec!["hi", "hi ", "hi  there"]);
        assert_eq!(sink.done, 1);
    }

    #[test]
    fn test_cancel_stops_everything() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new(clock.clone());
        let mut revealer = ResponseRevealer::new();
        let mut sink = Recorder::default();

        revealer.start(JOKE, Duration::from_millis(150), &mut queue, &mut sink);
        clock.advance_ms(300);
        pump(&mut revealer, &mut queue, &mut sink);
        assert_eq!(sink.words.len(), 2);

        assert!(revealer.cancel(&mut queue));
        assert!(!revealer.cancel(&mut queue));

        clock.advance_ms(5_000);
        pump(&mut revealer, &mut queue, &mut sink);

        assert_eq!(sink.words.len(), 2);
        assert_eq!(sink.done, 0);
        assert_eq!(revealer.status(), RevealStatus::Cancelled);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_cancel_after_finish_is_noop() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new(clock.clone());
        let mut revealer = ResponseRevealer::new();
        let mut sink = Recorder::default();

        revealer.start("done", Duration::from_millis(10), &mut queue, &mut sink);
        clock.advance_ms(10);
        pump(&mut revealer, &mut queue, &mut sink);

        assert!(!revealer.cancel(&mut queue));
        assert_eq!(revealer.status(), RevealStatus::Finished);
        assert_eq!(sink.done, 1);
    }

    #[test]
    fn test_restart_cancels_previous_run() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new(clock.clone());
        let mut revealer = ResponseRevealer::new();
        let mut sink = Recorder::default();

        revealer.start("one two three", Duration::from_millis(100), &mut queue, &mut sink);
        clock.advance_ms(100);
        pump(&mut revealer, &mut queue, &mut sink);

        revealer.start("fresh start", Duration::from_millis(100), &mut queue, &mut sink);
        assert_eq!(queue.pending(), 1);

        clock.advance_ms(200);
        pump(&mut revealer, &mut queue, &mut sink);

        assert_eq!(sink.words, vec!["one", "fresh", "fresh start"]);
        assert_eq!(sink.done, 1);
    }

    #[test]
    fn test_foreign_timer_is_ignored() {
        let mut queue = TimerQueue::new(ManualClock::new());
        let mut revealer = ResponseRevealer::new();
        let mut sink = Recorder::default();

        revealer.start(JOKE, Duration::from_millis(150), &mut queue, &mut sink);
        let other = queue.schedule_after(Duration::ZERO);

        assert!(!revealer.on_tick(other, &mut queue, &mut sink));
        assert!(sink.words.is_empty());
    }
}
