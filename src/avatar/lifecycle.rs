//! Avatar lifecycle state machine
//!
//! Transitions:
//! - idle, wake / open chat / open settings: listening
//! - any awake state, sleep or escape: idle (timers cancelled)
//! - idle or listening, non-empty submit: thinking (user message appended)
//! - thinking, after the thinking delay: speaking (reveal starts)
//! - speaking, reveal finished (plus optional settle delay): listening
//!
//! Every other request is ignored.

use super::revealer::{reveal_duration, ResponseRevealer, RevealSink};
use super::state::{EngagementState, Trigger};
use crate::messages::{Message, MessageStorage};
use crate::scheduler::{Scheduler, TimerId};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

/// The scripted reply
pub const DEFAULT_REPLY: &str = "How does the ocean say hi? It waves!";

/// Timing and content of the scripted conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Reply revealed after every submission
    pub reply_text: String,
    /// Delay between revealed words in milliseconds
    pub word_delay_ms: u64,
    /// How long the avatar stays in thinking in milliseconds
    pub thinking_delay_ms: u64,
    /// Pause between the end of the reveal and returning to listening.
    /// Zero returns immediately.
    pub settle_delay_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            reply_text: DEFAULT_REPLY.to_string(),
            word_delay_ms: 150,
            thinking_delay_ms: 3000,
            settle_delay_ms: 0,
        }
    }
}

impl LifecycleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scripted reply
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply_text = reply.into();
        self
    }

    /// Set the per-word reveal delay
    pub fn with_word_delay_ms(mut self, ms: u64) -> Self {
        self.word_delay_ms = ms;
        self
    }

    /// Set the thinking delay
    pub fn with_thinking_delay_ms(mut self, ms: u64) -> Self {
        self.thinking_delay_ms = ms;
        self
    }

    /// Set the settle delay
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    pub fn word_delay(&self) -> Duration {
        Duration::from_millis(self.word_delay_ms)
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Handle returned by [`AvatarLifecycle::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

enum Listener {
    Callback(Box<dyn FnMut(EngagementState)>),
    Channel(Sender<EngagementState>),
}

/// A deferred transition waiting on a one-shot timer
#[derive(Clone, Copy, Debug)]
struct PendingDelay {
    timer: TimerId,
    target: EngagementState,
}

/// Writes reveal progress into the avatar's reply message
struct TranscriptSink<'a> {
    messages: &'a MessageStorage,
    reply_id: Option<Uuid>,
    finished: bool,
}

impl RevealSink for TranscriptSink<'_> {
    fn on_word(&mut self, revealed: &str) {
        if let Some(id) = self.reply_id {
            if !self.messages.update_text(id, revealed) {
                warn!("Reply message {} vanished from the log", id);
            }
        }
    }

    fn on_done(&mut self) {
        self.finished = true;
    }
}

/// Owns the engagement state and every timer that can change it
pub struct AvatarLifecycle<S: Scheduler> {
    state: EngagementState,
    config: LifecycleConfig,
    scheduler: S,
    messages: MessageStorage,
    pending: Option<PendingDelay>,
    revealer: ResponseRevealer,
    /// Avatar message the current reveal writes into
    reply_id: Option<Uuid>,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
}

impl<S: Scheduler> AvatarLifecycle<S> {
    /// Create a lifecycle in the idle state that appends to `messages`
    pub fn new(config: LifecycleConfig, scheduler: S, messages: MessageStorage) -> Self {
        Self {
            state: EngagementState::Idle,
            config,
            scheduler,
            messages,
            pending: None,
            revealer: ResponseRevealer::new(),
            reply_id: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn current_state(&self) -> EngagementState {
        self.state
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The chat log this lifecycle appends to
    pub fn messages(&self) -> &MessageStorage {
        &self.messages
    }

    /// Target of the pending deferred transition, if one is armed
    pub fn pending_transition(&self) -> Option<EngagementState> {
        self.pending
            .filter(|pending| self.scheduler.is_scheduled(pending.timer))
            .map(|pending| pending.target)
    }

    /// Check if a reply is being revealed
    pub fn is_revealing(&self) -> bool {
        self.revealer.is_active()
    }

    /// Time until the next timer is due, if any is armed
    pub fn time_until_next(&self) -> Option<Duration> {
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.scheduler.now()))
    }

    /// Apply an external request. Requests that make no sense in the
    /// current state are ignored.
    pub fn request_transition(&mut self, trigger: Trigger) {
        trace!("Trigger {} in {}", trigger, self.state);
        match (self.state, trigger) {
            (
                EngagementState::Idle,
                Trigger::Wake | Trigger::OpenChat | Trigger::OpenSettings,
            ) => self.enter(EngagementState::Listening),
            (_, Trigger::Sleep) => self.sleep(),
            (state, Trigger::Escape) if state.is_awake() => self.sleep(),
            (state, Trigger::Submit(text)) if state.accepts_input() => self.submit(&text),
            (state, trigger) => debug!("Ignoring {} while {}", trigger, state),
        }
    }

    /// Append `text` as a user message and start thinking.
    ///
    /// Blank text is ignored, as is any submission while a reply is in
    /// flight.
    pub fn submit_message(&mut self, text: &str) {
        self.request_transition(Trigger::Submit(text.to_string()));
    }

    /// Register a callback invoked with the new state on every change
    pub fn subscribe(&mut self, listener: impl FnMut(EngagementState) + 'static) -> Subscription {
        self.add_listener(Listener::Callback(Box::new(listener)))
    }

    /// Receive every subsequent state change on a channel.
    ///
    /// Dropping the receiver unsubscribes it.
    pub fn watch(&mut self) -> Receiver<EngagementState> {
        let (tx, rx) = unbounded();
        self.add_listener(Listener::Channel(tx));
        rx
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn add_listener(&mut self, listener: Listener) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((subscription, listener));
        subscription
    }

    /// Fire every timer that is due. Returns how many fired.
    pub fn run_due(&mut self) -> usize {
        let mut fired = 0;
        while let Some(id) = self.scheduler.pop_due() {
            fired += 1;
            self.dispatch(id);
        }
        fired
    }

    fn dispatch(&mut self, id: TimerId) {
        if let Some(pending) = self.pending.filter(|pending| pending.timer == id) {
            self.pending = None;
            debug!("Deferred transition to {} elapsed", pending.target);
            self.enter(pending.target);
            return;
        }

        if self.revealer.owns(id) {
            let mut sink = TranscriptSink {
                messages: &self.messages,
                reply_id: self.reply_id,
                finished: false,
            };
            self.revealer.on_tick(id, &mut self.scheduler, &mut sink);
            if sink.finished {
                self.on_reveal_finished();
            }
            return;
        }

        // Cancelled timers are removed from the queue, so this means a
        // timer was armed on the scheduler by someone else.
        warn!("Ignoring unowned {}", id);
    }

    /// Cancel every outstanding timer. The state is left as is.
    pub fn shutdown(&mut self) {
        self.cancel_timers();
        info!("Avatar lifecycle shut down in {}", self.state);
    }

    fn sleep(&mut self) {
        self.cancel_timers();
        self.enter(EngagementState::Idle);
    }

    fn submit(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank submission");
            return;
        }
        self.messages.add(Message::user(text));
        self.enter(EngagementState::Thinking);
    }

    fn cancel_timers(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.timer);
            debug!("Cancelled pending transition to {}", pending.target);
        }
        self.revealer.cancel(&mut self.scheduler);
        self.reply_id = None;
    }

    fn enter(&mut self, next: EngagementState) {
        if next == self.state {
            return;
        }

        // Whatever was scheduled belonged to the state being left
        self.cancel_timers();

        let previous = self.state;
        self.state = next;
        info!("Avatar {} -> {}", previous, next);
        self.notify();

        match next {
            EngagementState::Thinking => {
                self.defer(EngagementState::Speaking, self.config.thinking_delay());
            }
            EngagementState::Speaking => self.start_reply(),
            EngagementState::Idle | EngagementState::Listening => {}
        }
    }

    fn defer(&mut self, target: EngagementState, delay: Duration) {
        let timer = self.scheduler.schedule_after(delay);
        self.pending = Some(PendingDelay { timer, target });
        debug!("Transition to {} in {}ms", target, delay.as_millis());
    }

    fn start_reply(&mut self) {
        let reply = Message::avatar("");
        debug!(
            "Reply {} fully revealed in {}ms",
            reply.id,
            reveal_duration(&self.config.reply_text, self.config.word_delay()).as_millis()
        );
        self.reply_id = Some(reply.id);
        self.messages.add(reply);

        let mut sink = TranscriptSink {
            messages: &self.messages,
            reply_id: self.reply_id,
            finished: false,
        };
        self.revealer.start(
            &self.config.reply_text,
            self.config.word_delay(),
            &mut self.scheduler,
            &mut sink,
        );
        if sink.finished {
            self.on_reveal_finished();
        }
    }

    fn on_reveal_finished(&mut self) {
        if self.state != EngagementState::Speaking {
            return;
        }
        self.reply_id = None;
        let settle = self.config.settle_delay();
        if settle.is_zero() {
            self.enter(EngagementState::Listening);
        } else {
            self.defer(EngagementState::Listening, settle);
        }
    }

    fn notify(&mut self) {
        let state = self.state;
        self.listeners.retain_mut(|(_, listener)| match listener {
            Listener::Callback(callback) => {
                callback(state);
                true
            }
            Listener::Channel(tx) => tx.send(state).is_ok(),
        });
    }
}

impl<S: Scheduler> Drop for AvatarLifecycle<S> {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}
