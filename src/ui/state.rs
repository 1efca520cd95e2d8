//! Application state management
//!
//! This module provides the central state for the widget UI: the avatar
//! lifecycle, the selected view, the chat log and input, and the settings.

use crate::avatar::{AvatarLifecycle, EngagementState};
use crate::integration::BuddyConfig;
use crate::messages::{mock_history, MessageStorage};
use crate::navigation::{NavRequest, SelectedView, ViewRouter};
use crate::scheduler::{Scheduler, SystemClock, TimerQueue};
use crate::settings::Settings;
use std::time::Duration;
use tracing::debug;

/// Central application state
///
/// Generic over the scheduler so tests can run the whole UI on a manual
/// clock. The app itself uses the system clock.
pub struct AppState<S: Scheduler = TimerQueue<SystemClock>> {
    /// Avatar engagement state and its timers
    pub lifecycle: AvatarLifecycle<S>,

    /// Selected view
    pub router: ViewRouter,

    /// Local preferences
    pub settings: Settings,

    /// Chat log (shared with the lifecycle)
    pub messages: MessageStorage,

    /// Current text input
    pub input_text: String,
}

impl AppState {
    /// Create a new application state on the system clock
    pub fn new(config: &BuddyConfig) -> Self {
        Self::with_scheduler(config, TimerQueue::new(SystemClock::new()))
    }
}

impl<S: Scheduler> AppState<S> {
    /// Create a new application state on the given scheduler
    pub fn with_scheduler(config: &BuddyConfig, scheduler: S) -> Self {
        let messages = if config.chat.seed_history {
            MessageStorage::with_messages(mock_history())
        } else {
            MessageStorage::new()
        };
        let lifecycle = AvatarLifecycle::new(config.lifecycle.clone(), scheduler, messages.clone());

        Self {
            lifecycle,
            router: ViewRouter::new(),
            settings: config.settings.clone().normalized(),
            messages,
            input_text: config.chat.initial_input.clone(),
        }
    }

    pub fn engagement(&self) -> EngagementState {
        self.lifecycle.current_state()
    }

    pub fn view(&self) -> SelectedView {
        self.router.view()
    }

    /// Handle a navigation button or the avatar being clicked
    pub fn navigate(&mut self, request: NavRequest) {
        self.router.apply(request, &mut self.lifecycle);
    }

    /// Handle a key press. Returns `true` if it was a shortcut.
    pub fn handle_key(&mut self, key: egui::Key, typing: bool) -> bool {
        self.router.handle_key(key, typing, &mut self.lifecycle)
    }

    /// Check if the send button should be enabled
    pub fn can_send(&self) -> bool {
        self.engagement().accepts_input() && !self.input_text.trim().is_empty()
    }

    /// Send the current input as a chat message
    pub fn send_message(&mut self) {
        if !self.can_send() {
            debug!("Nothing to send while {}", self.engagement());
            return;
        }

        let text = self.input_text.trim().to_string();
        self.lifecycle.submit_message(&text);

        // Clear input
        self.input_text.clear();
    }

    /// Fire due timers. Returns how long until the next one, if any.
    pub fn tick(&mut self) -> Option<Duration> {
        self.lifecycle.run_due();
        self.lifecycle.time_until_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Sender;
    use crate::scheduler::ManualClock;

    fn state() -> (AppState<TimerQueue<ManualClock>>, ManualClock) {
        let clock = ManualClock::new();
        let state = AppState::with_scheduler(
            &BuddyConfig::default().without_history(),
            TimerQueue::new(clock.clone()),
        );
        (state, clock)
    }

    #[test]
    fn test_initial_state() {
        let (state, _) = state();
        assert_eq!(state.engagement(), EngagementState::Idle);
        assert_eq!(state.view(), SelectedView::Idle);
        assert_eq!(state.input_text, "Tell me a joke!");
        assert!(state.messages.is_empty());
    }

    #[test]
    fn test_seeded_history() {
        let state = AppState::with_scheduler(
            &BuddyConfig::default(),
            TimerQueue::new(ManualClock::new()),
        );
        assert_eq!(state.messages.len(), 2);
    }

    #[test]
    fn test_send_message_clears_input() {
        let (mut state, _) = state();
        state.navigate(NavRequest::OpenChat);
        state.input_text = "hello".to_string();

        state.send_message();

        assert_eq!(state.engagement(), EngagementState::Thinking);
        assert!(state.input_text.is_empty());
        let messages = state.messages.get_all();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "hello");
    }

    #[test]
    fn test_blank_input_is_not_sent() {
        let (mut state, _) = state();
        state.navigate(NavRequest::OpenChat);
        state.input_text = "   ".to_string();

        assert!(!state.can_send());
        state.send_message();

        assert_eq!(state.engagement(), EngagementState::Listening);
        assert_eq!(state.input_text, "   ");
        assert!(state.messages.is_empty());
    }

    #[test]
    fn test_input_kept_while_busy() {
        let (mut state, _) = state();
        state.navigate(NavRequest::OpenChat);
        state.send_message();

        state.input_text = "another".to_string();
        state.send_message();

        assert_eq!(state.input_text, "another");
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_tick_reports_next_deadline() {
        let (mut state, clock) = state();
        state.navigate(NavRequest::OpenChat);
        state.send_message();

        clock.advance_ms(1000);
        assert_eq!(state.tick(), Some(Duration::from_millis(2000)));

        clock.advance_ms(2000);
        assert_eq!(state.tick(), Some(Duration::from_millis(150)));
        assert_eq!(state.engagement(), EngagementState::Speaking);
    }

    #[test]
    fn test_out_of_range_text_size_is_clamped() {
        let mut config = BuddyConfig::default();
        config.settings.text_size = 11;
        let state = AppState::with_scheduler(&config, TimerQueue::new(ManualClock::new()));
        assert_eq!(state.settings.text_size, Settings::MAX_TEXT_SIZE);
    }
}
