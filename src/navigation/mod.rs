//! View selection and keyboard shortcuts
//!
//! The router tracks which panel is open and turns clicks and key presses
//! into avatar triggers. It never touches timers itself.

use crate::avatar::{AvatarLifecycle, Trigger};
use crate::scheduler::Scheduler;
use egui::{Key, Modifiers};
use std::fmt;
use tracing::debug;

/// Which panel is showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectedView {
    /// Avatar asleep, no navigation rail
    #[default]
    Idle,
    /// Avatar awake, no panel open
    Awake,
    Chat,
    Settings,
}

impl SelectedView {
    pub fn is_idle(&self) -> bool {
        matches!(self, SelectedView::Idle)
    }
}

impl fmt::Display for SelectedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectedView::Idle => write!(f, "Idle"),
            SelectedView::Awake => write!(f, "Awake"),
            SelectedView::Chat => write!(f, "Chat"),
            SelectedView::Settings => write!(f, "Settings"),
        }
    }
}

/// Navigation requests from buttons or shortcuts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavRequest {
    /// Avatar clicked
    Wake,
    /// Moon button or Escape in an awake view
    Sleep,
    OpenChat,
    OpenSettings,
    /// Escape from the settings panel
    CloseSettings,
}

/// Map a key press to a navigation request.
///
/// Nothing is mapped while a text input has focus so typing a `c` or `s`
/// stays typing.
pub fn shortcut(key: Key, typing: bool, view: SelectedView) -> Option<NavRequest> {
    if typing {
        return None;
    }
    match key {
        Key::Escape => Some(match view {
            SelectedView::Idle => NavRequest::Wake,
            SelectedView::Settings => NavRequest::CloseSettings,
            SelectedView::Awake | SelectedView::Chat => NavRequest::Sleep,
        }),
        Key::C => Some(NavRequest::OpenChat),
        Key::S => Some(NavRequest::OpenSettings),
        _ => None,
    }
}

/// Check whether a key press with `modifiers` may trigger a shortcut.
///
/// Shift is allowed so `C` and `S` work like `c` and `s`. Ctrl, Alt and
/// Command combinations belong to the platform.
pub fn is_shortcut_chord(modifiers: Modifiers) -> bool {
    !(modifiers.ctrl || modifiers.alt || modifiers.command || modifiers.mac_cmd)
}

/// Tracks the selected view and forwards requests to the lifecycle
#[derive(Clone, Debug, Default)]
pub struct ViewRouter {
    view: SelectedView,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SelectedView {
        self.view
    }

    /// Switch views and issue the matching trigger
    pub fn apply<S: Scheduler>(&mut self, request: NavRequest, lifecycle: &mut AvatarLifecycle<S>) {
        let (view, trigger) = match request {
            NavRequest::Wake => (SelectedView::Awake, Some(Trigger::Wake)),
            NavRequest::Sleep => (SelectedView::Idle, Some(Trigger::Sleep)),
            NavRequest::OpenChat => (SelectedView::Chat, Some(Trigger::OpenChat)),
            NavRequest::OpenSettings => (SelectedView::Settings, Some(Trigger::OpenSettings)),
            NavRequest::CloseSettings => (SelectedView::Awake, None),
        };

        if view != self.view {
            debug!("View {} -> {}", self.view, view);
            self.view = view;
        }
        if let Some(trigger) = trigger {
            lifecycle.request_transition(trigger);
        }
    }

    /// Route a key press. Returns `true` if it was a shortcut.
    pub fn handle_key<S: Scheduler>(
        &mut self,
        key: Key,
        typing: bool,
        lifecycle: &mut AvatarLifecycle<S>,
    ) -> bool {
        match shortcut(key, typing, self.view) {
            Some(request) => {
                self.apply(request, lifecycle);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::{EngagementState, LifecycleConfig};
    use crate::messages::MessageStorage;
    use crate::scheduler::{ManualClock, TimerQueue};

    fn lifecycle() -> AvatarLifecycle<TimerQueue<ManualClock>> {
        AvatarLifecycle::new(
            LifecycleConfig::default(),
            TimerQueue::new(ManualClock::new()),
            MessageStorage::new(),
        )
    }

    #[test]
    fn test_escape_depends_on_view() {
        assert_eq!(
            shortcut(Key::Escape, false, SelectedView::Idle),
            Some(NavRequest::Wake)
        );
        assert_eq!(
            shortcut(Key::Escape, false, SelectedView::Chat),
            Some(NavRequest::Sleep)
        );
        assert_eq!(
            shortcut(Key::Escape, false, SelectedView::Awake),
            Some(NavRequest::Sleep)
        );
        assert_eq!(
            shortcut(Key::Escape, false, SelectedView::Settings),
            Some(NavRequest::CloseSettings)
        );
    }

    #[test]
    fn test_letter_shortcuts() {
        assert_eq!(
            shortcut(Key::C, false, SelectedView::Awake),
            Some(NavRequest::OpenChat)
        );
        assert_eq!(
            shortcut(Key::S, false, SelectedView::Chat),
            Some(NavRequest::OpenSettings)
        );
        assert_eq!(shortcut(Key::X, false, SelectedView::Chat), None);
    }

    #[test]
    fn test_shift_allowed_in_shortcuts() {
        assert!(is_shortcut_chord(Modifiers::NONE));
        assert!(is_shortcut_chord(Modifiers::SHIFT));
        assert!(!is_shortcut_chord(Modifiers::CTRL));
        assert!(!is_shortcut_chord(Modifiers::ALT));
        assert!(!is_shortcut_chord(Modifiers::COMMAND));
        assert!(!is_shortcut_chord(Modifiers::SHIFT | Modifiers::CTRL));
    }

    #[test]
    fn test_shortcuts_suppressed_while_typing() {
        for key in [Key::Escape, Key::C, Key::S] {
            assert_eq!(shortcut(key, true, SelectedView::Chat), None);
        }
    }

    #[test]
    fn test_open_chat_wakes_avatar() {
        let mut router = ViewRouter::new();
        let mut lifecycle = lifecycle();

        assert!(router.handle_key(Key::C, false, &mut lifecycle));
        assert_eq!(router.view(), SelectedView::Chat);
        assert_eq!(lifecycle.current_state(), EngagementState::Listening);
    }

    #[test]
    fn test_escape_toggles_sleep() {
        let mut router = ViewRouter::new();
        let mut lifecycle = lifecycle();

        router.handle_key(Key::Escape, false, &mut lifecycle);
        assert_eq!(router.view(), SelectedView::Awake);
        assert_eq!(lifecycle.current_state(), EngagementState::Listening);

        router.handle_key(Key::Escape, false, &mut lifecycle);
        assert_eq!(router.view(), SelectedView::Idle);
        assert_eq!(lifecycle.current_state(), EngagementState::Idle);
    }

    #[test]
    fn test_closing_settings_keeps_avatar_awake() {
        let mut router = ViewRouter::new();
        let mut lifecycle = lifecycle();

        router.apply(NavRequest::OpenSettings, &mut lifecycle);
        router.handle_key(Key::Escape, false, &mut lifecycle);

        assert_eq!(router.view(), SelectedView::Awake);
        assert_eq!(lifecycle.current_state(), EngagementState::Listening);
    }

    #[test]
    fn test_typing_does_not_navigate() {
        let mut router = ViewRouter::new();
        let mut lifecycle = lifecycle();
        router.apply(NavRequest::OpenChat, &mut lifecycle);

        assert!(!router.handle_key(Key::S, true, &mut lifecycle));
        assert_eq!(router.view(), SelectedView::Chat);
    }
}
