use serde::{Deserialize, Serialize};
use std::fmt;

/// The avatar's conversational mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementState {
    /// Asleep, waiting to be woken
    #[default]
    Idle,
    /// Awake and waiting for input
    Listening,
    /// Pretending to work on a reply
    Thinking,
    /// Revealing the reply
    Speaking,
}

impl EngagementState {
    /// Every state, in lifecycle order
    pub const ALL: [EngagementState; 4] = [
        EngagementState::Idle,
        EngagementState::Listening,
        EngagementState::Thinking,
        EngagementState::Speaking,
    ];

    /// Check if idle
    pub fn is_idle(&self) -> bool {
        matches!(self, EngagementState::Idle)
    }

    /// Check if awake (any state but idle)
    pub fn is_awake(&self) -> bool {
        !self.is_idle()
    }

    /// Check if a reply is in flight (thinking or speaking)
    pub fn is_busy(&self) -> bool {
        matches!(self, EngagementState::Thinking | EngagementState::Speaking)
    }

    /// Check if new input may be submitted
    pub fn accepts_input(&self) -> bool {
        matches!(self, EngagementState::Idle | EngagementState::Listening)
    }
}

impl fmt::Display for EngagementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementState::Idle => write!(f, "Idle"),
            EngagementState::Listening => write!(f, "Listening"),
            EngagementState::Thinking => write!(f, "Thinking"),
            EngagementState::Speaking => write!(f, "Speaking"),
        }
    }
}

/// External requests understood by the lifecycle
///
/// Timer-driven transitions (thinking elapsed, reveal finished) are internal
/// and cannot be requested from outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// User clicked the avatar
    Wake,
    /// User pressed the sleep button
    Sleep,
    /// User pressed Escape in an awake view
    Escape,
    /// User opened the chat panel
    OpenChat,
    /// User opened the settings panel
    OpenSettings,
    /// User submitted chat input
    Submit(String),
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Wake => write!(f, "Wake"),
            Trigger::Sleep => write!(f, "Sleep"),
            Trigger::Escape => write!(f, "Escape"),
            Trigger::OpenChat => write!(f, "OpenChat"),
            Trigger::OpenSettings => write!(f, "OpenSettings"),
            Trigger::Submit(text) => write!(f, "Submit({} chars)", text.chars().count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(EngagementState::default(), EngagementState::Idle);
    }

    #[test]
    fn test_state_predicates() {
        assert!(EngagementState::Idle.is_idle());
        assert!(!EngagementState::Idle.is_awake());
        assert!(EngagementState::Listening.accepts_input());
        assert!(EngagementState::Idle.accepts_input());
        assert!(!EngagementState::Thinking.accepts_input());
        assert!(EngagementState::Speaking.is_busy());
        assert!(!EngagementState::Listening.is_busy());
    }

    #[test]
    fn test_display() {
        assert_eq!(EngagementState::Speaking.to_string(), "Speaking");
        assert_eq!(Trigger::Submit("hello".into()).to_string(), "Submit(5 chars)");
    }
}
