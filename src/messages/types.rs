use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Avatar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn avatar(text: impl Into<String>) -> Self {
        Self::new(Sender::Avatar, text)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Canned exchange shown when the chat panel first opens
pub fn mock_history() -> Vec<Message> {
    vec![
        Message::user("Hello! How are you today?"),
        Message::avatar(
            "I'm doing great, thanks for asking! I'm here to help you with anything you need.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_sender() {
        assert!(Message::user("hi").is_user());
        assert!(!Message::avatar("hi").is_user());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Message::user("same");
        let b = Message::user("same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_mock_history_alternates() {
        let history = mock_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sender, Sender::User);
        assert_eq!(history[1].sender, Sender::Avatar);
    }
}
