use super::types::Message;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle to the chat log
///
/// Clones point at the same log. The view owns one handle for rendering and
/// gives another to the avatar lifecycle, which only ever appends and
/// rewrites the text of messages it appended.
#[derive(Debug, Clone)]
pub struct MessageStorage {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStorage {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Arc::new(RwLock::new(messages)),
        }
    }

    pub fn add(&self, message: Message) {
        self.messages.write().push(message);
    }

    /// Replace the text of the message with `id`. Returns `false` if no such
    /// message exists.
    pub fn update_text(&self, id: Uuid, text: &str) -> bool {
        let mut messages = self.messages.write();
        match messages.iter_mut().rev().find(|message| message.id == id) {
            Some(message) => {
                message.text.clear();
                message.text.push_str(text);
                true
            }
            None => false,
        }
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageStorage {
    fn default() -> Self {
        Self::new()
    }
}
