//! Session-scoped chat transcript.
//!
//! A transcript is an append-only, ordered list of [`ChatMessage`]s that
//! lives exactly as long as the chat screen. It is never persisted.

use crate::message::{ChatMessage, Role};

/// Append-only chat transcript with increasing message ids.
///
/// # Example
///
/// ```rust
/// use coach_core::{Role, Transcript};
///
/// let mut transcript = Transcript::new();
/// transcript.push(Role::User, "How many rest days do I need?");
/// transcript.push(Role::Assistant, "Usually one or two per week.");
///
/// assert_eq!(transcript.len(), 2);
/// assert!(transcript.messages()[0].id < transcript.messages()[1].id);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a copy of it.
    pub fn push(&mut self, role: Role, text: impl Into<String>) -> ChatMessage {
        self.next_id += 1;
        let message = ChatMessage::new(self.next_id, role, text);
        self.messages.push(message.clone());
        message
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages that should be drawn on screen (everything but system role).
    pub fn visible(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.is_visible())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order_and_ids() {
        let mut transcript = Transcript::new();

        let first = transcript.push(Role::User, "Hello");
        let second = transcript.push(Role::Assistant, "Hi there!");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(transcript.messages()[0].text, "Hello");
        assert_eq!(transcript.messages()[1].role, Role::Assistant);
    }

    #[test]
    fn test_visible_skips_system() {
        let mut transcript = Transcript::new();
        transcript.push(Role::System, "Be brief");
        transcript.push(Role::User, "Plan my week");

        let visible: Vec<_> = transcript.visible().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text, "Plan my week");
    }
}
