//! Chat transcript entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Wire name used by chat-completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Session-unique, increasing identifier.
    pub id: u64,
    /// Author of the message.
    pub role: Role,
    /// Message text.
    pub text: String,
}

impl ChatMessage {
    /// Create a message with an explicit id.
    pub fn new(id: u64, role: Role, text: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
        }
    }

    /// Whether the message should be drawn in the transcript.
    ///
    /// System messages carry context for the model only.
    pub fn is_visible(&self) -> bool {
        self.role != Role::System
    }
}
