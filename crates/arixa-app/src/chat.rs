//! Chat session with the AI trainer.
//!
//! A session owns the transcript for as long as the chat screen is open.
//! Sending appends the user's message, asks the backend for a reply, and
//! appends whatever comes back. Backend failures never reach the caller:
//! they are logged and replaced by [`FALLBACK_REPLY`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use coach_core::{ChatMessage, CoachError, CompletionBackend, Role, Transcript};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Assistant text shown in place of a failed reply.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Reasons a message was not sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,

    /// The backend is missing a credential; holds the setup hint.
    #[error("chat backend not configured: {0}")]
    Configuration(String),

    /// A reply to the previous message is still pending.
    #[error("a reply is still pending")]
    Busy,
}

impl ChatError {
    pub fn user_message(&self) -> String {
        match self {
            ChatError::EmptyMessage => "Please type a message first.".to_string(),
            ChatError::Configuration(hint) => hint.clone(),
            ChatError::Busy => "Arixa is typing...".to_string(),
        }
    }
}

/// Clears the in-flight flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ChatSession<C: CompletionBackend> {
    backend: Arc<C>,
    transcript: RwLock<Transcript>,
    in_flight: AtomicBool,
}

impl<C: CompletionBackend> ChatSession<C> {
    pub fn new(backend: Arc<C>) -> Self {
        Self {
            backend,
            transcript: RwLock::new(Transcript::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Send `text` and wait for the assistant's reply.
    ///
    /// Returns the appended assistant message. Only input and configuration
    /// problems are errors; on those nothing is appended.
    pub async fn send(&self, text: &str) -> Result<ChatMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.backend.check_configured().map_err(|err| match err {
            CoachError::Configuration(hint) => ChatError::Configuration(hint),
            other => ChatError::Configuration(other.to_string()),
        })?;

        let _in_flight = InFlight::acquire(&self.in_flight).ok_or(ChatError::Busy)?;

        let history = {
            let mut transcript = self.transcript.write().await;
            let history = transcript.messages().to_vec();
            transcript.push(Role::User, text);
            history
        };

        debug!(
            "Sending chat message via {} ({} prior messages)",
            self.backend.name(),
            history.len()
        );

        let reply = match self.backend.complete(&history, text).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Chat completion failed: {}", err);
                FALLBACK_REPLY.to_string()
            }
        };

        Ok(self.transcript.write().await.push(Role::Assistant, reply))
    }

    /// Whether a reply is pending.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.read().await.messages().to_vec()
    }

    /// Messages the chat screen renders; system messages are hidden.
    pub async fn visible_messages(&self) -> Vec<ChatMessage> {
        self.transcript
            .read()
            .await
            .visible()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_coach::{DelayedCoach, EchoCoach, ScriptedCoach, ScriptedReply};

    #[tokio::test]
    async fn test_reply_is_appended() {
        let session = ChatSession::new(Arc::new(ScriptedCoach::replying(["Do three sets."])));

        let reply = session.send("  How many sets?  ").await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.text, "Do three sets.");

        let messages = session.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].text, "How many sets?");
        assert!(messages[0].id < messages[1].id);
    }

    #[tokio::test]
    async fn test_history_excludes_new_message() {
        let coach = Arc::new(ScriptedCoach::replying(["one", "two"]));
        let session = ChatSession::new(coach.clone());

        session.send("first").await.unwrap();
        session.send("second").await.unwrap();

        let calls = coach.calls();
        assert!(calls[0].history.is_empty());
        assert_eq!(calls[1].new_message, "second");
        let texts: Vec<_> = calls[1].history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "one"]);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let coach = Arc::new(ScriptedCoach::replying(["unused"]));
        let session = ChatSession::new(coach.clone());

        assert_eq!(session.send("   ").await, Err(ChatError::EmptyMessage));
        assert!(session.messages().await.is_empty());
        assert_eq!(coach.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_backend_rejected_before_append() {
        let coach = Arc::new(ScriptedCoach::unconfigured());
        let session = ChatSession::new(coach.clone());

        let err = session.send("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Configuration(_)));
        assert!(session.messages().await.is_empty());
        assert_eq!(coach.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failures_become_fallback_reply() {
        let coach = ScriptedCoach::new([
            ScriptedReply::ApiError("Y".to_string()),
            ScriptedReply::NetworkError("connection reset".to_string()),
            ScriptedReply::Malformed,
        ]);
        let session = ChatSession::new(Arc::new(coach));

        for prompt in ["a", "b", "c"] {
            let reply = session.send(prompt).await.unwrap();
            assert_eq!(reply.text, FALLBACK_REPLY);
        }
        assert_eq!(session.messages().await.len(), 6);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_overlapping_send_is_busy() {
        let session = ChatSession::new(Arc::new(DelayedCoach::with_millis(EchoCoach::new(), 50)));

        let (first, second) = tokio::join!(session.send("first"), session.send("second"));

        assert_eq!(first.unwrap().text, "first");
        assert_eq!(second, Err(ChatError::Busy));
        assert_eq!(session.messages().await.len(), 2);
        assert!(!session.is_loading());
    }
}
