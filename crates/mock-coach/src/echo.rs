//! Echo coach - replies with the user's message.

use async_trait::async_trait;
use coach_core::{ChatMessage, CoachError, CompletionBackend};

/// A backend that echoes the new message back.
///
/// Useful for testing the chat flow without any network.
#[derive(Debug, Clone, Default)]
pub struct EchoCoach {
    prefix: Option<String>,
}

impl EchoCoach {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an EchoCoach that prepends `prefix` to every reply.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl CompletionBackend for EchoCoach {
    async fn complete(
        &self,
        _history: &[ChatMessage],
        new_message: &str,
    ) -> Result<String, CoachError> {
        Ok(match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, new_message),
            None => new_message.to_string(),
        })
    }

    fn name(&self) -> &str {
        "EchoCoach"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_no_prefix() {
        let coach = EchoCoach::new();
        let reply = coach.complete(&[], "Hello!").await.unwrap();
        assert_eq!(reply, "Hello!");
    }

    #[tokio::test]
    async fn test_echo_with_prefix() {
        let coach = EchoCoach::with_prefix("Echo: ");
        let reply = coach.complete(&[], "Hello!").await.unwrap();
        assert_eq!(reply, "Echo: Hello!");
    }

    #[test]
    fn test_echo_is_configured() {
        let coach = EchoCoach::new();
        assert_eq!(coach.name(), "EchoCoach");
        assert!(coach.check_configured().is_ok());
    }
}
