//! Scripted coach - replays a queue of canned outcomes.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use coach_core::{ChatMessage, CoachError, CompletionBackend};

/// One canned outcome.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Reply with this text.
    Text(String),
    /// Fail as if the endpoint returned an error payload.
    ApiError(String),
    /// Fail as if the request never got a response.
    NetworkError(String),
    /// Fail as if the response body was unreadable.
    Malformed,
}

impl ScriptedReply {
    fn into_result(self) -> Result<String, CoachError> {
        match self {
            ScriptedReply::Text(text) => Ok(text),
            ScriptedReply::ApiError(msg) => Err(CoachError::Api(msg)),
            ScriptedReply::NetworkError(msg) => Err(CoachError::Network(msg)),
            ScriptedReply::Malformed => {
                Err(CoachError::MalformedResponse("scripted malformed body".to_string()))
            }
        }
    }
}

/// A call the coach received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub history: Vec<ChatMessage>,
    pub new_message: String,
}

/// A backend that replays queued outcomes in order and records each call.
///
/// When the queue runs dry it answers with a network error.
#[derive(Debug, Default)]
pub struct ScriptedCoach {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Mutex<Vec<RecordedCall>>,
    unconfigured: bool,
}

impl ScriptedCoach {
    /// Create a coach that will reply with each outcome in turn.
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Create a coach that replies with each text in turn.
    pub fn replying(texts: impl IntoIterator<Item = &'static str>) -> Self {
        Self::new(texts.into_iter().map(|t| ScriptedReply::Text(t.to_string())))
    }

    /// Create a coach that reports a missing credential.
    pub fn unconfigured() -> Self {
        Self {
            unconfigured: true,
            ..Default::default()
        }
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedCoach {
    async fn complete(
        &self,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<String, CoachError> {
        self.check_configured()?;

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                history: history.to_vec(),
                new_message: new_message.to_string(),
            });
        }

        let next = self.replies.lock().ok().and_then(|mut q| q.pop_front());
        match next {
            Some(reply) => reply.into_result(),
            None => Err(CoachError::Network("script exhausted".to_string())),
        }
    }

    fn name(&self) -> &str {
        "ScriptedCoach"
    }

    fn check_configured(&self) -> Result<(), CoachError> {
        if self.unconfigured {
            Err(CoachError::Configuration("no API key configured".to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::Role;

    #[tokio::test]
    async fn test_replays_in_order_then_fails() {
        let coach = ScriptedCoach::new([
            ScriptedReply::Text("first".to_string()),
            ScriptedReply::ApiError("quota".to_string()),
        ]);

        assert_eq!(coach.complete(&[], "a").await.unwrap(), "first");
        assert!(matches!(coach.complete(&[], "b").await, Err(CoachError::Api(_))));
        assert!(matches!(coach.complete(&[], "c").await, Err(CoachError::Network(_))));
        assert_eq!(coach.call_count(), 3);
    }

    #[tokio::test]
    async fn test_records_history() {
        let coach = ScriptedCoach::replying(["ok"]);
        let history = vec![ChatMessage::new(1, Role::User, "earlier")];

        coach.complete(&history, "now").await.unwrap();

        let calls = coach.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].history, history);
        assert_eq!(calls[0].new_message, "now");
    }

    #[tokio::test]
    async fn test_unconfigured_records_nothing() {
        let coach = ScriptedCoach::unconfigured();

        assert!(coach.check_configured().is_err());
        assert!(coach.complete(&[], "hello").await.unwrap_err().is_configuration());
        assert_eq!(coach.call_count(), 0);
    }
}
