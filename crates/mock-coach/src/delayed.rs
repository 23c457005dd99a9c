//! Delayed coach - wraps another backend with artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use coach_core::{ChatMessage, CoachError, CompletionBackend};
use tokio::time::sleep;

/// A backend that sleeps before delegating to `inner`.
///
/// Useful for simulating a slow endpoint while a second send is attempted.
pub struct DelayedCoach<B: CompletionBackend> {
    inner: B,
    delay: Duration,
}

impl<B: CompletionBackend> DelayedCoach<B> {
    pub fn new(inner: B, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<B: CompletionBackend> CompletionBackend for DelayedCoach<B> {
    async fn complete(
        &self,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<String, CoachError> {
        sleep(self.delay).await;
        self.inner.complete(history, new_message).await
    }

    fn name(&self) -> &str {
        "DelayedCoach"
    }

    fn check_configured(&self) -> Result<(), CoachError> {
        self.inner.check_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoCoach;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_coach() {
        let coach = DelayedCoach::with_millis(EchoCoach::new(), 50);

        let start = Instant::now();
        let reply = coach.complete(&[], "test").await.unwrap();

        assert_eq!(reply, "test");
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(coach.name(), "DelayedCoach");
    }
}
