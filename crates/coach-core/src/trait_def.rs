//! The CompletionBackend trait definition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoachError;
use crate::message::ChatMessage;

/// Something that turns a chat transcript plus a new user message into an
/// assistant reply.
///
/// Implementations range from the hosted completion endpoint to scripted
/// test doubles. The trait is object-safe and can be used as
/// `Arc<dyn CompletionBackend>`.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Produce the assistant reply for `new_message`.
    ///
    /// # Arguments
    ///
    /// * `history` - Transcript as it stood before `new_message`, oldest first.
    /// * `new_message` - The user's new message text.
    async fn complete(&self, history: &[ChatMessage], new_message: &str)
        -> Result<String, CoachError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Verify that the backend can be called at all.
    ///
    /// Called before a message is accepted, so a missing credential is
    /// reported without touching the transcript or the network.
    /// Default implementation always succeeds.
    fn check_configured(&self) -> Result<(), CoachError> {
        Ok(())
    }
}

#[async_trait]
impl<T: CompletionBackend + ?Sized> CompletionBackend for Arc<T> {
    async fn complete(
        &self,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<String, CoachError> {
        (**self).complete(history, new_message).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn check_configured(&self) -> Result<(), CoachError> {
        (**self).check_configured()
    }
}
