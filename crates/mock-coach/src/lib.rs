//! Mock completion backends for exercising the chat flow.
//!
//! This crate provides mock implementations of the `CompletionBackend` trait
//! for testing:
//! - `EchoCoach` - Replies with the user's message
//! - `ScriptedCoach` - Replays queued replies and failures, records calls
//! - `DelayedCoach` - Wraps another backend with artificial delay
//!
//! For real completions, use the `openai-coach` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_coach::{CompletionBackend, EchoCoach};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_coach::CoachError> {
//!     let coach = EchoCoach::with_prefix("Coach heard: ");
//!     let reply = coach.complete(&[], "Ten push-ups done").await?;
//!     assert_eq!(reply, "Coach heard: Ten push-ups done");
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod scripted;

// Re-export coach-core types for convenience
pub use coach_core::{async_trait, ChatMessage, CoachError, CompletionBackend, Role};

pub use delayed::DelayedCoach;
pub use echo::EchoCoach;
pub use scripted::{RecordedCall, ScriptedCoach, ScriptedReply};
