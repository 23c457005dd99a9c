//! Core trait and types for the Arixa chat coach.
//!
//! This crate provides the shared interface between the chat screen and
//! whatever answers it. It defines:
//!
//! - [`CompletionBackend`] - The trait every completion backend implements
//! - [`ChatMessage`] / [`Role`] - Transcript entries
//! - [`Transcript`] - Append-only, session-scoped message list
//! - [`CoachError`] - Error types for backend operations
//!
//! # Example
//!
//! ```rust
//! use coach_core::{async_trait, ChatMessage, CoachError, CompletionBackend};
//!
//! struct Parrot;
//!
//! #[async_trait]
//! impl CompletionBackend for Parrot {
//!     async fn complete(
//!         &self,
//!         _history: &[ChatMessage],
//!         new_message: &str,
//!     ) -> Result<String, CoachError> {
//!         Ok(new_message.to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Parrot"
//!     }
//! }
//! ```

mod error;
mod message;
mod prompt;
mod trait_def;
mod transcript;

pub use error::CoachError;
pub use message::{ChatMessage, Role};
pub use prompt::{prompt_fingerprint, DEFAULT_SYSTEM_PROMPT};
pub use trait_def::CompletionBackend;
pub use transcript::Transcript;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
