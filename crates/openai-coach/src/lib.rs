//! Hosted chat-completion backend for the Arixa coach.
//!
//! This crate implements [`CompletionBackend`] against an OpenAI-compatible
//! `/v1/chat/completions` endpoint.
//!
//! # Features
//!
//! - Uses `gpt-4o-mini` by default
//! - Fixed "Arixa" system preamble, overridable
//! - Fails fast with a configuration error when no API key is set
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_coach::{CompletionBackend, OpenAiCoach};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let coach = OpenAiCoach::from_env()?;
//!     let reply = coach.complete(&[], "Give me a warm-up routine").await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod api_types;
mod coach;
mod config;

pub use coach::OpenAiCoach;
pub use config::{OpenAiCoachConfig, OpenAiCoachConfigBuilder};

// Re-export coach-core types for convenience
pub use coach_core::{async_trait, ChatMessage, CoachError, CompletionBackend, Role};
