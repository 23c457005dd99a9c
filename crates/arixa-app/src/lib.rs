//! Client core for the Arixa fitness app.
//!
//! Everything behind the screens lives here: the screen registry and
//! transition table, onboarding validation, the identity-provider bridge,
//! the process-wide profile store, the chat session, and the static
//! schedule and progress content. Screens render to plain [`View`] models.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use arixa_app::{App, AppConfig, InMemoryIdentityProvider, NavEvent};
//! use openai_coach::OpenAiCoach;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let (store, tokens) = config.open_store().await?;
//!
//!     let provider = InMemoryIdentityProvider::new().with_token_cache(tokens);
//!     provider.restore().await;
//!
//!     let coach = OpenAiCoach::new(config.coach.clone())?;
//!     let mut app = App::new(
//!         Arc::new(provider),
//!         Arc::new(coach),
//!         Arc::new(store),
//!         config.session_exists_policy,
//!     );
//!
//!     app.start().await;
//!     app.dispatch(NavEvent::GetStarted)?;
//!     println!("{:?}", app.view().await);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod navigation;
pub mod onboarding;
pub mod progress;
pub mod schedule;
pub mod screen;
pub mod store;
pub mod views;

pub use app::App;
pub use auth::{
    AuthFlow, AuthOutcome, AuthSnapshot, IdentityError, IdentityProvider,
    InMemoryIdentityProvider, PendingVerification, Session, SessionExistsPolicy, SignUpRequest,
};
pub use chat::{ChatError, ChatSession, FALLBACK_REPLY};
pub use config::{AppConfig, ConfigError};
pub use error::{AppError, NavigationError};
pub use navigation::Navigator;
pub use onboarding::{PersonalInfo, SignUpForm, ValidationError};
pub use screen::{transition, NavEvent, Screen};
pub use store::AppStore;
pub use views::{CameraPermission, Intent, ScreenView, View};

// Re-export the shared types callers need alongside the app.
pub use coach_core::{ChatMessage, CompletionBackend, Role};
pub use profile_store::{FitnessGoal, Gender, ProfileRecord, ProfileState};
