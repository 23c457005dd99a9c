//! Error types for the client core.

use profile_store::StoreError;
use thiserror::Error;

use crate::chat::ChatError;
use crate::onboarding::ValidationError;
use crate::screen::{NavEvent, Screen};

/// A navigation event that the transition table does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no transition from {from} on {event:?}")]
    InvalidTransition { from: Screen, event: NavEvent },

    /// The action belongs to a screen that is not showing.
    #[error("action needs {expected}, current screen is {current}")]
    NotOnScreen { expected: Screen, current: Screen },
}

/// Errors surfaced by [`App`](crate::App) operations.
///
/// Every variant leaves the user on the same screen, able to try again.
#[derive(Debug, Error)]
pub enum AppError {
    /// A form failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested move is not in the transition table.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// The identity provider refused or failed; holds the user-facing text.
    #[error("identity provider: {0}")]
    Identity(String),

    /// The identity provider has not finished loading.
    #[error("identity provider not loaded")]
    NotReady,

    /// The chat screen refused the message.
    #[error(transparent)]
    Chat(#[from] ChatError),

    /// Local persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    /// Text for the blocking alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::Navigation(_) => "That screen isn't available from here.".to_string(),
            AppError::Identity(message) => message.clone(),
            AppError::NotReady => "Still loading, please wait.".to_string(),
            AppError::Chat(err) => err.user_message(),
            AppError::Store(_) => "Something went wrong saving your profile.".to_string(),
        }
    }
}
