//! Identity-provider bridge.
//!
//! The provider itself is an external service; this module defines the
//! contract the app needs from it ([`IdentityProvider`]), the typed errors it
//! may return, and the flows ([`AuthFlow`]) that turn provider results into
//! profile updates and navigation events.

mod flow;
mod in_memory;

pub use flow::{AuthFlow, AuthOutcome};
pub use in_memory::{InMemoryIdentityProvider, DEFAULT_VERIFICATION_CODE};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Token-cache key under which a provider keeps its session token.
pub const SESSION_TOKEN_KEY: &str = "__session";

/// Point-in-time view of the provider's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthSnapshot {
    pub is_loaded: bool,
    pub is_signed_in: bool,
}

/// An active provider session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
}

/// Account details sent to the provider on sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// A sign-up waiting for its emailed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub email: String,
}

/// Errors reported by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The device already holds a session.
    #[error("session already exists")]
    SessionExists,

    /// The provider refused the attempt; holds its message.
    #[error("{0}")]
    Rejected(String),

    /// The attempt returned without reaching a complete status.
    #[error("attempt did not complete")]
    Incomplete,

    #[error("network error: {0}")]
    Network(String),

    #[error("identity provider not loaded")]
    NotLoaded,

    /// Verification or resend was requested without a pending sign-up.
    #[error("no sign-up awaiting verification")]
    NoPendingSignUp,
}

impl IdentityError {
    /// Classify a raw provider error message.
    ///
    /// This is the only place provider text is inspected.
    pub fn from_provider_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("session") && lower.contains("exist") {
            IdentityError::SessionExists
        } else {
            IdentityError::Rejected(message)
        }
    }
}

/// What the sign-in flow does when the provider reports an existing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionExistsPolicy {
    /// Count it as a successful sign-in and go to the dashboard.
    #[default]
    TreatAsSignedIn,
    /// Report it to the user like any other failure.
    Surface,
}

impl SessionExistsPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionExistsPolicy::TreatAsSignedIn => "treat_as_signed_in",
            SessionExistsPolicy::Surface => "surface",
        }
    }
}

impl fmt::Display for SessionExistsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionExistsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "treat_as_signed_in" | "signed_in" => Ok(SessionExistsPolicy::TreatAsSignedIn),
            "surface" | "error" => Ok(SessionExistsPolicy::Surface),
            other => Err(format!("unknown session-exists policy: {}", other)),
        }
    }
}

/// Contract for the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Whether the provider has finished initializing.
    async fn is_loaded(&self) -> bool;

    async fn is_signed_in(&self) -> bool;

    async fn sign_in(&self, identifier: &str, secret: &str) -> Result<Session, IdentityError>;

    /// Register an account and send a verification code to its email.
    async fn sign_up(&self, request: SignUpRequest) -> Result<PendingVerification, IdentityError>;

    async fn resend_verification(&self) -> Result<(), IdentityError>;

    /// Complete a pending sign-up with the emailed code.
    async fn verify(&self, code: &str) -> Result<Session, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;

    async fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            is_loaded: self.is_loaded().await,
            is_signed_in: self.is_signed_in().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_provider_messages() {
        assert_eq!(
            IdentityError::from_provider_message("Session already exists"),
            IdentityError::SessionExists
        );
        assert_eq!(
            IdentityError::from_provider_message("A SESSION for this client EXISTS"),
            IdentityError::SessionExists
        );
        assert_eq!(
            IdentityError::from_provider_message("Password is incorrect. Try again."),
            IdentityError::Rejected("Password is incorrect. Try again.".to_string())
        );
        // Both words are required.
        assert!(matches!(
            IdentityError::from_provider_message("Session expired"),
            IdentityError::Rejected(_)
        ));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(SessionExistsPolicy::default(), SessionExistsPolicy::TreatAsSignedIn);
        assert_eq!(
            "surface".parse::<SessionExistsPolicy>(),
            Ok(SessionExistsPolicy::Surface)
        );
        assert_eq!(
            "Treat-As-Signed-In".parse::<SessionExistsPolicy>(),
            Ok(SessionExistsPolicy::TreatAsSignedIn)
        );
        assert!("sometimes".parse::<SessionExistsPolicy>().is_err());

        for policy in [SessionExistsPolicy::TreatAsSignedIn, SessionExistsPolicy::Surface] {
            assert_eq!(policy.to_string().parse::<SessionExistsPolicy>(), Ok(policy));
        }
    }
}
