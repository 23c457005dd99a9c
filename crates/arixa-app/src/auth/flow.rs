//! Sign-in, sign-up, verification and sign-out flows.
//!
//! Each flow validates its form, calls the provider, updates the profile
//! store, and hands back the navigation event to dispatch. Provider failures
//! become [`AppError::Identity`] carrying the provider's message, or a fixed
//! fallback when the provider gave none.

use std::sync::Arc;

use tracing::{info, warn};

use super::{IdentityError, IdentityProvider, Session, SessionExistsPolicy, SignUpRequest};
use crate::error::AppError;
use crate::onboarding::{validate_sign_in, validate_verification_code, SignUpForm};
use crate::screen::NavEvent;
use crate::store::AppStore;

const SIGN_IN_FAILED: &str = "Sign in failed";
const SIGN_UP_FAILED: &str = "Sign up failed";
const VERIFICATION_FAILED: &str = "Verification failed";
const RESEND_FAILED: &str = "Failed to resend code";
const SIGN_OUT_FAILED: &str = "Failed to log out. Please try again.";

/// Result of a successful flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    /// Event to dispatch on the navigator.
    pub event: NavEvent,
    pub session: Option<Session>,
}

impl AuthOutcome {
    fn new(event: NavEvent, session: Option<Session>) -> Self {
        Self { event, session }
    }
}

pub struct AuthFlow<P: IdentityProvider> {
    provider: Arc<P>,
    store: Arc<AppStore>,
    policy: SessionExistsPolicy,
}

impl<P: IdentityProvider> AuthFlow<P> {
    pub fn new(provider: Arc<P>, store: Arc<AppStore>, policy: SessionExistsPolicy) -> Self {
        Self {
            provider,
            store,
            policy,
        }
    }

    pub fn policy(&self) -> SessionExistsPolicy {
        self.policy
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    pub async fn sign_in(&self, identifier: &str, secret: &str) -> Result<AuthOutcome, AppError> {
        self.require_loaded().await?;

        if self.provider.is_signed_in().await {
            self.store.set_authenticated(true).await;
            return Ok(AuthOutcome::new(NavEvent::SignedIn, None));
        }

        validate_sign_in(identifier, secret)?;

        match self.provider.sign_in(identifier.trim(), secret).await {
            Ok(session) => {
                info!("Signed in as {}", session.user_id);
                if self.store.profile().await.email.is_empty() {
                    let name = session.first_name.clone().unwrap_or_default();
                    self.store.set_account(&name, &session.email).await;
                }
                self.store.set_authenticated(true).await;
                Ok(AuthOutcome::new(NavEvent::SignedIn, Some(session)))
            }
            Err(IdentityError::SessionExists)
                if self.policy == SessionExistsPolicy::TreatAsSignedIn =>
            {
                info!("Provider reports an existing session; continuing as signed in");
                self.store.set_authenticated(true).await;
                Ok(AuthOutcome::new(NavEvent::SignedIn, None))
            }
            Err(err) => Err(surface(err, SIGN_IN_FAILED)),
        }
    }

    /// Register the account and record its name and email on the profile.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<AuthOutcome, AppError> {
        self.require_loaded().await?;
        let valid = form.validate()?;

        let request = SignUpRequest {
            email: valid.email.clone(),
            password: valid.password,
            first_name: valid.first_name,
            last_name: valid.last_name,
        };

        let pending = self
            .provider
            .sign_up(request)
            .await
            .map_err(|err| surface(err, SIGN_UP_FAILED))?;

        info!("Sign-up pending verification for {}", pending.email);
        self.store.set_account(&valid.full_name, &valid.email).await;
        Ok(AuthOutcome::new(NavEvent::VerificationSent, None))
    }

    pub async fn verify(&self, code: &str) -> Result<AuthOutcome, AppError> {
        self.require_loaded().await?;
        let code = validate_verification_code(code)?;

        let session = self
            .provider
            .verify(code)
            .await
            .map_err(|err| surface(err, VERIFICATION_FAILED))?;

        info!("Verified {}", session.user_id);
        self.store.set_authenticated(true).await;
        Ok(AuthOutcome::new(NavEvent::SignedIn, Some(session)))
    }

    pub async fn resend_code(&self) -> Result<(), AppError> {
        self.require_loaded().await?;
        self.provider
            .resend_verification()
            .await
            .map_err(|err| surface(err, RESEND_FAILED))
    }

    /// End the session, then clear the profile.
    ///
    /// On provider failure the profile is left as it was.
    pub async fn sign_out(&self) -> Result<AuthOutcome, AppError> {
        self.provider
            .sign_out()
            .await
            .map_err(|err| surface(err, SIGN_OUT_FAILED))?;

        self.store.reset().await;
        info!("Signed out");
        Ok(AuthOutcome::new(NavEvent::SignedOut, None))
    }

    async fn require_loaded(&self) -> Result<(), AppError> {
        if self.provider.is_loaded().await {
            Ok(())
        } else {
            Err(AppError::NotReady)
        }
    }
}

/// Map a provider error to the alert shown to the user.
fn surface(err: IdentityError, fallback: &str) -> AppError {
    warn!("{}: {}", fallback, err);
    match err {
        IdentityError::Rejected(message) if !message.trim().is_empty() => {
            AppError::Identity(message)
        }
        IdentityError::NotLoaded => AppError::NotReady,
        IdentityError::Incomplete if fallback != SIGN_OUT_FAILED => {
            AppError::Identity(format!("{}. Please try again.", fallback))
        }
        _ => AppError::Identity(fallback.to_string()),
    }
}
