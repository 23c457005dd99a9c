//! In-process identity provider.
//!
//! Keeps accounts, pending verification codes, and the current session in
//! memory. Used by tests and the demo walkthrough; failures can be injected
//! with [`InMemoryIdentityProvider::fail_next`].

use std::collections::HashMap;

use async_trait::async_trait;
use profile_store::TokenCache;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{
    IdentityError, IdentityProvider, PendingVerification, Session, SignUpRequest,
    SESSION_TOKEN_KEY,
};

/// Code issued for every sign-up unless overridden.
pub const DEFAULT_VERIFICATION_CODE: &str = "424242";

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
struct Account {
    user_id: String,
    password: String,
    first_name: String,
    verified: bool,
}

#[derive(Debug, Default)]
struct ProviderState {
    loaded: bool,
    accounts: HashMap<String, Account>,
    pending_email: Option<String>,
    session: Option<Session>,
    sessions_issued: u64,
    fail_next: Option<IdentityError>,
}

impl ProviderState {
    fn begin(&mut self) -> Result<(), IdentityError> {
        if !self.loaded {
            return Err(IdentityError::NotLoaded);
        }
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn open_session(&mut self, email: &str, account: &Account) -> Session {
        self.sessions_issued += 1;
        let session = Session {
            session_id: format!("sess_{}", self.sessions_issued),
            user_id: account.user_id.clone(),
            email: email.to_string(),
            first_name: Some(account.first_name.clone()),
        };
        self.session = Some(session.clone());
        session
    }
}

pub struct InMemoryIdentityProvider {
    state: Mutex<ProviderState>,
    verification_code: String,
    tokens: Option<TokenCache>,
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentityProvider {
    /// A loaded provider with no accounts.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ProviderState {
                loaded: true,
                ..Default::default()
            }),
            verification_code: DEFAULT_VERIFICATION_CODE.to_string(),
            tokens: None,
        }
    }

    /// Issue `code` for every sign-up.
    pub fn with_verification_code(mut self, code: impl Into<String>) -> Self {
        self.verification_code = code.into();
        self
    }

    /// Persist the session token so [`restore`](Self::restore) can pick it up.
    pub fn with_token_cache(mut self, tokens: TokenCache) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Add an already-verified account.
    pub async fn register_verified(&self, email: &str, password: &str, first_name: &str) {
        let mut state = self.state.lock().await;
        let user_id = format!("user_{}", state.accounts.len() + 1);
        state.accounts.insert(
            email.to_lowercase(),
            Account {
                user_id,
                password: password.to_string(),
                first_name: first_name.to_string(),
                verified: true,
            },
        );
    }

    /// Simulate the provider SDK still initializing.
    pub async fn set_loaded(&self, loaded: bool) {
        self.state.lock().await.loaded = loaded;
    }

    /// Make the next operation fail with `err`.
    pub async fn fail_next(&self, err: IdentityError) {
        self.state.lock().await.fail_next = Some(err);
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.lock().await.session.clone()
    }

    /// The code a pending sign-up is waiting for.
    pub async fn pending_code(&self) -> Option<String> {
        let state = self.state.lock().await;
        state
            .pending_email
            .as_ref()
            .map(|_| self.verification_code.clone())
    }

    /// Reload a session saved in the token cache by an earlier process.
    ///
    /// Returns whether a session was restored.
    pub async fn restore(&self) -> bool {
        let Some(tokens) = &self.tokens else {
            return false;
        };
        let Some(raw) = tokens.get(SESSION_TOKEN_KEY).await else {
            return false;
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                info!("Restored session {} for {}", session.session_id, session.email);
                self.state.lock().await.session = Some(session);
                true
            }
            Err(err) => {
                warn!("Discarding unreadable session token: {}", err);
                tokens.remove(SESSION_TOKEN_KEY).await;
                false
            }
        }
    }

    async fn store_token(&self, session: &Session) {
        let Some(tokens) = &self.tokens else {
            return;
        };
        match serde_json::to_string(session) {
            Ok(raw) => tokens.set(SESSION_TOKEN_KEY, &raw).await,
            Err(err) => warn!("Failed to encode session token: {}", err),
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn is_loaded(&self) -> bool {
        self.state.lock().await.loaded
    }

    async fn is_signed_in(&self) -> bool {
        let state = self.state.lock().await;
        state.loaded && state.session.is_some()
    }

    async fn sign_in(&self, identifier: &str, secret: &str) -> Result<Session, IdentityError> {
        let session = {
            let mut state = self.state.lock().await;
            state.begin()?;

            if state.session.is_some() {
                return Err(IdentityError::from_provider_message("Session already exists"));
            }

            let email = identifier.trim().to_lowercase();
            let account = state
                .accounts
                .get(&email)
                .cloned()
                .ok_or_else(|| IdentityError::Rejected("Couldn't find your account.".to_string()))?;

            if account.password != secret {
                return Err(IdentityError::Rejected(
                    "Password is incorrect. Try again.".to_string(),
                ));
            }
            if !account.verified {
                return Err(IdentityError::Incomplete);
            }

            state.open_session(&email, &account)
        };

        debug!("Signed in {}", session.email);
        self.store_token(&session).await;
        Ok(session)
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<PendingVerification, IdentityError> {
        let mut state = self.state.lock().await;
        state.begin()?;

        let email = request.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(IdentityError::Rejected(
                "email_address must be a valid email address.".to_string(),
            ));
        }
        if state.accounts.get(&email).is_some_and(|a| a.verified) {
            return Err(IdentityError::Rejected(
                "That email address is taken. Please try another.".to_string(),
            ));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::Rejected(format!(
                "Passwords must be {} characters or more.",
                MIN_PASSWORD_LEN
            )));
        }

        let user_id = format!("user_{}", state.accounts.len() + 1);
        state.accounts.insert(
            email.clone(),
            Account {
                user_id,
                password: request.password,
                first_name: request.first_name,
                verified: false,
            },
        );
        state.pending_email = Some(email.clone());

        debug!("Verification code sent to {}", email);
        Ok(PendingVerification { email })
    }

    async fn resend_verification(&self) -> Result<(), IdentityError> {
        let mut state = self.state.lock().await;
        state.begin()?;

        let email = state
            .pending_email
            .as_ref()
            .ok_or(IdentityError::NoPendingSignUp)?;
        debug!("Verification code re-sent to {}", email);
        Ok(())
    }

    async fn verify(&self, code: &str) -> Result<Session, IdentityError> {
        let session = {
            let mut state = self.state.lock().await;
            state.begin()?;

            let email = state
                .pending_email
                .clone()
                .ok_or(IdentityError::NoPendingSignUp)?;

            if code.trim() != self.verification_code {
                return Err(IdentityError::Rejected("Incorrect code".to_string()));
            }

            let account = match state.accounts.get_mut(&email) {
                Some(account) => {
                    account.verified = true;
                    account.clone()
                }
                None => return Err(IdentityError::Incomplete),
            };
            state.pending_email = None;
            state.open_session(&email, &account)
        };

        debug!("Verified {}", session.email);
        self.store_token(&session).await;
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        {
            let mut state = self.state.lock().await;
            state.begin()?;
            state.session = None;
        }

        if let Some(tokens) = &self.tokens {
            tokens.remove(SESSION_TOKEN_KEY).await;
        }
        Ok(())
    }
}
