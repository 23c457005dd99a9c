//! Configuration loaded from environment variables.

use std::env;

use openai_coach::OpenAiCoachConfig;
use profile_store::{Database, TokenCache};
use thiserror::Error;
use tracing::info;

use crate::auth::SessionExistsPolicy;
use crate::store::AppStore;

/// Default SQLite database URL.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:arixa.db?mode=rwc";

/// App configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database URL for the profile store and token cache.
    pub database_url: String,
    pub session_exists_policy: SessionExistsPolicy,
    pub coach: OpenAiCoachConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            session_exists_policy: SessionExistsPolicy::default(),
            coach: OpenAiCoachConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ARIXA_DATABASE_URL` | SQLite database URL | `sqlite:arixa.db?mode=rwc` |
    /// | `ARIXA_SESSION_EXISTS_POLICY` | `treat_as_signed_in` or `surface` | `treat_as_signed_in` |
    ///
    /// Chat settings come from [`OpenAiCoachConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("ARIXA_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let session_exists_policy = match env::var("ARIXA_SESSION_EXISTS_POLICY") {
            Ok(raw) => raw
                .parse::<SessionExistsPolicy>()
                .map_err(ConfigError::InvalidPolicy)?,
            Err(_) => SessionExistsPolicy::default(),
        };

        Ok(Self {
            database_url,
            session_exists_policy,
            coach: OpenAiCoachConfig::from_env(),
        })
    }

    /// Connect to the configured database and run migrations.
    pub async fn open_database(&self) -> Result<Database, ConfigError> {
        let database = Database::connect(&self.database_url).await?;
        database.migrate().await?;
        info!("Profile store ready at {}", self.database_url);
        Ok(database)
    }

    /// Open the database and build the persisted store and token cache on it.
    pub async fn open_store(&self) -> Result<(AppStore, TokenCache), ConfigError> {
        let database = self.open_database().await?;
        Ok((
            AppStore::with_database(database.clone()),
            TokenCache::new(database),
        ))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid ARIXA_SESSION_EXISTS_POLICY: {0}")]
    InvalidPolicy(String),

    #[error("Failed to open database: {0}")]
    Database(#[from] profile_store::StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.session_exists_policy, SessionExistsPolicy::TreatAsSignedIn);
    }

    #[tokio::test]
    async fn test_open_in_memory_store() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            ..Default::default()
        };

        let (store, tokens) = config.open_store().await.unwrap();
        store.rehydrate().await;
        assert!(store.is_ready());
        assert!(tokens.get("missing").await.is_none());
    }
}
