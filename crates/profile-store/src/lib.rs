//! SQLite persistence layer for the Arixa client.
//!
//! This crate persists the onboarding profile, the authentication flag, and
//! identity-provider session tokens using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use profile_store::{profile, Database, ProfileState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:arixa.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Rehydrate, or start from the signed-out defaults
//!     let state = profile::load_state(db.pool()).await?.unwrap_or_default();
//!     println!("authenticated: {}", state.is_authenticated);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod profile;
pub mod token_cache;

pub use error::{Result, StoreError};
pub use models::{FitnessGoal, Gender, ProfileRecord, ProfileState, StoredProfile};
pub use token_cache::TokenCache;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size. The client is single-user, so this stays small.
    const DEFAULT_POOL_SIZE: u32 = 4;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to profile store: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running profile store migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();

        assert!(profile::load_state(db.pool()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_profile_state_serializes() {
        let state = ProfileState {
            profile: ProfileRecord {
                name: "Omar".to_string(),
                fitness_goal: Some(FitnessGoal::BuildMuscle),
                ..Default::default()
            },
            is_authenticated: false,
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["profile"]["name"], "Omar");
        assert_eq!(json["profile"]["fitness_goal"], "BuildMuscle");
    }
}
