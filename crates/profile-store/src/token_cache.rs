//! Local cache for identity-provider session tokens.
//!
//! Reads and writes never fail from the caller's point of view: a storage
//! error on read is reported as "no token", and a failed write is dropped.
//! Both are logged.

use tracing::warn;

use crate::Database;

/// Key/value token storage backed by the `secure_tokens` table.
#[derive(Debug, Clone)]
pub struct TokenCache {
    database: Database,
}

impl TokenCache {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Get a token, or `None` if absent or unreadable.
    pub async fn get(&self, key: &str) -> Option<String> {
        let result = sqlx::query_scalar::<_, String>("SELECT value FROM secure_tokens WHERE key = ?")
            .bind(key)
            .fetch_optional(self.database.pool())
            .await;

        match result {
            Ok(value) => value,
            Err(err) => {
                warn!("Failed to read token {}: {}", key, err);
                None
            }
        }
    }

    /// Store a token, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) {
        let result = sqlx::query(
            r#"
            INSERT INTO secure_tokens (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(self.database.pool())
        .await;

        if let Err(err) = result {
            warn!("Failed to save token {}: {}", key, err);
        }
    }

    /// Remove a token if present.
    pub async fn remove(&self, key: &str) {
        let result = sqlx::query("DELETE FROM secure_tokens WHERE key = ?")
            .bind(key)
            .execute(self.database.pool())
            .await;

        if let Err(err) = result {
            warn!("Failed to remove token {}: {}", key, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_cache() -> TokenCache {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        TokenCache::new(db)
    }

    #[tokio::test]
    async fn test_get_missing_token() {
        let cache = test_cache().await;
        assert!(cache.get("__clerk_client_jwt").await.is_none());
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let cache = test_cache().await;

        cache.set("session", "tok-1").await;
        assert_eq!(cache.get("session").await.as_deref(), Some("tok-1"));

        cache.set("session", "tok-2").await;
        assert_eq!(cache.get("session").await.as_deref(), Some("tok-2"));

        cache.remove("session").await;
        assert!(cache.get("session").await.is_none());
    }

    #[tokio::test]
    async fn test_failures_are_silent() {
        // No migrations: the table does not exist, so every query fails.
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let cache = TokenCache::new(db);

        cache.set("session", "tok").await;
        assert!(cache.get("session").await.is_none());
        cache.remove("session").await;
    }
}
