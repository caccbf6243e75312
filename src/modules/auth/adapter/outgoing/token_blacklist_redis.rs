use crate::auth::application::ports::outgoing::{TokenBlacklistError, TokenBlacklistRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use uuid::Uuid;

/// Revoked access tokens in Redis.
///
/// ```text
/// blog:blacklist:token:{token_hash} -> "{user_id}"   (TTL = remaining token lifetime)
/// ```
///
/// The key existing means the token is revoked. Redis expiry does the cleanup.
#[derive(Clone)]
pub struct RedisTokenBlacklist {
    pool: Arc<Pool>,
}

impl RedisTokenBlacklist {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn token_key(token_hash: &str) -> String {
        format!("blog:blacklist:token:{token_hash}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, TokenBlacklistError> {
        self.pool.get().await.map_err(|e| {
            tracing::error!(error = %e, "Redis pool error");
            TokenBlacklistError::StorageError(format!("Pool error: {}", e))
        })
    }
}

#[async_trait]
impl TokenBlacklistRepository for RedisTokenBlacklist {
    async fn blacklist_token(
        &self,
        token_hash: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenBlacklistError> {
        let ttl = (expires_at - Utc::now()).num_seconds();
        if ttl <= 0 {
            return Err(TokenBlacklistError::AlreadyExpired);
        }

        let token_key = Self::token_key(&token_hash);
        let mut conn = self.get_conn().await?;

        deadpool_redis::redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&token_key)
            .arg(user_id.to_string())
            .ignore()
            .cmd("EXPIRE")
            .arg(&token_key)
            .arg(ttl)
            .ignore()
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|e| TokenBlacklistError::StorageError(e.to_string()))?;

        Ok(())
    }

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenBlacklistError> {
        let key = Self::token_key(token_hash);
        let mut conn = self.get_conn().await?;

        let exists: bool = conn
            .exists(key)
            .await
            .map_err(|e| TokenBlacklistError::StorageError(e.to_string()))?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pool_for(url: &str) -> Arc<Pool> {
        Arc::new(
            deadpool_redis::Config::from_url(url)
                .create_pool(Some(deadpool_redis::Runtime::Tokio1))
                .expect("Failed to create Redis pool"),
        )
    }

    /// `None` when no Redis is configured for this run.
    fn live_repo() -> Option<RedisTokenBlacklist> {
        crate::tests::support::load_test_env();
        let url = std::env::var("REDIS_URL").ok()?;
        Some(RedisTokenBlacklist::new(pool_for(&url)))
    }

    #[test]
    fn test_token_key_format() {
        assert_eq!(
            RedisTokenBlacklist::token_key("abc"),
            "blog:blacklist:token:abc"
        );
    }

    #[tokio::test]
    async fn test_expired_token_is_not_stored() {
        // never connects: the TTL check runs first
        let repo = RedisTokenBlacklist::new(pool_for("redis://127.0.0.1:1"));

        let result = repo
            .blacklist_token(
                "hash".to_string(),
                Uuid::new_v4(),
                Utc::now() - Duration::seconds(5),
            )
            .await;

        assert!(matches!(result, Err(TokenBlacklistError::AlreadyExpired)));
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_storage_error() {
        let repo = RedisTokenBlacklist::new(pool_for("redis://127.0.0.1:1"));

        let result = repo.is_token_blacklisted("hash").await;
        assert!(matches!(result, Err(TokenBlacklistError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_blacklist_roundtrip_against_live_redis() {
        let Some(repo) = live_repo() else {
            eprintln!("REDIS_URL not set; skipping Redis integration test");
            return;
        };
        let hash = format!("test_{}", Uuid::new_v4());

        assert!(!repo.is_token_blacklisted(&hash).await.unwrap());

        repo.blacklist_token(hash.clone(), Uuid::new_v4(), Utc::now() + Duration::seconds(30))
            .await
            .unwrap();

        assert!(repo.is_token_blacklisted(&hash).await.unwrap());
    }
}
