use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenBlacklistError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Token already expired")]
    AlreadyExpired,
}

/// Revoked access tokens, keyed by their SHA-256 hash. Entries only need to
/// live until the token would have expired on its own.
#[async_trait]
pub trait TokenBlacklistRepository: Send + Sync {
    async fn blacklist_token(
        &self,
        token_hash: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenBlacklistError>;

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenBlacklistError>;
}
