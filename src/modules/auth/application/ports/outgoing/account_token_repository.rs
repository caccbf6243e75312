use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{AccountToken, TokenKind};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccountTokenRepositoryError {
    #[error("Token not found")]
    NotFound,

    /// Another request created a token for the same user concurrently, or the
    /// random value collided with an existing one.
    #[error("Token conflict")]
    Conflict,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait AccountTokenRepository: Send + Sync {
    /// Delete any token of `kind` held by the user, then store `value` as the
    /// new one. Both steps run in a single transaction.
    async fn replace(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        value: &str,
    ) -> Result<AccountToken, AccountTokenRepositoryError>;

    /// Token matching both the user and the presented value.
    async fn find(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        value: &str,
    ) -> Result<Option<AccountToken>, AccountTokenRepositoryError>;

    /// Fails with `NotFound` when the user holds no token of `kind`.
    async fn delete(&self, kind: TokenKind, user_id: Uuid)
        -> Result<(), AccountTokenRepositoryError>;
}
