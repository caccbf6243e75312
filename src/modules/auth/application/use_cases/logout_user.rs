use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::auth::application::ports::outgoing::{
    TokenBlacklistError, TokenBlacklistRepository, TokenProvider,
};
use crate::auth::application::services::hash::hash_token;

// ====================== Logout Error =============================
#[derive(Debug, Clone, PartialEq)]
pub enum LogoutError {
    InvalidToken(String),
    TokenRevocationFailed(String),
}

impl std::fmt::Display for LogoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogoutError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            LogoutError::TokenRevocationFailed(msg) => {
                write!(f, "Token revocation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for LogoutError {}

// ============================ Logout Use Case =============================
#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    /// Revokes the presented access token until it would expire anyway.
    async fn execute(&self, access_token: &str) -> Result<(), LogoutError>;
}

#[derive(Clone)]
pub struct LogoutUseCase {
    blacklist: Arc<dyn TokenBlacklistRepository>,
    token_provider: Arc<dyn TokenProvider>,
}

impl LogoutUseCase {
    pub fn new(
        blacklist: Arc<dyn TokenBlacklistRepository>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            blacklist,
            token_provider,
        }
    }
}

#[async_trait]
impl ILogoutUseCase for LogoutUseCase {
    async fn execute(&self, access_token: &str) -> Result<(), LogoutError> {
        let claims = self
            .token_provider
            .verify_token(access_token)
            .map_err(|e| LogoutError::InvalidToken(e.to_string()))?;

        let expires_at: DateTime<Utc> = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| LogoutError::InvalidToken("bad expiry".to_string()))?;

        match self
            .blacklist
            .blacklist_token(hash_token(access_token), claims.sub, expires_at)
            .await
        {
            Ok(()) => {
                info!(user_id = %claims.sub, "Access token revoked");
                Ok(())
            }
            // Nothing left to revoke.
            Err(TokenBlacklistError::AlreadyExpired) => {
                warn!(user_id = %claims.sub, "Logout with a token at its expiry");
                Ok(())
            }
            Err(e) => Err(LogoutError::TokenRevocationFailed(e.to_string())),
        }
    }
}
