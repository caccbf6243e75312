use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::auth::application::domain::entities::TokenKind;
use crate::auth::application::ports::incoming::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    AccountTokenRepositoryError, PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};
use crate::auth::application::services::TokenIssuer;

#[derive(Debug, Clone)]
pub struct ResetPasswordInput {
    pub username: String,
    pub token: String,
    pub new_password1: String,
    pub new_password2: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("User not found")]
    UserNotFound,

    #[error("Password reset token not found")]
    TokenNotFound,

    #[error("Token expired")]
    TokenExpired,

    #[error("The two password fields didn't match")]
    PasswordMismatch,

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<AccountTokenRepositoryError> for ResetPasswordError {
    fn from(error: AccountTokenRepositoryError) -> Self {
        match error {
            AccountTokenRepositoryError::NotFound => ResetPasswordError::TokenNotFound,
            other => ResetPasswordError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait IResetPasswordUseCase: Send + Sync {
    async fn execute(&self, input: ResetPasswordInput) -> Result<(), ResetPasswordError>;
}

#[derive(Clone)]
pub struct ResetPasswordUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    token_issuer: TokenIssuer,
    password_hasher: Arc<dyn PasswordHasher>,
    password_policy: Arc<dyn PasswordPolicy>,
}

impl<Q, R> ResetPasswordUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        token_issuer: TokenIssuer,
        password_hasher: Arc<dyn PasswordHasher>,
        password_policy: Arc<dyn PasswordPolicy>,
    ) -> Self {
        Self {
            query,
            repository,
            token_issuer,
            password_hasher,
            password_policy,
        }
    }
}

#[async_trait]
impl<Q, R> IResetPasswordUseCase for ResetPasswordUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, input: ResetPasswordInput) -> Result<(), ResetPasswordError> {
        let user = self
            .query
            .find_by_username(&input.username)
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?
            .ok_or(ResetPasswordError::UserNotFound)?;

        let token = self
            .token_issuer
            .find(TokenKind::PasswordReset, user.id, &input.token)
            .await?
            .ok_or(ResetPasswordError::TokenNotFound)?;

        if !TokenIssuer::verify(&token, Utc::now()) {
            return Err(ResetPasswordError::TokenExpired);
        }

        if input.new_password1 != input.new_password2 {
            return Err(ResetPasswordError::PasswordMismatch);
        }
        self.password_policy
            .validate(&input.new_password1)
            .map_err(|e| ResetPasswordError::InvalidPassword(e.to_string()))?;

        let password_hash = self
            .password_hasher
            .hash_password(&input.new_password1)
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        // Only the request that deletes the token may change the password
        self.token_issuer.consume(&token).await?;

        self.repository
            .update_password(user.id, password_hash)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => ResetPasswordError::UserNotFound,
                other => ResetPasswordError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = %user.id, "Password updated via reset token");
        Ok(())
    }
}
