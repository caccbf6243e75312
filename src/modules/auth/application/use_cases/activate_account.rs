use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::auth::application::domain::entities::TokenKind;
use crate::auth::application::ports::outgoing::{
    AccountTokenRepositoryError, UserQuery, UserRepository, UserRepositoryError,
};
use crate::auth::application::services::TokenIssuer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated,
    AlreadyActive,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActivateAccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Activation token not found")]
    TokenNotFound,

    #[error("Token expired")]
    TokenExpired,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<AccountTokenRepositoryError> for ActivateAccountError {
    fn from(error: AccountTokenRepositoryError) -> Self {
        match error {
            AccountTokenRepositoryError::NotFound => ActivateAccountError::TokenNotFound,
            other => ActivateAccountError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait IActivateAccountUseCase: Send + Sync {
    async fn execute(
        &self,
        username: &str,
        token: &str,
    ) -> Result<ActivationOutcome, ActivateAccountError>;
}

#[derive(Clone)]
pub struct ActivateAccountUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    token_issuer: TokenIssuer,
}

impl<Q, R> ActivateAccountUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(query: Q, repository: R, token_issuer: TokenIssuer) -> Self {
        Self {
            query,
            repository,
            token_issuer,
        }
    }
}

#[async_trait]
impl<Q, R> IActivateAccountUseCase for ActivateAccountUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        username: &str,
        token: &str,
    ) -> Result<ActivationOutcome, ActivateAccountError> {
        let user = self
            .query
            .find_by_username(username)
            .await
            .map_err(|e| ActivateAccountError::RepositoryError(e.to_string()))?
            .ok_or(ActivateAccountError::UserNotFound)?;

        let token = self
            .token_issuer
            .find(TokenKind::Activation, user.id, token)
            .await?
            .ok_or(ActivateAccountError::TokenNotFound)?;

        if user.is_active {
            return Ok(ActivationOutcome::AlreadyActive);
        }

        if !TokenIssuer::verify(&token, Utc::now()) {
            return Err(ActivateAccountError::TokenExpired);
        }

        self.token_issuer.consume(&token).await?;

        self.repository
            .activate_user(user.id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => ActivateAccountError::UserNotFound,
                other => ActivateAccountError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = %user.id, username = %user.username, "Account activated");
        Ok(ActivationOutcome::Activated)
    }
}
