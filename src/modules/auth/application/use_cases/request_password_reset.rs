use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::auth::application::domain::entities::TokenKind;
use crate::auth::application::ports::outgoing::{AccountTokenRepositoryError, UserQuery};
use crate::auth::application::services::TokenIssuer;
use crate::auth::application::use_cases::create_user::normalize_email;
use crate::email::application::ports::outgoing::{AccountNotifier, AccountRecipient};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("User with this email doesn't exist")]
    EmailNotRegistered,

    #[error("This account is not activated.")]
    AccountNotActive,

    #[error("A password reset token is already being issued for this account")]
    TokenConflict,

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<AccountTokenRepositoryError> for RequestPasswordResetError {
    fn from(error: AccountTokenRepositoryError) -> Self {
        match error {
            AccountTokenRepositoryError::Conflict => RequestPasswordResetError::TokenConflict,
            other => RequestPasswordResetError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait IRequestPasswordResetUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), RequestPasswordResetError>;
}

#[derive(Clone)]
pub struct RequestPasswordResetUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    query: Q,
    token_issuer: TokenIssuer,
    notifier: Arc<dyn AccountNotifier>,
}

impl<Q> RequestPasswordResetUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    pub fn new(query: Q, token_issuer: TokenIssuer, notifier: Arc<dyn AccountNotifier>) -> Self {
        Self {
            query,
            token_issuer,
            notifier,
        }
    }
}

#[async_trait]
impl<Q> IRequestPasswordResetUseCase for RequestPasswordResetUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, email: &str) -> Result<(), RequestPasswordResetError> {
        let user = self
            .query
            .find_by_email(&normalize_email(email))
            .await
            .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?
            .ok_or(RequestPasswordResetError::EmailNotRegistered)?;

        if !user.is_active {
            return Err(RequestPasswordResetError::AccountNotActive);
        }

        let token = self
            .token_issuer
            .issue(TokenKind::PasswordReset, user.id)
            .await?;

        let recipient = AccountRecipient {
            username: user.username.clone(),
            email: user.email.clone(),
        };
        self.notifier
            .send_password_reset_email(&recipient, &token.value)
            .await
            .map_err(|e| RequestPasswordResetError::EmailSendingFailed(e.to_string()))?;

        info!(user_id = %user.id, "Password reset token sent");
        Ok(())
    }
}
