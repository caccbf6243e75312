use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::auth::application::domain::entities::TokenKind;
use crate::auth::application::ports::outgoing::{AccountTokenRepositoryError, UserQuery};
use crate::auth::application::services::TokenIssuer;
use crate::auth::application::use_cases::create_user::normalize_email;
use crate::email::application::ports::outgoing::{AccountNotifier, AccountRecipient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactivationOutcome {
    TokenSent,
    AlreadyActive,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestReactivationError {
    #[error("User with this email doesn't exist")]
    EmailNotRegistered,

    #[error("An activation token is already being issued for this account")]
    TokenConflict,

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<AccountTokenRepositoryError> for RequestReactivationError {
    fn from(error: AccountTokenRepositoryError) -> Self {
        match error {
            AccountTokenRepositoryError::Conflict => RequestReactivationError::TokenConflict,
            other => RequestReactivationError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait IRequestReactivationUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<ReactivationOutcome, RequestReactivationError>;
}

#[derive(Clone)]
pub struct RequestReactivationUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    query: Q,
    token_issuer: TokenIssuer,
    notifier: Arc<dyn AccountNotifier>,
}

impl<Q> RequestReactivationUseCase<Q>
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
impl<Q> IRequestReactivationUseCase for RequestReactivationUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, email: &str) -> Result<ReactivationOutcome, RequestReactivationError> {
        let user = self
            .query
            .find_by_email(&normalize_email(email))
            .await
            .map_err(|e| RequestReactivationError::RepositoryError(e.to_string()))?
            .ok_or(RequestReactivationError::EmailNotRegistered)?;

        if user.is_active {
            return Ok(ReactivationOutcome::AlreadyActive);
        }

        let token = self.token_issuer.issue(TokenKind::Activation, user.id).await?;

        let recipient = AccountRecipient {
            username: user.username.clone(),
            email: user.email.clone(),
        };
        self.notifier
            .send_activation_email(&recipient, &token.value)
            .await
            .map_err(|e| RequestReactivationError::EmailSendingFailed(e.to_string()))?;

        info!(user_id = %user.id, "Reactivation token sent");
        Ok(ReactivationOutcome::TokenSent)
    }
}
