use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::auth::application::domain::entities::{AccountToken, TokenKind};
use crate::auth::application::ports::outgoing::{
    AccountTokenRepository, AccountTokenRepositoryError, TokenGenerator,
};

/// Hands out activation and password-reset tokens.
///
/// Issuing always replaces: the previous token of the same kind is deleted and
/// a fresh value with a fresh timestamp is stored, so a user never holds two
/// live tokens of one kind.
#[derive(Clone)]
pub struct TokenIssuer {
    repository: Arc<dyn AccountTokenRepository>,
    generator: Arc<dyn TokenGenerator>,
}

impl TokenIssuer {
    pub fn new(
        repository: Arc<dyn AccountTokenRepository>,
        generator: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            repository,
            generator,
        }
    }

    pub async fn issue(
        &self,
        kind: TokenKind,
        user_id: Uuid,
    ) -> Result<AccountToken, AccountTokenRepositoryError> {
        let value = self.generator.generate();
        let token = self.repository.replace(kind, user_id, &value).await?;

        debug!(user_id = %user_id, kind = %kind, "Account token issued");
        Ok(token)
    }

    pub async fn find(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        value: &str,
    ) -> Result<Option<AccountToken>, AccountTokenRepositoryError> {
        self.repository.find(kind, user_id, value).await
    }

    /// Consumption is the caller's job; `verify` never deletes.
    pub fn verify(token: &AccountToken, now: DateTime<Utc>) -> bool {
        token.is_valid_at(now)
    }

    pub async fn consume(
        &self,
        token: &AccountToken,
    ) -> Result<(), AccountTokenRepositoryError> {
        self.repository.delete(token.kind, token.user_id).await
    }
}
