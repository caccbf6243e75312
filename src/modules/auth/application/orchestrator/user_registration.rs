use std::sync::Arc;

use tracing::info;

use crate::auth::application::domain::entities::TokenKind;
use crate::auth::application::services::TokenIssuer;
use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserInput, CreateUserOutput, ICreateUserUseCase,
};
use crate::email::application::ports::outgoing::{AccountNotifier, AccountRecipient};

// ============================================================================
// Registration Output with Message
// ============================================================================
#[derive(Debug, Clone)]
pub struct UserRegistrationOutput {
    pub user_id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub message: String,
}

impl From<CreateUserOutput> for UserRegistrationOutput {
    fn from(output: CreateUserOutput) -> Self {
        Self {
            user_id: output.user_id,
            username: output.username,
            email: output.email,
            first_name: output.first_name,
            last_name: output.last_name,
            message: "Account created. Please check your email inbox to activate it.".to_string(),
        }
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserRegistrationError {
    #[error("User creation failed: {0}")]
    CreateUserFailed(#[from] CreateUserError),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

// ============================================================================
// User Registration (Orchestration Layer)
// ============================================================================

#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
    token_issuer: TokenIssuer,
    notifier: Arc<dyn AccountNotifier>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
        token_issuer: TokenIssuer,
        notifier: Arc<dyn AccountNotifier>,
    ) -> Self {
        Self {
            create_user_use_case,
            token_issuer,
            notifier,
        }
    }

    /// 1. Creates the inactive account
    /// 2. Issues its activation token
    /// 3. Sends the activation email, failing the request if delivery fails
    pub async fn register_user(
        &self,
        input: CreateUserInput,
    ) -> Result<UserRegistrationOutput, UserRegistrationError> {
        let created_user = self.create_user_use_case.execute(input).await?;

        let token = self
            .token_issuer
            .issue(TokenKind::Activation, created_user.user_id)
            .await
            .map_err(|e| UserRegistrationError::TokenGenerationFailed(e.to_string()))?;

        let recipient = AccountRecipient {
            username: created_user.username.clone(),
            email: created_user.email.clone(),
        };
        self.notifier
            .send_activation_email(&recipient, &token.value)
            .await
            .map_err(|e| UserRegistrationError::EmailSendingFailed(e.to_string()))?;

        info!(
            user_id = %created_user.user_id,
            username = %created_user.username,
            "User registered, activation email sent"
        );

        Ok(created_user.into())
    }
}
