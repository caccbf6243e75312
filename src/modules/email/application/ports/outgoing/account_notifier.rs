use async_trait::async_trait;

use super::email_sender::EmailSendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecipient {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccountNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(#[from] EmailSendError),
}

/// Sends the account lifecycle emails. Delivery failures are returned to the
/// caller; nothing is retried in the background.
#[async_trait]
pub trait AccountNotifier: Send + Sync {
    async fn send_activation_email(
        &self,
        recipient: &AccountRecipient,
        token: &str,
    ) -> Result<(), AccountNotificationError>;

    async fn send_password_reset_email(
        &self,
        recipient: &AccountRecipient,
        token: &str,
    ) -> Result<(), AccountNotificationError>;
}
