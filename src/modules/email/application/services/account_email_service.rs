use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::email::application::ports::outgoing::{
    AccountNotificationError, AccountNotifier, AccountRecipient, EmailSender, MailMessage,
};

pub const ACTIVATION_SUBJECT: &str = "Activate your account";
pub const PASSWORD_RESET_SUBJECT: &str = "Reset your password";

/// Renders activation and reset links against the public site URL and hands
/// them to the configured sender.
#[derive(Clone)]
pub struct AccountEmailService {
    sender: Arc<dyn EmailSender>,
    site_url: String,
    from_address: String,
}

impl fmt::Debug for AccountEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("site_url", &self.site_url)
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl AccountEmailService {
    pub fn new(sender: Arc<dyn EmailSender>, site_url: &str, from_address: &str) -> Self {
        Self {
            sender,
            site_url: site_url.trim_end_matches('/').to_string(),
            from_address: from_address.to_string(),
        }
    }

    pub fn activation_url(&self, username: &str, token: &str) -> String {
        format!("{}/api/accounts/activate/{}/{}", self.site_url, username, token)
    }

    pub fn password_reset_url(&self, username: &str, token: &str) -> String {
        format!(
            "{}/api/accounts/password-reset/{}/{}",
            self.site_url, username, token
        )
    }

    async fn deliver(
        &self,
        recipient: &AccountRecipient,
        subject: &str,
        body: String,
    ) -> Result<(), AccountNotificationError> {
        let message = MailMessage {
            subject: subject.to_string(),
            body,
            from: self.from_address.clone(),
            to: vec![recipient.email.clone()],
        };

        self.sender.send(message).await.map_err(|e| {
            tracing::error!(
                username = %recipient.username,
                subject = %subject,
                error = %e,
                "Failed to send account email"
            );
            AccountNotificationError::from(e)
        })
    }
}

#[async_trait]
impl AccountNotifier for AccountEmailService {
    async fn send_activation_email(
        &self,
        recipient: &AccountRecipient,
        token: &str,
    ) -> Result<(), AccountNotificationError> {
        let url = self.activation_url(&recipient.username, token);
        let body = format!(
            "Please click on the following link to activate your account: {}",
            url
        );

        self.deliver(recipient, ACTIVATION_SUBJECT, body).await
    }

    async fn send_password_reset_email(
        &self,
        recipient: &AccountRecipient,
        token: &str,
    ) -> Result<(), AccountNotificationError> {
        let url = self.password_reset_url(&recipient.username, token);
        let body = format!(
            "Please click on the following link to reset your password: {}",
            url
        );

        self.deliver(recipient, PASSWORD_RESET_SUBJECT, body).await
    }
}
