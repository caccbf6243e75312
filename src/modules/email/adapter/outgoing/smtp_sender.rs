use crate::email::application::ports::outgoing::{EmailSendError, EmailSender, MailMessage};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    message::header::ContentType, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Authenticated relay (production).
    pub fn new(
        smtp_server: &str,
        smtp_username: &str,
        smtp_password: &str,
    ) -> Result<Self, EmailSendError> {
        let creds = Credentials::new(smtp_username.to_string(), smtp_password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_server)
            .map_err(|e| EmailSendError::Transport(e.to_string()))?
            .credentials(creds)
            .build();

        Ok(Self {
            mailer: Box::new(transport),
        })
    }

    // Local/test constructor (Mailpit, MailHog, etc.)
    pub fn new_local(host: &str, port: u16) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            mailer: Box::new(transport),
        }
    }

    fn build_message(message: &MailMessage) -> Result<Message, EmailSendError> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| EmailSendError::InvalidAddress(format!("{}: {}", message.from, e)))?;

        let mut builder = Message::builder().from(from).subject(message.subject.as_str());

        if message.to.is_empty() {
            return Err(EmailSendError::BuildFailed("no recipients".to_string()));
        }
        for to in &message.to {
            let mailbox: Mailbox = to
                .parse()
                .map_err(|e| EmailSendError::InvalidAddress(format!("{}: {}", to, e)))?;
            builder = builder.to(mailbox);
        }

        builder
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| EmailSendError::BuildFailed(e.to_string()))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, message: MailMessage) -> Result<(), EmailSendError> {
        let email = Self::build_message(&message)?;

        self.mailer
            .send(email)
            .await
            .map_err(EmailSendError::Transport)?;

        tracing::debug!(subject = %message.subject, recipients = message.to.len(), "Email sent");
        Ok(())
    }
}
