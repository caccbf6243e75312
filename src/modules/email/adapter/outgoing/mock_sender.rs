use crate::email::application::ports::outgoing::{EmailSendError, EmailSender, MailMessage};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Records every message instead of delivering it.
#[derive(Clone, Default)]
pub struct MockEmailSender {
    sent: Arc<Mutex<Vec<MailMessage>>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_messages(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, message: MailMessage) -> Result<(), EmailSendError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
