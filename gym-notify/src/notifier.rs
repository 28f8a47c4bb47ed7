use chrono::{DateTime, Utc};
use gym_core::{EmailLogEntry, EmailLogRepository, EmailMessage, EmailType, Mailer};
use std::sync::Arc;

use crate::NotifyError;

/// Sends through the configured transport and logs every accepted message.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    log: Arc<dyn EmailLogRepository>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, log: Arc<dyn EmailLogRepository>) -> Self {
        Self { mailer, log }
    }

    /// Failed deliveries are logged at error level and never recorded.
    pub async fn send(
        &self,
        client_id: &str,
        email_type: EmailType,
        message: &EmailMessage,
        now: DateTime<Utc>,
    ) -> Result<EmailLogEntry, NotifyError> {
        match self.mailer.send(message).await {
            Ok(message_id) => {
                tracing::info!("Sent {} email {} to client {}", email_type, message_id, client_id);
                let entry = EmailLogEntry::new(client_id, email_type, message, now);
                self.log.record_email(&entry).await?;
                Ok(entry)
            }
            Err(e) => {
                tracing::error!("Failed to send {} email to client {}: {}", email_type, client_id, e);
                Err(NotifyError::Delivery {
                    recipient: message.to.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
