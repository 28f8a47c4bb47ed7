use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    Welcome,
    Birthday,
    PaymentReminder,
    Custom,
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmailType::Welcome => "welcome",
            EmailType::Birthday => "birthday",
            EmailType::PaymentReminder => "payment_reminder",
            EmailType::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// A rendered message ready for the transport
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Record of a message the transport accepted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailLogEntry {
    pub id: Uuid,
    pub client_id: String,
    pub email_type: EmailType,
    pub recipient_email: String,
    pub subject: String,
    pub sent_at: DateTime<Utc>,
}

impl EmailLogEntry {
    pub fn new(client_id: &str, email_type: EmailType, message: &EmailMessage, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: client_id.to_string(),
            email_type,
            recipient_email: message.to.clone(),
            subject: message.subject.clone(),
            sent_at,
        }
    }
}

/// Outbound mail transport (SMTP relay, third-party API, ...)
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message; returns the transport's message id
    async fn send(
        &self,
        message: &EmailMessage,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
