use async_trait::async_trait;
use gym_core::{EmailMessage, Mailer};
use uuid::Uuid;

/// Development transport: logs the message instead of delivering it.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from_address: String,
}

impl LogMailer {
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(
        &self,
        message: &EmailMessage,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        if message.to.trim().is_empty() {
            return Err("recipient address is empty".into());
        }
        let message_id = Uuid::new_v4().to_string();
        tracing::info!(
            "📧 [{}] {} -> {}: {}",
            message_id,
            self.from_address,
            message.to,
            message.subject
        );
        Ok(message_id)
    }
}
