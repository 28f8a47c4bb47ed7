use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{Client, CoreResult, EmailLogEntry, Payment};

/// Client registry access
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Reserve the next sequential client id
    async fn allocate_client_id(&self) -> CoreResult<String>;

    async fn insert_client(&self, client: &Client) -> CoreResult<()>;

    async fn get_client(&self, client_id: &str) -> CoreResult<Option<Client>>;

    async fn list_clients(&self) -> CoreResult<Vec<Client>>;

    async fn update_client(&self, client: &Client) -> CoreResult<()>;

    /// Returns false when no such client existed
    async fn delete_client(&self, client_id: &str) -> CoreResult<bool>;
}

/// Payment history access
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn add_payment(&self, payment: &Payment) -> CoreResult<()>;

    /// Newest paid date first
    async fn list_payments(&self, client_id: &str) -> CoreResult<Vec<Payment>>;

    async fn delete_payments(&self, client_id: &str) -> CoreResult<usize>;
}

/// Sent-mail log and the per-year birthday ledger
#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    async fn record_email(&self, entry: &EmailLogEntry) -> CoreResult<()>;

    /// Newest first
    async fn list_emails(&self, client_id: &str) -> CoreResult<Vec<EmailLogEntry>>;

    async fn delete_emails(&self, client_id: &str) -> CoreResult<usize>;

    async fn birthday_sent(&self, client_id: &str, year: i32) -> CoreResult<bool>;

    async fn mark_birthday_sent(&self, client_id: &str, dob: NaiveDate, year: i32) -> CoreResult<()>;
}
