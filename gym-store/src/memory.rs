use async_trait::async_trait;
use chrono::NaiveDate;
use gym_core::client::next_client_id;
use gym_core::{
    Client, ClientRepository, CoreError, CoreResult, EmailLogEntry, EmailLogRepository, Payment,
    PaymentRepository,
};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::{Mutex, RwLock};

/// Process-local store backing all three repositories.
///
/// Clients are keyed by their numeric id so listing comes back in
/// registration order. The id counter never reuses an id, even after
/// a delete.
#[derive(Default)]
pub struct MemoryStore {
    clients: RwLock<BTreeMap<u64, Client>>,
    last_client_id: Mutex<Option<String>>,
    payments: RwLock<Vec<Payment>>,
    emails: RwLock<Vec<EmailLogEntry>>,
    birthdays: RwLock<HashMap<(String, i32), NaiveDate>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn numeric_id(client_id: &str) -> CoreResult<u64> {
    client_id
        .trim()
        .parse()
        .map_err(|_| CoreError::ValidationError(format!("client id must be numeric: {}", client_id)))
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn allocate_client_id(&self) -> CoreResult<String> {
        let mut last = self.last_client_id.lock().await;
        let next = next_client_id(last.as_deref())?;
        *last = Some(next.clone());
        Ok(next)
    }

    async fn insert_client(&self, client: &Client) -> CoreResult<()> {
        let key = numeric_id(&client.client_id)?;
        let mut clients = self.clients.write().await;
        if clients.contains_key(&key) {
            return Err(CoreError::Conflict(format!("client {} already exists", client.client_id)));
        }
        clients.insert(key, client.clone());
        tracing::debug!("Stored client {}", client.client_id);
        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> CoreResult<Option<Client>> {
        let Ok(key) = numeric_id(client_id) else {
            return Ok(None);
        };
        Ok(self.clients.read().await.get(&key).cloned())
    }

    async fn list_clients(&self) -> CoreResult<Vec<Client>> {
        Ok(self.clients.read().await.values().cloned().collect())
    }

    async fn update_client(&self, client: &Client) -> CoreResult<()> {
        let key = numeric_id(&client.client_id)?;
        let mut clients = self.clients.write().await;
        match clients.get_mut(&key) {
            Some(stored) => {
                *stored = client.clone();
                Ok(())
            }
            None => Err(CoreError::NotFound(format!("client {}", client.client_id))),
        }
    }

    async fn delete_client(&self, client_id: &str) -> CoreResult<bool> {
        let Ok(key) = numeric_id(client_id) else {
            return Ok(false);
        };
        Ok(self.clients.write().await.remove(&key).is_some())
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn add_payment(&self, payment: &Payment) -> CoreResult<()> {
        let mut payments = self.payments.write().await;
        if payments.iter().any(|p| p.id == payment.id) {
            return Err(CoreError::Conflict(format!("payment {} already recorded", payment.id)));
        }
        payments.push(payment.clone());
        Ok(())
    }

    async fn list_payments(&self, client_id: &str) -> CoreResult<Vec<Payment>> {
        let mut history: Vec<Payment> = self
            .payments
            .read()
            .await
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| {
            b.paid_date
                .cmp(&a.paid_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(history)
    }

    async fn delete_payments(&self, client_id: &str) -> CoreResult<usize> {
        let mut payments = self.payments.write().await;
        let before = payments.len();
        payments.retain(|p| p.client_id != client_id);
        Ok(before - payments.len())
    }
}

#[async_trait]
impl EmailLogRepository for MemoryStore {
    async fn record_email(&self, entry: &EmailLogEntry) -> CoreResult<()> {
        self.emails.write().await.push(entry.clone());
        Ok(())
    }

    async fn list_emails(&self, client_id: &str) -> CoreResult<Vec<EmailLogEntry>> {
        let mut entries: Vec<EmailLogEntry> = self
            .emails
            .read()
            .await
            .iter()
            .filter(|e| e.client_id == client_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(entries)
    }

    async fn delete_emails(&self, client_id: &str) -> CoreResult<usize> {
        let mut emails = self.emails.write().await;
        let before = emails.len();
        emails.retain(|e| e.client_id != client_id);
        let removed = before - emails.len();
        drop(emails);

        self.birthdays
            .write()
            .await
            .retain(|(id, _), _| id != client_id);
        Ok(removed)
    }

    async fn birthday_sent(&self, client_id: &str, year: i32) -> CoreResult<bool> {
        Ok(self
            .birthdays
            .read()
            .await
            .contains_key(&(client_id.to_string(), year)))
    }

    async fn mark_birthday_sent(&self, client_id: &str, dob: NaiveDate, year: i32) -> CoreResult<()> {
        self.birthdays
            .write()
            .await
            .insert((client_id.to_string(), year), dob);
        Ok(())
    }
}
