use chrono::{DateTime, Datelike, NaiveDate, Utc};
use gym_core::calendar::is_birthday;
use gym_core::{ClientRepository, EmailLogRepository, EmailType};
use serde::Serialize;
use std::sync::Arc;

use crate::notifier::Notifier;
use crate::templates::EmailTemplates;
use crate::NotifyError;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BirthdayResult {
    pub client_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BirthdayReport {
    pub date: NaiveDate,
    /// Clients whose birthday falls on `date`, greeted or not
    pub birthday_count: usize,
    /// Already greeted earlier this year
    pub skipped: usize,
    pub results: Vec<BirthdayResult>,
}

/// Daily birthday greeting run
#[derive(Clone)]
pub struct BirthdayJob {
    clients: Arc<dyn ClientRepository>,
    log: Arc<dyn EmailLogRepository>,
    notifier: Notifier,
    templates: EmailTemplates,
}

impl BirthdayJob {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        log: Arc<dyn EmailLogRepository>,
        notifier: Notifier,
        templates: EmailTemplates,
    ) -> Self {
        Self {
            clients,
            log,
            notifier,
            templates,
        }
    }

    /// Greet every client born on `today`'s month and day. A Feb 29
    /// birthday only matches in leap years. Each client is greeted at most
    /// once per calendar year, so re-running the same day is harmless.
    pub async fn run(&self, today: NaiveDate, now: DateTime<Utc>) -> Result<BirthdayReport, NotifyError> {
        let year = today.year();
        let celebrants: Vec<_> = self
            .clients
            .list_clients()
            .await?
            .into_iter()
            .filter(|c| is_birthday(c.dob, today))
            .collect();

        tracing::info!("Found {} clients with birthdays on {}", celebrants.len(), today);

        let mut report = BirthdayReport {
            date: today,
            birthday_count: celebrants.len(),
            skipped: 0,
            results: Vec::new(),
        };

        for client in &celebrants {
            if self.log.birthday_sent(&client.client_id, year).await? {
                tracing::debug!("Client {} already greeted in {}", client.client_id, year);
                report.skipped += 1;
                continue;
            }

            let message = self.templates.birthday(client);
            match self
                .notifier
                .send(&client.client_id, EmailType::Birthday, &message, now)
                .await
            {
                Ok(_) => {
                    self.log
                        .mark_birthday_sent(&client.client_id, client.dob, year)
                        .await?;
                    report.results.push(BirthdayResult {
                        client_id: client.client_id.clone(),
                        success: true,
                        error: None,
                    });
                }
                Err(e) => report.results.push(BirthdayResult {
                    client_id: client.client_id.clone(),
                    success: false,
                    error: Some(e.to_string()),
                }),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::tests::RecordingMailer;
    use chrono::{FixedOffset, TimeZone};
    use gym_core::{Client, Gender, RegistrationRequest, Service, ServiceSelection, Slot};
    use gym_store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn add_client(store: &MemoryStore, name: &str, email: &str, dob: NaiveDate) -> Client {
        let request = RegistrationRequest {
            name: name.to_string(),
            email: email.to_string(),
            mobile: "9000000003".to_string(),
            dob,
            gender: Gender::Male,
            address: String::new(),
            occupation: String::new(),
            slot: Slot::Morning,
            membership: ServiceSelection::of(&[Service::Cardio]),
            membership_period: 6,
            start_date: None,
            terms_accepted: true,
        };
        let id = store.allocate_client_id().await.unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 6, 0, 0).unwrap();
        let client = Client::register(id, request, now, FixedOffset::east_opt(330 * 60).unwrap()).unwrap();
        store.insert_client(&client).await.unwrap();
        client
    }

    fn job(store: &Arc<MemoryStore>, mailer: Arc<RecordingMailer>) -> BirthdayJob {
        let notifier = Notifier::new(mailer, store.clone());
        BirthdayJob::new(store.clone(), store.clone(), notifier, EmailTemplates::new("PowerFit Gym"))
    }

    #[tokio::test]
    async fn test_greets_matching_clients_once_per_year() {
        let store = Arc::new(MemoryStore::new());
        let arjun = add_client(&store, "Arjun", "arjun@example.com", date(1990, 6, 15)).await;
        add_client(&store, "Kiran", "kiran@example.com", date(1985, 6, 16)).await;

        let mailer = Arc::new(RecordingMailer::default());
        let job = job(&store, mailer.clone());

        let report = job.run(date(2024, 6, 15), Utc::now()).await.unwrap();
        assert_eq!(report.birthday_count, 1);
        assert_eq!(
            report.results,
            vec![BirthdayResult {
                client_id: arjun.client_id.clone(),
                success: true,
                error: None
            }]
        );
        assert_eq!(mailer.sent.lock().await[0].subject, "Happy Birthday Arjun!");

        // Same day again: nothing new is sent
        let rerun = job.run(date(2024, 6, 15), Utc::now()).await.unwrap();
        assert_eq!(rerun.birthday_count, 1);
        assert_eq!(rerun.skipped, 1);
        assert!(rerun.results.is_empty());
        assert_eq!(mailer.sent.lock().await.len(), 1);

        // Next year greets again
        let next_year = job.run(date(2025, 6, 15), Utc::now()).await.unwrap();
        assert_eq!(next_year.results.len(), 1);
        assert_eq!(store.list_emails(&arjun.client_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_leap_day_birthday_only_in_leap_years() {
        let store = Arc::new(MemoryStore::new());
        add_client(&store, "Leap", "leap@example.com", date(2000, 2, 29)).await;
        let job = job(&store, Arc::new(RecordingMailer::default()));

        assert_eq!(job.run(date(2023, 2, 28), Utc::now()).await.unwrap().birthday_count, 0);
        assert_eq!(job.run(date(2023, 3, 1), Utc::now()).await.unwrap().birthday_count, 0);
        assert_eq!(job.run(date(2024, 2, 29), Utc::now()).await.unwrap().birthday_count, 1);
    }

    #[tokio::test]
    async fn test_failed_delivery_is_reported_and_retried() {
        let store = Arc::new(MemoryStore::new());
        let client = add_client(&store, "Bounce", "bounce@example.com", date(1999, 9, 9)).await;
        let failing = Arc::new(RecordingMailer {
            reject: vec!["bounce@example.com".to_string()],
            ..Default::default()
        });

        let report = job(&store, failing).run(date(2024, 9, 9), Utc::now()).await.unwrap();
        assert_eq!(report.results.len(), 1);
        assert!(!report.results[0].success);
        assert!(report.results[0].error.as_deref().unwrap().contains("bounce@example.com"));
        assert!(!store.birthday_sent(&client.client_id, 2024).await.unwrap());

        // A later run with a working transport still greets the client
        let report = job(&store, Arc::new(RecordingMailer::default()))
            .run(date(2024, 9, 9), Utc::now())
            .await
            .unwrap();
        assert!(report.results[0].success);
    }
}
