use chrono::FixedOffset;
use gym_core::{ClientRepository, EmailLogRepository, Mailer, PaymentRepository};
use gym_ledger::PaymentLedger;
use gym_notify::{BirthdayJob, EmailTemplates, Notifier};
use gym_offer::{OfferError, QuoteGenerator};
use gym_shared::Masked;
use gym_store::Config;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthConfig {
    pub admin_username: String,
    pub admin_password: Masked<String>,
    pub secret: Masked<String>,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<dyn ClientRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub emails: Arc<dyn EmailLogRepository>,
    pub quotes: Arc<QuoteGenerator>,
    pub ledger: PaymentLedger,
    pub notifier: Notifier,
    pub templates: EmailTemplates,
    pub birthdays: BirthdayJob,
    pub auth: AuthConfig,
    /// Gym-local timezone; all calendar dates are taken in it
    pub offset: FixedOffset,
}

impl AppState {
    /// Wire the services over one store that backs every repository.
    pub fn from_config<S>(config: &Config, store: Arc<S>, mailer: Arc<dyn Mailer>) -> Result<Self, OfferError>
    where
        S: ClientRepository + PaymentRepository + EmailLogRepository + 'static,
    {
        let quotes = Arc::new(QuoteGenerator::from_tables(
            config.pricing.prices.clone(),
            config.pricing.offers.clone(),
        )?);
        let templates = EmailTemplates::new(config.gym.name.clone());
        let notifier = Notifier::new(mailer, store.clone());
        let birthdays = BirthdayJob::new(store.clone(), store.clone(), notifier.clone(), templates.clone());

        Ok(Self {
            clients: store.clone(),
            payments: store.clone(),
            emails: store,
            ledger: PaymentLedger::new(quotes.clone()),
            quotes,
            notifier,
            templates,
            birthdays,
            auth: AuthConfig {
                admin_username: config.auth.admin_username.clone(),
                admin_password: config.auth.admin_password.clone(),
                secret: config.auth.jwt_secret.clone(),
                expiration: config.auth.jwt_expiration_seconds,
            },
            offset: config.offset(),
        })
    }

    /// Today's date in the gym's timezone
    pub fn today(&self) -> chrono::NaiveDate {
        chrono::Utc::now().with_timezone(&self.offset).date_naive()
    }
}
