pub mod calendar;
pub mod membership;
pub mod client;
pub mod payment;
pub mod email;
pub mod repository;

pub use membership::{Service, ServiceSelection};
pub use client::{Client, ClientUpdate, Gender, RegistrationRequest, Slot};
pub use payment::Payment;
pub use email::{EmailLogEntry, EmailMessage, EmailType, Mailer};
pub use repository::{ClientRepository, EmailLogRepository, PaymentRepository};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
