pub mod money;
pub mod templates;
pub mod mailer;
pub mod notifier;
pub mod birthday;
pub mod schedule;

pub use money::format_inr;
pub use templates::EmailTemplates;
pub use mailer::LogMailer;
pub use notifier::Notifier;
pub use birthday::{BirthdayJob, BirthdayReport, BirthdayResult};
pub use schedule::next_run_after;

use gym_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Mail delivery to {recipient} failed: {reason}")]
    Delivery { recipient: String, reason: String },

    #[error(transparent)]
    Store(#[from] CoreError),
}
