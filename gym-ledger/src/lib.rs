pub mod models;
pub mod manager;
pub mod finance;

pub use models::{BalanceStatus, BalanceSummary, NewPayment, RevenueReport};
pub use manager::{LedgerError, PaymentLedger};
pub use finance::revenue_report;
