use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a client's account stands against the membership total
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalanceStatus {
    Unpaid,
    Partial,
    Settled,
}

/// An instalment as entered at the front desk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPayment {
    pub paid_amount: i64,
    /// Defaults to today in the gym's timezone
    pub paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub discount: Option<u8>,
    pub discount_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceSummary {
    pub client_id: String,
    pub total_due: i64,
    pub total_paid: i64,
    /// Negative when the client has overpaid
    pub remaining: i64,
    pub status: BalanceStatus,
    pub payment_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevenueReport {
    pub generated_at: DateTime<Utc>,
    pub clients: usize,
    pub total_due: i64,
    pub total_collected: i64,
    /// Sum of positive balances only
    pub total_outstanding: i64,
    pub settled_clients: usize,
    pub partial_clients: usize,
    pub unpaid_clients: usize,
}
