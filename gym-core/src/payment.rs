use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded instalment against a client's membership total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub client_id: String,
    /// Total due for the membership when this payment was taken
    pub amount: i64,
    pub paid_amount: i64,
    /// Balance left after this payment; negative on overpayment
    pub remaining_amount: i64,
    /// Discount percentage applied to the membership total
    pub discount: u8,
    pub discount_type: Option<String>,
    pub paid_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}
