use chrono::{DateTime, FixedOffset, Utc};
use gym_core::{Client, Payment};
use gym_offer::{OfferKind, Quote, QuoteGenerator};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{BalanceStatus, BalanceSummary, NewPayment};

/// Largest single instalment accepted, in rupees (₹100 crore)
pub const MAX_INSTALMENT: i64 = 1_000_000_000;

/// Membership totals and payment bookkeeping
#[derive(Debug, Clone)]
pub struct PaymentLedger {
    quotes: Arc<QuoteGenerator>,
}

impl PaymentLedger {
    pub fn new(quotes: Arc<QuoteGenerator>) -> Self {
        Self { quotes }
    }

    /// The amount the client owes for the membership: the total settled at
    /// checkout if one was stored, otherwise the best duration/combo price.
    pub fn total_due(&self, client: &Client) -> i64 {
        client.final_amount.unwrap_or_else(|| {
            self.quotes
                .discounted_price(&client.membership, client.membership_period)
        })
    }

    pub fn summarize(&self, client: &Client, payments: &[Payment]) -> BalanceSummary {
        let total_due = self.total_due(client);
        let total_paid = payments
            .iter()
            .fold(0i64, |sum, p| sum.saturating_add(p.paid_amount));
        let remaining = total_due.saturating_sub(total_paid);

        let status = if remaining <= 0 {
            BalanceStatus::Settled
        } else if total_paid > 0 {
            BalanceStatus::Partial
        } else {
            BalanceStatus::Unpaid
        };

        BalanceSummary {
            client_id: client.client_id.clone(),
            total_due,
            total_paid,
            remaining,
            status,
            payment_count: payments.len(),
        }
    }

    /// Build the payment row for a new instalment. `previous` is the
    /// client's existing history; the row's remaining amount is what is
    /// still owed after this instalment.
    pub fn record(
        &self,
        client: &Client,
        previous: &[Payment],
        payment: NewPayment,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<Payment, LedgerError> {
        if payment.paid_amount <= 0 || payment.paid_amount > MAX_INSTALMENT {
            return Err(LedgerError::InvalidAmount(payment.paid_amount));
        }
        if let Some(discount) = payment.discount.filter(|d| *d > 100) {
            return Err(LedgerError::InvalidDiscount(discount));
        }
        if let Some(other) = previous.iter().find(|p| p.client_id != client.client_id) {
            return Err(LedgerError::ClientMismatch {
                expected: client.client_id.clone(),
                found: other.client_id.clone(),
            });
        }

        let balance = self.summarize(client, previous);

        Ok(Payment {
            id: Uuid::new_v4(),
            client_id: client.client_id.clone(),
            amount: balance.total_due,
            paid_amount: payment.paid_amount,
            remaining_amount: balance.remaining.saturating_sub(payment.paid_amount),
            discount: payment.discount.unwrap_or(0),
            discount_type: payment.discount_type,
            paid_date: payment
                .paid_date
                .unwrap_or_else(|| now.with_timezone(&offset).date_naive()),
            notes: payment.notes,
            created_at: now,
        })
    }

    /// Settle the client's total from `quote` and, when `paid_amount` is
    /// positive, record an instalment against it. `previous` is any history
    /// taken before checkout; it counts towards the settled total.
    pub fn checkout(
        &self,
        client: &mut Client,
        previous: &[Payment],
        quote: &Quote,
        paid_amount: i64,
        notes: String,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<Option<Payment>, LedgerError> {
        if paid_amount < 0 {
            return Err(LedgerError::InvalidAmount(paid_amount));
        }

        client.final_amount = Some(quote.price.final_price);
        client.updated_at = now;

        if paid_amount == 0 {
            return Ok(None);
        }

        let applied = quote.price.discount_percentage;
        let matching: Vec<_> = quote
            .candidates
            .iter()
            .filter(|c| c.percentage == applied && applied > 0)
            .collect();
        // A selection that ties the day offer is labelled as the selected offer
        let discount_type = matching
            .iter()
            .find(|c| quote.selected_offer != Some(applied) || c.kind != OfferKind::DayOfWeek)
            .or_else(|| matching.first())
            .map(|c| c.label.clone());

        let payment = NewPayment {
            paid_amount,
            paid_date: None,
            notes,
            discount: Some(applied),
            discount_type,
        };
        self.record(client, previous, payment, now, offset).map(Some)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Payment amount must be between 1 and 1000000000, got {0}")]
    InvalidAmount(i64),

    #[error("Discount must be at most 100%, got {0}")]
    InvalidDiscount(u8),

    #[error("Payment history for client {found} passed for client {expected}")]
    ClientMismatch { expected: String, found: String },
}
