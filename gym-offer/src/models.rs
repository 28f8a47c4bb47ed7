use gym_catalog::PriceBreakdown;
use serde::{Deserialize, Serialize};

/// Offer family a candidate came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    DayOfWeek,
    Duration,
    Yearly,
    Combo,
}

/// A named percentage discount that may or may not be applied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfferCandidate {
    pub label: String,
    pub percentage: u8,
    pub kind: OfferKind,
}

impl OfferCandidate {
    pub fn new(label: impl Into<String>, percentage: u8, kind: OfferKind) -> Self {
        Self {
            label: label.into(),
            percentage,
            kind,
        }
    }
}

/// Result of the final price reduction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalPrice {
    pub final_price: i64,
    pub total_discount: u8,
}

/// Base price, the single applied percentage and what the client pays
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceQuote {
    pub base_price: i64,
    pub discount_percentage: u8,
    pub final_price: i64,
}

impl PriceQuote {
    pub fn discount_amount(&self) -> i64 {
        self.base_price - self.final_price
    }
}

/// Everything the checkout screen needs for one membership
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub breakdown: PriceBreakdown,
    pub day_offer: u8,
    /// Day offer first (when non-zero), then duration and combo offers
    pub candidates: Vec<OfferCandidate>,
    /// Highlight only; does not affect `price` unless selected
    pub best_offer: Option<OfferCandidate>,
    pub selected_offer: Option<u8>,
    pub price: PriceQuote,
}
