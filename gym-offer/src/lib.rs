pub mod models;
pub mod rules;
pub mod discount;
pub mod ranker;
pub mod generator;

pub use models::{FinalPrice, OfferCandidate, OfferKind, PriceQuote, Quote};
pub use rules::{DurationOffer, OfferRules};
pub use discount::{apply_discount, calculate_final_price, discount_amount};
pub use ranker::{best_offer, max_percentage};
pub use generator::{OfferError, QuoteGenerator};
