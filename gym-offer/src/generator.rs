use chrono::NaiveDate;
use gym_catalog::{PriceTable, PricingEngine};
use gym_core::ServiceSelection;

use crate::discount::{apply_discount, calculate_final_price};
use crate::models::{OfferCandidate, PriceQuote, Quote};
use crate::ranker::{best_offer, max_percentage};
use crate::rules::OfferRules;

/// Builds quotes from the price table and offer rules
#[derive(Debug, Clone, Default)]
pub struct QuoteGenerator {
    pricing_engine: PricingEngine,
    rules: OfferRules,
}

impl QuoteGenerator {
    pub fn new(pricing_engine: PricingEngine, rules: OfferRules) -> Self {
        Self {
            pricing_engine,
            rules,
        }
    }

    /// Validates both tables before building the generator
    pub fn from_tables(prices: PriceTable, rules: OfferRules) -> Result<Self, OfferError> {
        prices
            .validate()
            .map_err(|e| OfferError::InvalidRule(e.to_string()))?;
        rules.validate()?;
        Ok(Self::new(PricingEngine::new(prices), rules))
    }

    pub fn pricing_engine(&self) -> &PricingEngine {
        &self.pricing_engine
    }

    pub fn rules(&self) -> &OfferRules {
        &self.rules
    }

    pub fn base_price(&self, selection: &ServiceSelection, months: u32) -> i64 {
        self.pricing_engine.base_price(selection, months)
    }

    /// Every offer the client can choose from: the day offer (if any)
    /// followed by duration, yearly and combo offers.
    pub fn candidates(
        &self,
        selection: &ServiceSelection,
        months: u32,
        registration_date: NaiveDate,
    ) -> Vec<OfferCandidate> {
        let mut candidates: Vec<OfferCandidate> = self.rules.day_candidate(registration_date).into_iter().collect();
        candidates.extend(self.rules.special_offers(selection, months));
        candidates
    }

    /// Full quote. `selected_offer` must be one of the candidate percentages.
    pub fn quote(
        &self,
        selection: &ServiceSelection,
        months: u32,
        registration_date: NaiveDate,
        selected_offer: Option<u8>,
    ) -> Result<Quote, OfferError> {
        let candidates = self.candidates(selection, months, registration_date);

        if let Some(selected) = selected_offer {
            if !candidates.iter().any(|c| c.percentage == selected) {
                return Err(OfferError::UnknownOffer(selected));
            }
        }

        let breakdown = self.pricing_engine.breakdown(selection, months);
        let base_price = breakdown.subtotal;
        let day_offer = self.rules.day_offer(registration_date);
        let result = calculate_final_price(base_price, day_offer, selected_offer);

        Ok(Quote {
            best_offer: best_offer(&candidates).cloned(),
            breakdown,
            day_offer,
            candidates,
            selected_offer,
            price: PriceQuote {
                base_price,
                discount_percentage: result.total_discount,
                final_price: result.final_price,
            },
        })
    }

    /// Re-derive a settled total without a date or an explicit selection:
    /// base price less the best duration/combo offer. Day offers are ignored.
    pub fn discounted_price(&self, selection: &ServiceSelection, months: u32) -> i64 {
        let base_price = self.base_price(selection, months);
        let best = max_percentage(&self.rules.special_offers(selection, months));
        apply_discount(base_price, best)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfferError {
    #[error("Selected offer of {0}% is not available for this membership")]
    UnknownOffer(u8),

    #[error("Invalid offer configuration: {0}")]
    InvalidRule(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OfferKind;
    use gym_core::Service;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
    }

    #[test]
    fn test_end_to_end_gym_pt_yearly_on_wednesday() {
        let generator = QuoteGenerator::default();
        let selection = ServiceSelection::of(&[Service::Gym, Service::PersonalTraining]);

        let quote = generator.quote(&selection, 12, wednesday(), None).unwrap();
        assert_eq!(quote.price.base_price, 162100);
        assert_eq!(quote.day_offer, 20);
        assert_eq!(
            quote.candidates.iter().map(|c| (c.kind, c.percentage)).collect::<Vec<_>>(),
            vec![(OfferKind::DayOfWeek, 20), (OfferKind::Yearly, 25), (OfferKind::Combo, 30)]
        );
        assert_eq!(quote.best_offer.as_ref().unwrap().percentage, 30);
        // Without a selection only the day offer applies
        assert_eq!(quote.price.discount_percentage, 20);
        assert_eq!(quote.price.final_price, 129680);

        let quote = generator.quote(&selection, 12, wednesday(), Some(30)).unwrap();
        assert_eq!(quote.price.discount_percentage, 30);
        assert_eq!(quote.price.final_price, 113470);
        assert_eq!(quote.price.discount_amount(), 48630);
    }

    #[test]
    fn test_selecting_a_non_best_offer_is_allowed() {
        let generator = QuoteGenerator::default();
        let selection = ServiceSelection::of(&[Service::Gym, Service::PersonalTraining]);

        let quote = generator.quote(&selection, 12, wednesday(), Some(25)).unwrap();
        assert_eq!(quote.best_offer.unwrap().percentage, 30);
        assert_eq!(quote.price.discount_percentage, 25);
    }

    #[test]
    fn test_selection_below_day_offer_keeps_day_offer() {
        let generator = QuoteGenerator::default();
        let gym = ServiceSelection::of(&[Service::Gym]);

        // 1 month on a Wednesday: duration 5% loses to the 20% day offer
        let quote = generator.quote(&gym, 1, wednesday(), Some(5)).unwrap();
        assert_eq!(quote.price.discount_percentage, 20);
        assert_eq!(quote.price.final_price, 1280);
    }

    #[test]
    fn test_unknown_selection_rejected() {
        let generator = QuoteGenerator::default();
        let gym = ServiceSelection::of(&[Service::Gym]);
        assert_eq!(
            generator.quote(&gym, 3, sunday(), Some(30)),
            Err(OfferError::UnknownOffer(30))
        );
    }

    #[test]
    fn test_sunday_has_no_day_candidate() {
        let generator = QuoteGenerator::default();
        let gym = ServiceSelection::of(&[Service::Gym]);
        let quote = generator.quote(&gym, 3, sunday(), None).unwrap();

        assert_eq!(quote.candidates.len(), 1);
        assert_eq!(quote.candidates[0].label, "3 Months Membership");
        assert_eq!(quote.price.final_price, quote.price.base_price);
    }

    #[test]
    fn test_discounted_price_uses_best_special_offer() {
        let generator = QuoteGenerator::default();
        let gym = ServiceSelection::of(&[Service::Gym]);
        // 4600 less 10%
        assert_eq!(generator.discounted_price(&gym, 3), 4140);

        let combo = ServiceSelection::of(&[Service::Gym, Service::PersonalTraining]);
        assert_eq!(generator.discounted_price(&combo, 12), 113470);
        // Combo 30% beats the 6-month 15%
        assert_eq!(generator.discounted_price(&combo, 6), apply_discount(100 + 6 * 13500, 30));
    }

    #[test]
    fn test_discounted_price_without_offers_is_base() {
        let generator = QuoteGenerator::default();
        let gym = ServiceSelection::of(&[Service::Gym]);
        assert_eq!(generator.discounted_price(&gym, 0), 100);
    }

    #[test]
    fn test_discounted_price_is_idempotent() {
        let generator = QuoteGenerator::default();
        let selection = ServiceSelection::of(&[Service::Cardio, Service::Crossfit]);
        let first = generator.discounted_price(&selection, 7);
        let second = generator.discounted_price(&selection, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_tables_validates() {
        let mut rules = OfferRules::default();
        rules.yearly_membership = 101;
        assert!(QuoteGenerator::from_tables(PriceTable::default(), rules).is_err());
        assert!(QuoteGenerator::from_tables(PriceTable::default(), OfferRules::default()).is_ok());
    }
}
