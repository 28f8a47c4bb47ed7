use chrono::{Datelike, NaiveDate, Weekday};
use gym_core::calendar::{display_weekday, parse_weekday, weekday_name};
use gym_core::{Service, ServiceSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::generator::OfferError;
use crate::models::{OfferCandidate, OfferKind};

/// Durations at or above this use the yearly rule instead of the table
pub const YEARLY_MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationOffer {
    pub months: u32,
    pub percentage: u8,
}

/// The discount rule tables. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRules {
    /// Lowercase weekday name -> percentage; missing days give no offer
    pub day_offers: BTreeMap<String, u8>,
    /// Offers for 1..=11 month memberships
    pub duration_offers: Vec<DurationOffer>,
    pub yearly_membership: u8,
    pub gym_pt_combo: u8,
}

impl Default for OfferRules {
    fn default() -> Self {
        let day_offers = [
            ("monday", 10),
            ("tuesday", 15),
            ("wednesday", 20),
            ("thursday", 10),
            ("friday", 15),
            ("saturday", 20),
            ("sunday", 0),
        ]
        .into_iter()
        .map(|(day, pct)| (day.to_string(), pct))
        .collect();

        let duration_offers = [5, 7, 10, 12, 12, 15, 17, 17, 17, 17, 17]
            .into_iter()
            .zip(1..)
            .map(|(percentage, months)| DurationOffer { months, percentage })
            .collect();

        Self {
            day_offers,
            duration_offers,
            yearly_membership: 25,
            gym_pt_combo: 30,
        }
    }
}

impl OfferRules {
    pub fn validate(&self) -> Result<(), OfferError> {
        for (day, pct) in &self.day_offers {
            if parse_weekday(day).is_none() {
                return Err(OfferError::InvalidRule(format!("unknown weekday '{}'", day)));
            }
            check_percentage(&format!("{} offer", day), *pct)?;
        }
        for offer in &self.duration_offers {
            if offer.months == 0 || offer.months >= YEARLY_MONTHS {
                return Err(OfferError::InvalidRule(format!(
                    "duration offer for {} months is outside 1..={}",
                    offer.months,
                    YEARLY_MONTHS - 1
                )));
            }
            check_percentage(&format!("{} month offer", offer.months), offer.percentage)?;
        }
        check_percentage("yearly offer", self.yearly_membership)?;
        check_percentage("combo offer", self.gym_pt_combo)?;
        Ok(())
    }

    pub fn day_offer_for(&self, day: Weekday) -> u8 {
        self.day_offers.get(weekday_name(day)).copied().unwrap_or(0)
    }

    /// Day-of-week offer for a local calendar date
    pub fn day_offer(&self, date: NaiveDate) -> u8 {
        self.day_offer_for(date.weekday())
    }

    /// Day offer as a candidate, `None` when the day carries no offer
    pub fn day_candidate(&self, date: NaiveDate) -> Option<OfferCandidate> {
        let pct = self.day_offer(date);
        (pct > 0).then(|| {
            OfferCandidate::new(
                format!("{} Special", display_weekday(date.weekday())),
                pct,
                OfferKind::DayOfWeek,
            )
        })
    }

    /// Table percentage for 1..=11 months; 0 for anything else
    pub fn duration_offer(&self, months: u32) -> u8 {
        if months >= YEARLY_MONTHS {
            return 0;
        }
        self.duration_offers
            .iter()
            .find(|o| o.months == months)
            .map(|o| o.percentage)
            .unwrap_or(0)
    }

    /// Duration, yearly and combo candidates, in that order. Every
    /// matching rule is collected; exclusivity is decided at reduction.
    pub fn special_offers(&self, selection: &ServiceSelection, months: u32) -> Vec<OfferCandidate> {
        let mut offers = Vec::new();

        let duration = self.duration_offer(months);
        if duration > 0 {
            let plural = if months > 1 { "s" } else { "" };
            offers.push(OfferCandidate::new(
                format!("{} Month{} Membership", months, plural),
                duration,
                OfferKind::Duration,
            ));
        }

        if months >= YEARLY_MONTHS {
            offers.push(OfferCandidate::new(
                "Yearly Membership",
                self.yearly_membership,
                OfferKind::Yearly,
            ));
        }

        if selection.contains(Service::Gym) && selection.contains(Service::PersonalTraining) {
            offers.push(OfferCandidate::new(
                "Gym + PT Combo",
                self.gym_pt_combo,
                OfferKind::Combo,
            ));
        }

        offers
    }
}

fn check_percentage(what: &str, pct: u8) -> Result<(), OfferError> {
    if pct > 100 {
        return Err(OfferError::InvalidRule(format!("{} is {}%, above 100%", what, pct)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_offers() {
        let rules = OfferRules::default();
        // 2024-01-07 Sunday, 2024-01-08 Monday, 2024-01-10 Wednesday
        assert_eq!(rules.day_offer(date(2024, 1, 7)), 0);
        assert_eq!(rules.day_offer(date(2024, 1, 8)), 10);
        assert_eq!(rules.day_offer(date(2024, 1, 10)), 20);
        assert_eq!(rules.day_offer_for(Weekday::Sat), 20);
    }

    #[test]
    fn test_missing_day_defaults_to_zero() {
        let mut rules = OfferRules::default();
        rules.day_offers.remove("friday");
        assert_eq!(rules.day_offer_for(Weekday::Fri), 0);
    }

    #[test]
    fn test_day_candidate() {
        let rules = OfferRules::default();
        let candidate = rules.day_candidate(date(2024, 1, 10)).unwrap();
        assert_eq!(candidate.label, "Wednesday Special");
        assert_eq!(candidate.percentage, 20);
        assert!(rules.day_candidate(date(2024, 1, 7)).is_none());
    }

    #[test]
    fn test_duration_table() {
        let rules = OfferRules::default();
        assert_eq!(rules.duration_offer(0), 0);
        assert_eq!(rules.duration_offer(1), 5);
        assert_eq!(rules.duration_offer(6), 15);
        assert_eq!(rules.duration_offer(11), 17);
        assert_eq!(rules.duration_offer(12), 0);
        assert_eq!(rules.duration_offer(36), 0);
    }

    #[test]
    fn test_special_offer_labels() {
        let rules = OfferRules::default();
        let gym = ServiceSelection::of(&[Service::Gym]);

        let one = rules.special_offers(&gym, 1);
        assert_eq!(one, vec![OfferCandidate::new("1 Month Membership", 5, OfferKind::Duration)]);

        let six = rules.special_offers(&gym, 6);
        assert_eq!(six[0].label, "6 Months Membership");
        assert_eq!(six[0].percentage, 15);
    }

    #[test]
    fn test_yearly_replaces_duration_table() {
        let rules = OfferRules::default();
        let gym = ServiceSelection::of(&[Service::Gym]);
        let offers = rules.special_offers(&gym, 12);
        assert_eq!(offers, vec![OfferCandidate::new("Yearly Membership", 25, OfferKind::Yearly)]);
        assert_eq!(rules.special_offers(&gym, 18).len(), 1);
    }

    #[test]
    fn test_combo_present_iff_gym_and_pt() {
        let rules = OfferRules::default();
        let combo = ServiceSelection::of(&[Service::Gym, Service::PersonalTraining]);
        let pt_only = ServiceSelection::of(&[Service::PersonalTraining, Service::Cardio]);

        for months in [0, 1, 6, 12, 24] {
            let offers = rules.special_offers(&combo, months);
            let found = offers.iter().find(|o| o.kind == OfferKind::Combo).unwrap();
            assert_eq!(found.percentage, 30);
            assert_eq!(found.label, "Gym + PT Combo");

            assert!(rules
                .special_offers(&pt_only, months)
                .iter()
                .all(|o| o.kind != OfferKind::Combo));
        }
    }

    #[test]
    fn test_no_candidates_for_zero_months_without_combo() {
        let rules = OfferRules::default();
        let gym = ServiceSelection::of(&[Service::Gym, Service::Cardio]);
        assert!(rules.special_offers(&gym, 0).is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        assert!(OfferRules::default().validate().is_ok());

        let mut rules = OfferRules::default();
        rules.gym_pt_combo = 120;
        assert!(rules.validate().is_err());

        let mut rules = OfferRules::default();
        rules.day_offers.insert("caturday".to_string(), 5);
        assert!(rules.validate().is_err());

        let mut rules = OfferRules::default();
        rules.duration_offers.push(DurationOffer { months: 12, percentage: 5 });
        assert!(rules.validate().is_err());
    }
}
