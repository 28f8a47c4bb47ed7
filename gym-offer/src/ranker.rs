use crate::models::OfferCandidate;

/// Highest-percentage candidate; ties go to the first one listed.
pub fn best_offer(candidates: &[OfferCandidate]) -> Option<&OfferCandidate> {
    candidates.iter().fold(None, |best: Option<&OfferCandidate>, offer| match best {
        Some(b) if b.percentage >= offer.percentage => Some(b),
        _ => Some(offer),
    })
}

/// Largest percentage among the candidates, 0 when there are none
pub fn max_percentage(candidates: &[OfferCandidate]) -> u8 {
    candidates.iter().map(|o| o.percentage).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OfferKind;

    #[test]
    fn test_best_offer_picks_highest() {
        let offers = vec![
            OfferCandidate::new("Wednesday Special", 20, OfferKind::DayOfWeek),
            OfferCandidate::new("Yearly Membership", 25, OfferKind::Yearly),
            OfferCandidate::new("Gym + PT Combo", 30, OfferKind::Combo),
        ];
        assert_eq!(best_offer(&offers).unwrap().label, "Gym + PT Combo");
        assert_eq!(max_percentage(&offers), 30);
    }

    #[test]
    fn test_best_offer_tie_keeps_first() {
        let offers = vec![
            OfferCandidate::new("Saturday Special", 20, OfferKind::DayOfWeek),
            OfferCandidate::new("Other", 20, OfferKind::Duration),
        ];
        assert_eq!(best_offer(&offers).unwrap().label, "Saturday Special");
    }

    #[test]
    fn test_empty_candidates() {
        assert!(best_offer(&[]).is_none());
        assert_eq!(max_percentage(&[]), 0);
    }
}
