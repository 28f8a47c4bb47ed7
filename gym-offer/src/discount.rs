use crate::models::FinalPrice;

/// `base x pct / 100`, rounded half-up to a whole unit. `pct` is capped
/// at 100 so a discount never exceeds the base.
pub fn discount_amount(base_price: i64, percentage: u8) -> i64 {
    let pct = i64::from(percentage.min(100));
    (base_price * pct + 50).div_euclid(100)
}

pub fn apply_discount(base_price: i64, percentage: u8) -> i64 {
    base_price - discount_amount(base_price, percentage)
}

/// Reduce the base price by the single best of the automatic day offer and
/// the caller's selected offer. Offers never stack.
pub fn calculate_final_price(base_price: i64, day_offer: u8, selected_offer: Option<u8>) -> FinalPrice {
    let total_discount = match selected_offer {
        Some(selected) => day_offer.max(selected),
        None => day_offer,
    };

    FinalPrice {
        final_price: apply_discount(base_price, total_discount),
        total_discount,
    }
}
