/// Rupee amount with Indian digit grouping and no fraction digits:
/// `162100` -> `₹1,62,100`.
pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{}₹{}", sign, digits);
    }

    let (head, last3) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{}₹{},{}", sign, groups.join(","), last3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(100), "₹100");
        assert_eq!(format_inr(4600), "₹4,600");
        assert_eq!(format_inr(13500), "₹13,500");
        assert_eq!(format_inr(162100), "₹1,62,100");
        assert_eq!(format_inr(12345678), "₹1,23,45,678");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_inr(-480), "-₹480");
        assert_eq!(format_inr(-63470), "-₹63,470");
    }
}
