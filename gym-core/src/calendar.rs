use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::{CoreError, CoreResult};

/// Weekday names indexed Sunday-first (0 = sunday .. 6 = saturday).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Lowercase weekday name for a calendar date's weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let lower = name.trim().to_ascii_lowercase();
    let index = WEEKDAY_NAMES.iter().position(|n| *n == lower)?;
    // Weekday::try_from counts Monday-first
    Some(match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    })
}

/// "wednesday" -> "Wednesday"
pub fn display_weekday(day: Weekday) -> String {
    let name = weekday_name(day);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Membership end date: calendar-month addition, clamped to the last day
/// of the target month (Jan 31 + 1 month = Feb 28/29).
pub fn end_date(start: NaiveDate, months: u32) -> CoreResult<NaiveDate> {
    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| CoreError::ValidationError(format!("end date out of range for {} + {} months", start, months)))
}

/// Age in whole years on `today`.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// True when `dob` falls on the same month and day as `today`.
pub fn is_birthday(dob: NaiveDate, today: NaiveDate) -> bool {
    dob.month() == today.month() && dob.day() == today.day()
}

/// Serde adapter storing a `Weekday` as its lowercase name.
pub mod weekday_serde {
    use chrono::Weekday;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(super::weekday_name(*day))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Weekday, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_weekday(&raw).ok_or_else(|| D::Error::custom(format!("unknown weekday: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_names_are_sunday_first() {
        assert_eq!(weekday_name(Weekday::Sun), "sunday");
        assert_eq!(weekday_name(Weekday::Wed), "wednesday");
        assert_eq!(weekday_name(Weekday::Sat), "saturday");
        // 2024-01-03 was a Wednesday
        assert_eq!(weekday_name(date(2024, 1, 3).weekday()), "wednesday");
    }

    #[test]
    fn test_parse_weekday() {
        for day in [Weekday::Sun, Weekday::Mon, Weekday::Thu, Weekday::Sat] {
            assert_eq!(parse_weekday(weekday_name(day)), Some(day));
        }
        assert_eq!(parse_weekday(" Friday "), Some(Weekday::Fri));
        assert_eq!(parse_weekday("funday"), None);
        assert_eq!(display_weekday(Weekday::Tue), "Tuesday");
    }

    #[test]
    fn test_end_date_clamps_to_month_end() {
        assert_eq!(end_date(date(2024, 1, 15), 3).unwrap(), date(2024, 4, 15));
        assert_eq!(end_date(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(end_date(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
        assert_eq!(end_date(date(2024, 3, 10), 12).unwrap(), date(2025, 3, 10));
    }

    #[test]
    fn test_age_on_before_and_after_birthday() {
        let dob = date(1995, 6, 20);
        assert_eq!(age_on(dob, date(2024, 6, 19)), 28);
        assert_eq!(age_on(dob, date(2024, 6, 20)), 29);
        assert_eq!(age_on(dob, date(2024, 12, 1)), 29);
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_is_birthday_ignores_year() {
        assert!(is_birthday(date(1990, 3, 14), date(2024, 3, 14)));
        assert!(!is_birthday(date(1990, 3, 14), date(2024, 3, 15)));
    }
}
