use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};

/// Next instant strictly after `now` at which the local wall clock reads
/// `hour:minute` in `offset`.
pub fn next_run_after(now: DateTime<Utc>, offset: FixedOffset, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    let at = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let local_now = now.with_timezone(&offset);

    let today = local_now.date_naive().and_time(at).and_local_timezone(offset).single()?;
    let next = if today > local_now {
        today
    } else {
        today + Duration::days(1)
    };
    Some(next.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    #[test]
    fn test_later_today() {
        // 2024-01-09 18:00 UTC = 23:30 IST
        let now = Utc.with_ymd_and_hms(2024, 1, 9, 18, 0, 0).unwrap();
        let next = next_run_after(now, ist(), 23, 45).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 9, 18, 15, 0).unwrap());

        // 00:02 IST the next day is 18:32 UTC the same day
        let next = next_run_after(now, ist(), 0, 2).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 9, 18, 32, 0).unwrap());
    }

    #[test]
    fn test_already_passed_rolls_to_tomorrow() {
        // 2024-01-10 06:00 UTC = 11:30 IST
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 6, 0, 0).unwrap();
        let next = next_run_after(now, ist(), 0, 2).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 10, 18, 32, 0).unwrap());
    }

    #[test]
    fn test_exact_time_is_not_rerun() {
        let now = Utc.with_ymd_and_hms(2024, 1, 9, 18, 32, 0).unwrap();
        let next = next_run_after(now, ist(), 0, 2).unwrap();
        assert_eq!(next - now, Duration::days(1));
    }

    #[test]
    fn test_invalid_time() {
        assert!(next_run_after(Utc::now(), ist(), 24, 0).is_none());
    }
}
