//! Date and number formatting shared by the pages.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};

/// Coarse "how long ago" label used by the sent feedback list.
pub fn relative_date(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - at).num_days();
    match days {
        i64::MIN..=0 => "今日".to_string(),
        1 => "昨日".to_string(),
        2..=6 => format!("{days}日前"),
        7..=29 => format!("{}週間前", days / 7),
        30..=364 => format!("{}ヶ月前", days / 30),
        _ => format!("{}年前", days / 365),
    }
}

/// Hour-granular label used by the dashboard.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - at).num_hours().max(0);
    if hours < 24 {
        format!("{hours}時間前")
    } else {
        format!("{}日前", hours / 24)
    }
}

/// `2024年6月1日 21:00` in the given zone.
pub fn format_datetime_in<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String {
    let local = at.with_timezone(tz);
    format!(
        "{}年{}月{}日 {:02}:{:02}",
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute()
    )
}

/// [`format_datetime_in`] for Japan Standard Time, the app's display zone.
pub fn format_datetime(at: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(9 * 3600) {
        Some(jst) => format_datetime_in(at, &jst),
        None => format_datetime_in(at, &Utc),
    }
}

/// `1234567` -> `1,234,567`.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_date() {
        assert_eq!(relative_date(now() - Duration::hours(3), now()), "今日");
        assert_eq!(relative_date(now() - Duration::days(1), now()), "昨日");
        assert_eq!(relative_date(now() - Duration::days(3), now()), "3日前");
        assert_eq!(relative_date(now() - Duration::days(7), now()), "1週間前");
        assert_eq!(relative_date(now() - Duration::days(29), now()), "4週間前");
        assert_eq!(relative_date(now() - Duration::days(45), now()), "1ヶ月前");
        assert_eq!(relative_date(now() - Duration::days(800), now()), "2年前");
        assert_eq!(relative_date(now() + Duration::hours(1), now()), "今日");
    }

    #[test]
    fn test_relative_time() {
        assert_eq!(relative_time(now() - Duration::hours(2), now()), "2時間前");
        assert_eq!(relative_time(now() - Duration::hours(23), now()), "23時間前");
        assert_eq!(relative_time(now() - Duration::hours(24), now()), "1日前");
        assert_eq!(relative_time(now() - Duration::days(3), now()), "3日前");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime_in(now(), &Utc), "2024年6月1日 12:00");
        assert_eq!(format_datetime(now()), "2024年6月1日 21:00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
