// src/domain/date_key.rs

//! YYYYMMDD 形式の日付キー

use chrono::{Datelike, Duration, NaiveDate, Utc};

/// 日付キー = int(full_date.strftime("%Y%m%d"))
pub fn date_key_of(date: NaiveDate) -> i32 {
    date.year() * 10_000 + date.month() as i32 * 100 + date.day() as i32
}

/// 日付キーを暦日に戻す。存在しない日付は None
pub fn date_from_key(key: i32) -> Option<NaiveDate> {
    if key <= 0 {
        return None;
    }
    let year = key / 10_000;
    let month = (key / 100 % 100) as u32;
    let day = (key % 100) as u32;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// "YYYY-MM-DD" 表記
pub fn format_date_key(key: i32) -> Option<String> {
    date_from_key(key).map(|d| d.format("%Y-%m-%d").to_string())
}

/// ISO曜日（1=月曜 … 7=日曜）で土日か
pub fn is_weekend_day(day_of_week: i32) -> bool {
    day_of_week == 6 || day_of_week == 7
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn today_key() -> i32 {
    date_key_of(today())
}

/// n日前の日付キー
pub fn days_before(date: NaiveDate, days: i64) -> i32 {
    date_key_of(date - Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_matches_strftime() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(date_key_of(date), 20250201);
        assert_eq!(
            date_key_of(date).to_string(),
            date.format("%Y%m%d").to_string()
        );
    }

    #[test]
    fn test_date_from_key_roundtrip_and_invalid() {
        assert_eq!(
            date_from_key(20241231),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
        assert_eq!(date_from_key(20250230), None);
        assert_eq!(date_from_key(0), None);
    }

    #[test]
    fn test_format_date_key() {
        assert_eq!(format_date_key(20250105).as_deref(), Some("2025-01-05"));
        assert_eq!(format_date_key(99), None);
    }

    #[test]
    fn test_weekend_convention() {
        assert!(!is_weekend_day(1));
        assert!(!is_weekend_day(5));
        assert!(is_weekend_day(6));
        assert!(is_weekend_day(7));
    }

    #[test]
    fn test_days_before_crosses_month() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(days_before(date, 7), 20250224);
    }
}
