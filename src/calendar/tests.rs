#![allow(clippy::unwrap_used)]

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

// ── last_day_of_month ─────────────────────────────────────────

#[test]
fn test_last_day_leap_february() {
    assert_eq!(last_day_of_month(2024, 2), 29);
    assert_eq!(last_day_of_month(2023, 2), 28);
}

#[test]
fn test_last_day_century_rules() {
    assert_eq!(last_day_of_month(1900, 2), 28);
    assert_eq!(last_day_of_month(2000, 2), 29);
}

#[test]
fn test_last_day_thirty_and_thirty_one() {
    assert_eq!(last_day_of_month(2024, 1), 31);
    assert_eq!(last_day_of_month(2024, 4), 30);
    assert_eq!(last_day_of_month(2024, 9), 30);
    assert_eq!(last_day_of_month(2024, 12), 31);
}

// ── month_window ──────────────────────────────────────────────

#[test]
fn test_month_window_previous_month_wraps_year() {
    let window = month_window(date(2024, 1, 20), -1);
    assert_eq!(window, ym(2023, 12));
}

#[test]
fn test_month_window_next_month_wraps_year() {
    assert_eq!(month_window(date(2023, 12, 31), 1), ym(2024, 1));
}

#[test]
fn test_month_window_zero_offset() {
    assert_eq!(month_window(date(2024, 6, 30), 0), ym(2024, 6));
}

#[test]
fn test_month_window_multi_year() {
    assert_eq!(month_window(date(2024, 3, 1), -15), ym(2022, 12));
    assert_eq!(month_window(date(2024, 3, 1), 22), ym(2026, 1));
}

#[test]
fn test_month_window_from_month_end_keeps_month() {
    // Offsetting from the 31st must not spill over via day clamping
    assert_eq!(month_window(date(2024, 1, 31), 1), ym(2024, 2));
    assert_eq!(month_window(date(2024, 3, 31), -1), ym(2024, 2));
}

// ── YearMonth ─────────────────────────────────────────────────

#[test]
fn test_year_month_rejects_invalid_month() {
    assert!(YearMonth::new(2024, 0).is_none());
    assert!(YearMonth::new(2024, 13).is_none());
}

#[test]
fn test_year_month_of_date() {
    let m = YearMonth::of(date(2024, 7, 19));
    assert_eq!(m.year(), 2024);
    assert_eq!(m.month(), 7);
    assert_eq!(m.first_day(), date(2024, 7, 1));
}

#[test]
fn test_day_clamps_to_month_end() {
    assert_eq!(ym(2024, 2).day(31), date(2024, 2, 29));
    assert_eq!(ym(2023, 2).day(30), date(2023, 2, 28));
    assert_eq!(ym(2024, 4).day(31), date(2024, 4, 30));
}

#[test]
fn test_day_inside_month_is_unchanged() {
    assert_eq!(ym(2024, 4).day(1), date(2024, 4, 1));
    assert_eq!(ym(2024, 1).day(31), date(2024, 1, 31));
}

#[test]
fn test_contains() {
    let m = ym(2024, 3);
    assert!(m.contains(date(2024, 3, 1)));
    assert!(m.contains(date(2024, 3, 31)));
    assert!(!m.contains(date(2024, 4, 1)));
    assert!(!m.contains(date(2023, 3, 15)));
}

#[test]
fn test_display_and_parse() {
    assert_eq!(ym(2024, 4).to_string(), "2024-04");
    assert_eq!("2024-04".parse::<YearMonth>().unwrap(), ym(2024, 4));
    assert_eq!(" 2023-12 ".parse::<YearMonth>().unwrap(), ym(2023, 12));
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("April".parse::<YearMonth>().is_err());
    assert!("2024-13".parse::<YearMonth>().is_err());
    assert!("".parse::<YearMonth>().is_err());
}

#[test]
fn test_ordering_follows_calendar() {
    assert!(ym(2023, 12) < ym(2024, 1));
    assert!(ym(2024, 2) < ym(2024, 10));
}

// ── month_name / trailing_months ──────────────────────────────

#[test]
fn test_month_name() {
    assert_eq!(month_name(1), "January");
    assert_eq!(month_name(12), "December");
    assert_eq!(month_name(0), "");
    assert_eq!(month_name(13), "");
    assert_eq!(ym(2024, 4).name(), "April");
}

#[test]
fn test_trailing_months_oldest_first() {
    let months = trailing_months(ym(2024, 2), 6);
    let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
    assert_eq!(
        labels,
        ["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02"]
    );
}

#[test]
fn test_trailing_months_empty() {
    assert!(trailing_months(ym(2024, 2), 0).is_empty());
}

#[test]
fn test_trailing_months_follow_month_window() {
    let months = trailing_months(ym(2024, 1), 3);
    assert_eq!(months[0], month_window(date(2024, 1, 31), -2));
    assert_eq!(months[1], month_window(date(2024, 1, 1), -1));
    assert_eq!(months[2], ym(2024, 1));
}

#[test]
fn test_year_month_serializes_as_text() {
    assert_eq!(serde_json::to_value(ym(2024, 4)).unwrap(), "2024-04");
}
