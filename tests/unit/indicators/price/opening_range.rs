//! Unit tests for the opening-range high

use chrono::NaiveTime;
use chrono::TimeZone;
use chrono_tz::Asia::Kolkata;
use tapescan::indicators::price::opening_range_high;
use tapescan::models::Bar;

fn session_bar(hour: u32, minute: u32, high: f64) -> Bar {
    let timestamp = Kolkata
        .with_ymd_and_hms(2026, 3, 4, hour, minute, 0)
        .single()
        .expect("valid venue time")
        .with_timezone(&chrono::Utc);
    Bar::new(high - 1.0, high, high - 2.0, high - 0.5, 1000.0, timestamp)
}

fn open() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 15, 0).expect("valid time")
}

#[test]
fn test_opening_range_takes_max_within_window() {
    let bars = vec![
        session_bar(9, 15, 101.0),
        session_bar(9, 30, 104.0),
        session_bar(9, 40, 102.0),
        session_bar(10, 0, 110.0),
    ];
    let high = opening_range_high(&bars, Kolkata, open(), 30);
    assert_eq!(high, Some(104.0));
}

#[test]
fn test_opening_range_window_end_is_exclusive() {
    let bars = vec![session_bar(9, 15, 101.0), session_bar(9, 45, 120.0)];
    let high = opening_range_high(&bars, Kolkata, open(), 30);
    assert_eq!(high, Some(101.0));
}

#[test]
fn test_opening_range_missing_when_feed_starts_late() {
    let bars = vec![session_bar(10, 30, 105.0), session_bar(10, 35, 106.0)];
    assert!(opening_range_high(&bars, Kolkata, open(), 30).is_none());
}

#[test]
fn test_opening_range_ignores_premarket() {
    let bars = vec![session_bar(9, 0, 150.0), session_bar(9, 20, 101.0)];
    let high = opening_range_high(&bars, Kolkata, open(), 30);
    assert_eq!(high, Some(101.0));
}
