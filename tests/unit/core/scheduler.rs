//! Unit tests for the market-hours gate

use chrono::TimeZone;
use chrono::Utc;
use chrono_tz::Asia::Kolkata;
use tapescan::config::ScannerConfig;
use tapescan::core::scheduler::MarketHours;

fn gate() -> MarketHours {
    MarketHours::new(ScannerConfig::default().market_hours)
}

fn venue_time(day: u32, hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Kolkata
        .with_ymd_and_hms(2026, 3, day, hour, minute, 0)
        .single()
        .expect("valid venue time")
        .with_timezone(&Utc)
}

#[test]
fn test_open_midday_on_a_weekday() {
    // 2026-03-04 is a Wednesday.
    assert!(gate().is_open_at(venue_time(4, 11, 30)));
}

#[test]
fn test_closed_on_weekends() {
    // 2026-03-07 is a Saturday, 2026-03-08 a Sunday.
    assert!(!gate().is_open_at(venue_time(7, 11, 30)));
    assert!(!gate().is_open_at(venue_time(8, 11, 30)));
}

#[test]
fn test_closed_before_the_open() {
    assert!(!gate().is_open_at(venue_time(4, 9, 0)));
    assert!(!gate().is_open_at(venue_time(4, 9, 14)));
}

#[test]
fn test_open_and_close_minutes_are_inclusive() {
    assert!(gate().is_open_at(venue_time(4, 9, 15)));
    assert!(gate().is_open_at(venue_time(4, 15, 30)));
}

#[test]
fn test_closed_after_the_close() {
    assert!(!gate().is_open_at(venue_time(4, 15, 31)));
    assert!(!gate().is_open_at(venue_time(4, 18, 0)));
}
