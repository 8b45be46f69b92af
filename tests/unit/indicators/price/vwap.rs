//! Unit tests for the session VWAP

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use tapescan::indicators::price::calculate_vwap;
use tapescan::models::Bar;

fn bar(high: f64, low: f64, close: f64, volume: f64, minute: i64) -> Bar {
    let timestamp = Utc
        .with_ymd_and_hms(2026, 3, 4, 4, 0, 0)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::minutes(minute);
    Bar::new(close, high, low, close, volume, timestamp)
}

#[test]
fn test_vwap_empty_window() {
    assert!(calculate_vwap(&[]).is_none());
}

#[test]
fn test_vwap_single_bar_is_typical_price() {
    let bars = vec![bar(102.0, 98.0, 100.0, 500.0, 0)];
    let vwap = calculate_vwap(&bars).expect("one bar");
    assert_relative_eq!(vwap, (102.0 + 98.0 + 100.0) / 3.0);
}

#[test]
fn test_vwap_weights_by_volume() {
    // Almost all volume trades at the higher price level.
    let bars = vec![
        bar(101.0, 99.0, 100.0, 10.0, 0),
        bar(111.0, 109.0, 110.0, 10_000.0, 5),
    ];
    let vwap = calculate_vwap(&bars).expect("two bars");
    assert!(vwap > 109.5);
    assert!(vwap < 110.0);
}

#[test]
fn test_vwap_bounded_by_typical_prices() {
    let bars = vec![
        bar(105.0, 95.0, 100.0, 300.0, 0),
        bar(110.0, 100.0, 105.0, 700.0, 5),
        bar(108.0, 98.0, 103.0, 500.0, 10),
    ];
    let typicals: Vec<f64> = bars.iter().map(|b| b.typical_price()).collect();
    let min = typicals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = typicals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let vwap = calculate_vwap(&bars).expect("three bars");
    assert!(vwap >= min && vwap <= max);
}

#[test]
fn test_vwap_zero_volume_falls_back_to_typical() {
    let bars = vec![bar(101.0, 99.0, 100.0, 0.0, 0), bar(103.0, 101.0, 102.0, 0.0, 5)];
    let vwap = calculate_vwap(&bars).expect("two bars");
    assert_relative_eq!(vwap, (103.0 + 101.0 + 102.0) / 3.0);
}
