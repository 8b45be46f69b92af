//! Shared fixtures: session bar series and mocked wire payloads.

use chrono::TimeZone;
use chrono_tz::Asia::Kolkata;
use serde_json::{json, Value};
use tapescan::config::{CategoryConfig, ScannerConfig};

/// Unix timestamps for 5-minute bars starting at the venue open
/// (09:15 IST on a weekday).
pub fn session_timestamps(count: usize) -> Vec<i64> {
    let open = Kolkata
        .with_ymd_and_hms(2026, 3, 4, 9, 15, 0)
        .single()
        .expect("valid venue time");
    (0..count).map(|i| open.timestamp() + i as i64 * 300).collect()
}

/// A session that ends in a confirmed breakout: alternating gains and
/// losses with upward drift, then three straight pushes to the high of
/// the day. RSI lands in the 70s, rising into the close.
pub fn trade_ready_closes() -> Vec<f64> {
    let mut closes = Vec::new();
    let mut price = 100.0;
    for i in 0..37 {
        if i % 2 == 0 {
            price += 0.4;
        } else {
            price -= 0.25;
        }
        closes.push(price);
    }
    for _ in 0..3 {
        price += 0.5;
        closes.push(price);
    }
    closes
}

/// Flat participation with a volume spike on the final bar.
pub fn spike_volumes(count: usize) -> Vec<f64> {
    let mut volumes = vec![1000.0; count];
    if let Some(last) = volumes.last_mut() {
        *last = 3000.0;
    }
    volumes
}

/// Chart-endpoint payload for a close series: opens chain from the prior
/// close, highs sit 0.2 above and lows 0.5 below the close.
pub fn chart_body(closes: &[f64], volumes: &[f64]) -> Value {
    let timestamps = session_timestamps(closes.len());
    let opens: Vec<f64> = std::iter::once(closes[0] - 0.2)
        .chain(closes.iter().copied().take(closes.len() - 1))
        .collect();
    let highs: Vec<f64> = closes.iter().map(|c| c + 0.2).collect();
    let lows: Vec<f64> = closes.iter().map(|c| c - 0.5).collect();

    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "TEST", "dataGranularity": "5m" },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": opens,
                        "high": highs,
                        "low": lows,
                        "close": closes,
                        "volume": volumes,
                    }]
                }
            }],
            "error": null
        }
    })
}

/// Movers-feed payload listing the given symbols.
pub fn category_body(symbols: &[&str]) -> Value {
    let list: Vec<Value> = symbols.iter().map(|s| json!({ "symbol": s })).collect();
    json!({ "data": { "list": list } })
}

/// Pipeline config pointed at mocked collaborators: one category, no
/// request spacing, and an RSI band wide enough for the fixture series.
pub fn test_config() -> ScannerConfig {
    let mut config = ScannerConfig::default();
    config.categories = vec![CategoryConfig::new("Volume Shockers", "volume-shocker", 4)];
    config.confirmation.rsi_band = (50.0, 90.0);
    config.pipeline.request_spacing_ms = 0;
    config.pipeline.worker_concurrency = 2;
    config.pipeline.fetch_timeout_secs = 5;
    config
}
