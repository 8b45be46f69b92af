//! ATR (Average True Range), input to the volatility-scaled stop variant.

use crate::models::Bar;

/// Simple moving average of true range over the final `period` bars.
pub fn calculate_atr(bars: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period + 1 {
        return None;
    }

    let mut true_ranges = Vec::with_capacity(bars.len() - 1);
    for pair in bars.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        let tr = (current.high - current.low)
            .max((current.high - prev.close).abs())
            .max((current.low - prev.close).abs());
        true_ranges.push(tr);
    }

    let tail = &true_ranges[true_ranges.len() - period..];
    Some(tail.iter().sum::<f64>() / period as f64)
}
