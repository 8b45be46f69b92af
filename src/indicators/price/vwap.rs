//! Session VWAP (volume-weighted average price).

use crate::models::Bar;

/// Cumulative VWAP over the full bar window.
///
/// VWAP[t] = cumsum(typical price * volume) / cumsum(volume), a running
/// average anchored at the start of the window, not period-bounded. A
/// window with zero traded volume falls back to the latest typical price.
pub fn calculate_vwap(bars: &[Bar]) -> Option<f64> {
    let last = bars.last()?;

    let mut weighted_sum = 0.0;
    let mut volume_sum = 0.0;
    for bar in bars {
        weighted_sum += bar.typical_price() * bar.volume;
        volume_sum += bar.volume;
    }

    if volume_sum == 0.0 {
        return Some(last.typical_price());
    }

    Some(weighted_sum / volume_sum)
}
