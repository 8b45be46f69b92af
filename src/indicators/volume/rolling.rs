//! Rolling volume baseline.

use crate::models::Bar;

/// Simple moving average of volume over the final `window` bars.
pub fn rolling_volume_average(bars: &[Bar], window: usize) -> Option<f64> {
    if window == 0 || bars.len() < window {
        return None;
    }

    let sum: f64 = bars[bars.len() - window..].iter().map(|b| b.volume).sum();
    Some(sum / window as f64)
}
