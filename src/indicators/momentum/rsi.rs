//! RSI (Relative Strength Index), rolling-mean form.

use crate::models::Bar;

/// Calculate RSI over the window ending at the last bar.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = average gain / average loss
///
/// Both averages are simple rolling means over the final `period`
/// close-to-close changes. A window with zero average loss reads 100.
pub fn calculate_rsi(bars: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period + 1 {
        return None;
    }

    let start = bars.len() - period - 1;
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in bars[start..].windows(2) {
        let change = pair[1].close - pair[0].close;
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += -change;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}
