//! Per-candidate indicator snapshot.

use crate::config::IndicatorConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::calculate_rsi;
use crate::indicators::price::{calculate_vwap, opening_range_high};
use crate::indicators::volatility::calculate_atr;
use crate::indicators::volume::rolling_volume_average;
use crate::models::Bar;

/// Everything the confirmation engine needs about one symbol, derived
/// fresh from its bar window on every run. No state carries across runs.
#[derive(Debug, Clone)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    /// RSI of the window ending one bar earlier, for the rising check.
    pub rsi_prev: f64,
    pub vwap: f64,
    pub volume_avg: f64,
    pub atr: f64,
    /// None when no bar falls inside the opening window.
    pub opening_range_high: Option<f64>,
    /// Percent change from the session's first open to the latest close.
    pub session_change_pct: f64,
    pub last: Bar,
    pub prev: Bar,
}

impl IndicatorSnapshot {
    /// Compute the snapshot, or fail with `InsufficientData` when the
    /// window is shorter than the configured minimum or any lookback.
    pub fn compute(
        bars: &[Bar],
        config: &IndicatorConfig,
    ) -> Result<Self, IndicatorError> {
        let need = config
            .min_bars
            .max(config.rsi_period + 2)
            .max(config.volume_window)
            .max(config.atr_period + 1);
        if bars.len() < need {
            return Err(IndicatorError::InsufficientData {
                got: bars.len(),
                need,
            });
        }

        let insufficient = || IndicatorError::InsufficientData {
            got: bars.len(),
            need,
        };

        let rsi = calculate_rsi(bars, config.rsi_period).ok_or_else(insufficient)?;
        let rsi_prev = calculate_rsi(&bars[..bars.len() - 1], config.rsi_period)
            .ok_or_else(insufficient)?;
        let vwap = calculate_vwap(bars).ok_or_else(insufficient)?;
        let volume_avg =
            rolling_volume_average(bars, config.volume_window).ok_or_else(insufficient)?;
        let atr = calculate_atr(bars, config.atr_period).ok_or_else(insufficient)?;

        let opening_range_high = opening_range_high(
            bars,
            config.session_timezone,
            config.session_open,
            config.opening_range_minutes,
        );

        let first = &bars[0];
        let last = bars[bars.len() - 1].clone();
        let prev = bars[bars.len() - 2].clone();
        let session_change_pct = if first.open == 0.0 {
            0.0
        } else {
            (last.close - first.open) / first.open * 100.0
        };

        Ok(Self {
            rsi,
            rsi_prev,
            vwap,
            volume_avg,
            atr,
            opening_range_high,
            session_change_pct,
            last,
            prev,
        })
    }
}
