//! Multi-tier confirmation of ranked candidates against intraday action.
//!
//! Every candidate starts at RAW. The engine re-evaluates the latest bar
//! against all predicates on each run; a tier is the milestone reached
//! now, not stored progress. A candidate may confirm trade-ready without
//! having been seen at early momentum first.

use crate::config::{ConfirmationConfig, StopStrategy};
use crate::indicators::IndicatorSnapshot;
use crate::models::{ConfirmationResult, ConfirmationTier, TradePlan};

/// Run-level context shared by every candidate evaluation.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    /// Session change of the benchmark index. When present, trade-ready
    /// additionally requires the candidate to outperform it.
    pub index_session_change_pct: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ConfirmationEngine {
    config: ConfirmationConfig,
}

impl ConfirmationEngine {
    pub fn new(config: ConfirmationConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(
        &self,
        symbol: &str,
        snapshot: &IndicatorSnapshot,
        ctx: &EvaluationContext,
    ) -> ConfirmationResult {
        if let Some(reasons) = self.trade_ready(snapshot, ctx) {
            return ConfirmationResult {
                symbol: symbol.to_string(),
                tier: ConfirmationTier::TradeReady,
                plan: Some(self.derive_plan(snapshot)),
                reasons,
            };
        }

        if let Some(reasons) = self.early_momentum(snapshot) {
            return ConfirmationResult {
                symbol: symbol.to_string(),
                tier: ConfirmationTier::EarlyMomentum,
                plan: None,
                reasons,
            };
        }

        ConfirmationResult {
            symbol: symbol.to_string(),
            tier: ConfirmationTier::Raw,
            plan: None,
            reasons: Vec::new(),
        }
    }

    /// Price hugging VWAP with rising RSI and building volume.
    fn early_momentum(&self, snapshot: &IndicatorSnapshot) -> Option<Vec<String>> {
        if snapshot.vwap <= 0.0 {
            return None;
        }

        let close = snapshot.last.close;
        let proximity = (close - snapshot.vwap).abs() / snapshot.vwap;
        if proximity >= self.config.vwap_proximity {
            return None;
        }
        if snapshot.rsi <= snapshot.rsi_prev {
            return None;
        }
        if snapshot.last.volume <= snapshot.volume_avg {
            return None;
        }

        Some(vec![
            format!(
                "Price within {:.1}% of VWAP",
                self.config.vwap_proximity * 100.0
            ),
            format!(
                "RSI rising ({:.1} from {:.1})",
                snapshot.rsi, snapshot.rsi_prev
            ),
            "Volume above rolling average".to_string(),
        ])
    }

    /// VWAP held, opening range broken, RSI in the safe band and rising,
    /// volume expanding by the configured multiple. Missing opening range
    /// means the breakout cannot be confirmed and the candidate stays
    /// below this tier.
    fn trade_ready(
        &self,
        snapshot: &IndicatorSnapshot,
        ctx: &EvaluationContext,
    ) -> Option<Vec<String>> {
        let close = snapshot.last.close;
        let tolerance = 1.0 - self.config.breakout_tolerance;

        if close < snapshot.vwap * tolerance {
            return None;
        }

        let or_high = snapshot.opening_range_high?;
        if close < or_high * tolerance {
            return None;
        }

        let (band_low, band_high) = self.config.rsi_band;
        if snapshot.rsi < band_low || snapshot.rsi > band_high {
            return None;
        }
        if snapshot.rsi <= snapshot.rsi_prev {
            return None;
        }
        if snapshot.last.volume <= self.config.volume_multiplier * snapshot.volume_avg {
            return None;
        }
        if let Some(index_pct) = ctx.index_session_change_pct {
            if snapshot.session_change_pct <= index_pct {
                return None;
            }
        }

        let volume_ratio = if snapshot.volume_avg > 0.0 {
            snapshot.last.volume / snapshot.volume_avg
        } else {
            0.0
        };
        let mut reasons = vec![
            "VWAP reclaimed".to_string(),
            "Opening-range high broken".to_string(),
            format!("RSI {:.1} in safe band, rising", snapshot.rsi),
            format!("Volume {:.1}x rolling average", volume_ratio),
        ];
        if let Some(index_pct) = ctx.index_session_change_pct {
            reasons.push(format!(
                "Outperforming index ({:+.2}% vs {:+.2}%)",
                snapshot.session_change_pct, index_pct
            ));
        }

        Some(reasons)
    }

    fn derive_plan(&self, snapshot: &IndicatorSnapshot) -> TradePlan {
        let entry = snapshot.last.high;
        match self.config.stop_strategy {
            StopStrategy::FixedRatio => {
                let stop = snapshot.last.low.min(snapshot.vwap)
                    * (1.0 - self.config.stop_safety_margin);
                let target = entry + self.config.reward_risk * (entry - stop);
                TradePlan {
                    entry,
                    stop,
                    target,
                    rsi: snapshot.rsi,
                }
            }
            StopStrategy::AtrScaled => {
                let risk = self.config.atr_stop_multiple * snapshot.atr;
                let stop = entry - risk;
                let target = (entry * (1.0 + self.config.min_target_pct))
                    .max(entry + self.config.reward_risk * risk);
                TradePlan {
                    entry,
                    stop,
                    target,
                    rsi: snapshot.rsi,
                }
            }
        }
    }
}
