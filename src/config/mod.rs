//! Scanner configuration: category weight table, confirmation thresholds,
//! session windows and runtime knobs, overridable from the environment.
//!
//! The two presets capture the threshold sets this scanner is deployed
//! with; every policy constant stays a config field, never a hard-coded
//! value inside the engine.

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// One market-movers category feed and its score weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    /// Path slug appended to the category source base URL.
    pub slug: String,
    pub weight: u32,
}

impl CategoryConfig {
    pub fn new(name: &str, slug: &str, weight: u32) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            weight,
        }
    }
}

/// Lookbacks and session windows for indicator computation.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub volume_window: usize,
    pub atr_period: usize,
    /// Minimum bar count before a candidate is evaluated at all. Must
    /// exceed the longest lookback; the snapshot enforces the larger of
    /// the two.
    pub min_bars: usize,
    pub session_timezone: Tz,
    pub session_open: NaiveTime,
    pub opening_range_minutes: i64,
}

/// How the stop and target are derived once a candidate confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopStrategy {
    /// Stop at min(low, VWAP) with a fixed reward:risk target.
    FixedRatio,
    /// ATR-scaled stop and target.
    AtrScaled,
}

/// Confirmation-engine thresholds.
#[derive(Debug, Clone)]
pub struct ConfirmationConfig {
    /// Max |close - VWAP| / VWAP for the early-momentum proximity check.
    pub vwap_proximity: f64,
    /// Tolerance band applied to the VWAP and opening-range breakout
    /// comparisons: close >= reference * (1 - tolerance). 0.0 is strict.
    pub breakout_tolerance: f64,
    /// RSI band (inclusive) that is neither overbought nor exhausted.
    pub rsi_band: (f64, f64),
    /// Current volume must exceed the rolling average by this factor.
    pub volume_multiplier: f64,
    pub stop_strategy: StopStrategy,
    pub reward_risk: f64,
    /// Fractional shrink applied to the fixed-ratio stop.
    pub stop_safety_margin: f64,
    pub atr_stop_multiple: f64,
    /// Floor on the ATR-scaled target, as a fraction above entry.
    pub min_target_pct: f64,
}

/// Candidate list bounds.
#[derive(Debug, Clone)]
pub struct RankingConfig {
    pub min_score: u32,
    pub max_universe: usize,
    /// Entries shown in the raw momentum snapshot message.
    pub snapshot_size: usize,
}

/// Venue trading session for the scheduler gate.
#[derive(Debug, Clone)]
pub struct MarketHoursConfig {
    pub timezone: Tz,
    pub open: NaiveTime,
    pub close: NaiveTime,
}

/// Run-level orchestration knobs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub worker_concurrency: usize,
    pub fetch_timeout_secs: u64,
    /// Minimum spacing between outbound requests to a collaborator.
    pub request_spacing_ms: u64,
    pub max_alerts_per_run: usize,
    /// Also alert candidates that only reach early momentum.
    pub alert_early_momentum: bool,
    /// Benchmark index for the relative-strength gate, e.g. "^NSEI".
    pub index_symbol: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub categories: Vec<CategoryConfig>,
    pub indicators: IndicatorConfig,
    pub confirmation: ConfirmationConfig,
    pub ranking: RankingConfig,
    pub market_hours: MarketHoursConfig,
    pub pipeline: PipelineConfig,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new("Volume Shockers", "volume-shocker", 4),
        CategoryConfig::new("Price Shockers", "price-shocker", 4),
        CategoryConfig::new("Only Buyers", "buyer", 3),
        CategoryConfig::new("Top Gainers", "gainer", 2),
        CategoryConfig::new("52 Week High", "52-week-high", 1),
    ]
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            indicators: IndicatorConfig {
                rsi_period: 14,
                volume_window: 20,
                atr_period: 14,
                min_bars: 30,
                session_timezone: chrono_tz::Asia::Kolkata,
                session_open: hm(9, 15),
                opening_range_minutes: 30,
            },
            confirmation: ConfirmationConfig {
                vwap_proximity: 0.02,
                breakout_tolerance: 0.0,
                rsi_band: (55.0, 70.0),
                volume_multiplier: 1.3,
                stop_strategy: StopStrategy::FixedRatio,
                reward_risk: 2.0,
                stop_safety_margin: 0.003,
                atr_stop_multiple: 1.0,
                min_target_pct: 0.05,
            },
            ranking: RankingConfig {
                min_score: 3,
                max_universe: 40,
                snapshot_size: 15,
            },
            market_hours: MarketHoursConfig {
                timezone: chrono_tz::Asia::Kolkata,
                open: hm(9, 15),
                close: hm(15, 30),
            },
            pipeline: PipelineConfig {
                worker_concurrency: 4,
                fetch_timeout_secs: 10,
                request_spacing_ms: 800,
                max_alerts_per_run: 6,
                alert_early_momentum: false,
                index_symbol: None,
            },
        }
    }
}

impl ScannerConfig {
    /// Tighter thresholds: narrower RSI band, smaller universe, and a
    /// tolerance band on the breakout comparisons.
    pub fn conservative() -> Self {
        let mut config = Self::default();
        config.confirmation.rsi_band = (55.0, 65.0);
        config.confirmation.volume_multiplier = 1.2;
        config.confirmation.breakout_tolerance = 0.02;
        config.ranking.min_score = 5;
        config.ranking.max_universe = 25;
        config.ranking.snapshot_size = 10;
        config
    }

    /// Build from the environment: PRESET selects the base
    /// (default | conservative), individual variables override on top.
    pub fn from_env() -> Self {
        let mut config = match env::var("PRESET").ok().as_deref() {
            Some("conservative") => Self::conservative(),
            _ => Self::default(),
        };

        if let Some(v) = env_parse("MIN_SCORE") {
            config.ranking.min_score = v;
        }
        if let Some(v) = env_parse("MAX_UNIVERSE") {
            config.ranking.max_universe = v;
        }
        if let Some(v) = env_parse("SNAPSHOT_SIZE") {
            config.ranking.snapshot_size = v;
        }
        if let Some(v) = env_parse("MIN_BARS") {
            config.indicators.min_bars = v;
        }
        if let Some(v) = env_parse("RSI_BAND_LOW") {
            config.confirmation.rsi_band.0 = v;
        }
        if let Some(v) = env_parse("RSI_BAND_HIGH") {
            config.confirmation.rsi_band.1 = v;
        }
        if let Some(v) = env_parse("VWAP_PROXIMITY") {
            config.confirmation.vwap_proximity = v;
        }
        if let Some(v) = env_parse("BREAKOUT_TOLERANCE") {
            config.confirmation.breakout_tolerance = v;
        }
        if let Some(v) = env_parse("VOLUME_MULTIPLIER") {
            config.confirmation.volume_multiplier = v;
        }
        if let Some(v) = env_parse("REWARD_RISK_RATIO") {
            config.confirmation.reward_risk = v;
        }
        if let Ok(v) = env::var("STOP_STRATEGY") {
            match v.to_ascii_lowercase().as_str() {
                "atr" | "atr-scaled" => {
                    config.confirmation.stop_strategy = StopStrategy::AtrScaled
                }
                "fixed" | "fixed-ratio" => {
                    config.confirmation.stop_strategy = StopStrategy::FixedRatio
                }
                _ => {}
            }
        }
        if let Some(v) = env_parse("WORKER_CONCURRENCY") {
            config.pipeline.worker_concurrency = v;
        }
        if let Some(v) = env_parse("FETCH_TIMEOUT_SECONDS") {
            config.pipeline.fetch_timeout_secs = v;
        }
        if let Some(v) = env_parse("REQUEST_SPACING_MS") {
            config.pipeline.request_spacing_ms = v;
        }
        if let Some(v) = env_parse("MAX_ALERTS_PER_RUN") {
            config.pipeline.max_alerts_per_run = v;
        }
        if let Some(v) = env_parse("ALERT_EARLY_MOMENTUM") {
            config.pipeline.alert_early_momentum = v;
        }
        match env::var("INDEX_SYMBOL") {
            Ok(v) if !v.is_empty() => config.pipeline.index_symbol = Some(v),
            _ => {}
        }

        config
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Deployment environment name, used by the logging formatter selection.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}
