//! Scoring and confirmation outputs.

use serde::{Deserialize, Serialize};

/// Aggregate momentum score for a symbol across category feeds.
///
/// `categories` keeps the names in the order the feeds were queried, for
/// display in the momentum snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub symbol: String,
    pub score: u32,
    pub categories: Vec<String>,
}

impl ScoreRecord {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            score: 0,
            categories: Vec::new(),
        }
    }
}

/// Confirmation milestone a candidate reached during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmationTier {
    Raw,
    EarlyMomentum,
    TradeReady,
}

impl ConfirmationTier {
    pub fn label(&self) -> &'static str {
        match self {
            ConfirmationTier::Raw => "RAW",
            ConfirmationTier::EarlyMomentum => "EARLY MOMENTUM",
            ConfirmationTier::TradeReady => "TRADE-READY",
        }
    }
}

/// Price levels derived when a candidate confirms trade-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub rsi: f64,
}

/// Outcome of running one candidate through the confirmation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationResult {
    pub symbol: String,
    pub tier: ConfirmationTier,
    /// Populated only at `TradeReady`.
    pub plan: Option<TradePlan>,
    /// Human-readable list of the checks that passed.
    pub reasons: Vec<String>,
}

/// Finished alert record handed to the notifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAlert {
    pub symbol: String,
    pub score: u32,
    pub categories: Vec<String>,
    pub tier: ConfirmationTier,
    pub plan: Option<TradePlan>,
    pub reasons: Vec<String>,
}
