//! Shared data models spanning the scanner layers.

pub mod bar;
pub mod signal;

pub use bar::Bar;
pub use signal::{
    ConfirmationResult, ConfirmationTier, ScoreRecord, TradeAlert, TradePlan,
};
