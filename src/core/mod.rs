//! Core orchestration: the scan pipeline and its scheduler.

pub mod pipeline;
pub mod scheduler;

pub use pipeline::{ScanOutcome, ScanPipeline};
pub use scheduler::{MarketHours, ScanScheduler};
