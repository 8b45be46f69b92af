//! Technical indicators, recomputed fresh per candidate from its bar window.

pub mod error;
pub mod momentum;
pub mod price;
pub mod snapshot;
pub mod volatility;
pub mod volume;

pub use error::IndicatorError;
pub use snapshot::IndicatorSnapshot;
