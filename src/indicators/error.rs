use thiserror::Error;

/// Recoverable indicator failures. Never fatal to a run: the pipeline
/// skips the candidate and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: {got} bars, need at least {need}")]
    InsufficientData { got: usize, need: usize },
}
