//! Error types for Vedic base calculations.

use kaal_time::TimeError;
use thiserror::Error;

/// Errors from Vedic base calculations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// Ruler weights do not add up to the sequence's declared total.
    #[error("malformed ruler weights: expected total {expected}, got {actual}")]
    MalformedWeights { expected: u32, actual: u32 },
    /// Input outside the accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Error from time arithmetic.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
