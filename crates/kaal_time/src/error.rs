//! Error types for time primitives.

use thiserror::Error;

/// Errors from instant/interval construction and parsing.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Interval end is not strictly after its start.
    #[error("invalid interval: end must be after start")]
    InvalidInterval,
    /// Date/time string could not be parsed.
    #[error("cannot parse date/time '{0}'")]
    Parse(String),
    /// Arithmetic left the representable date range.
    #[error("time out of range: {0}")]
    OutOfRange(&'static str),
    /// Geographic coordinate outside its valid range.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
}
