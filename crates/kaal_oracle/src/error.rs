//! Oracle failure modes.

use kaal_time::TimeError;
use thiserror::Error;

use crate::body::Body;

/// Errors reported by an [`Oracle`](crate::Oracle) implementation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// Backend could not produce a sample (missing data, I/O, range).
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
    /// Backend does not support the requested body for this query.
    #[error("body {0} not supported by this oracle query")]
    UnsupportedBody(Body),
    /// Location is outside the backend's valid domain.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
}

impl From<TimeError> for OracleError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::InvalidLocation(msg) => Self::InvalidLocation(msg),
            other => Self::Unavailable(other.to_string()),
        }
    }
}
