//! Error types for search operations.

use chrono::{NaiveDate, TimeDelta};
use kaal_oracle::OracleError;
use kaal_time::{Instant, TimeError};
use kaal_vedic_base::VedicError;
use thiserror::Error;

/// Errors from boundary, scan and muhurta searches.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// The sampled index did not change within the search horizon.
    #[error("no boundary within {horizon} of {start}")]
    BoundaryNotFound { start: Instant, horizon: TimeDelta },
    /// The oracle failed to produce a sample.
    #[error("oracle unavailable: {0}")]
    OracleUnavailable(#[from] OracleError),
    /// Sunrise, sunset or an inauspicious interval is undefined for the day.
    #[error("degenerate day {0}: rise/set undefined")]
    DegenerateDay(NaiveDate),
    /// The caller's index does not match the sample at the start instant.
    #[error("index mismatch at start: expected {expected}, sampled {found}")]
    IndexMismatch { expected: u8, found: u8 },
    /// Invalid search configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error(transparent)]
    Vedic(#[from] VedicError),
    #[error(transparent)]
    Time(#[from] TimeError),
}
