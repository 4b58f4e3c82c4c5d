//! Time primitives shared by every kaal crate.
//!
//! This crate provides:
//! - `Instant`: a UTC moment bound to the observer's geographic location
//! - `Interval`: a half-open `[start, end)` span of instants
//! - Nanosecond-exact `TimeDelta` helpers and fractional-day conversions
//! - Julian Date conversions and lenient UTC parsing

pub mod duration;
pub mod error;
pub mod instant;
pub mod interval;
pub mod julian;
pub mod location;

pub use duration::{
    NANOS_PER_DAY, SECONDS_PER_DAY, delta_from_days, delta_from_nanos, delta_to_days,
    delta_to_nanos,
};
pub use error::TimeError;
pub use instant::{Instant, parse_utc};
pub use interval::Interval;
pub use julian::{J2000_JD, UNIX_EPOCH_JD, centuries_since_j2000, jd_to_utc, utc_to_jd};
pub use location::GeoLocation;
