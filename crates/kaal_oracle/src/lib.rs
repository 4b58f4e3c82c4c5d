//! Ephemeris oracle boundary.
//!
//! The engine never computes body positions itself. Everything it needs
//! (longitudes, ascendant, house cusps, rise/set) is requested through the
//! [`Oracle`] trait, so any ephemeris backend can be plugged in.
//!
//! [`MeanMotionOracle`] is a self-contained adapter built from linear mean
//! longitudes. It is accurate to about a degree and exists for the CLI and
//! for exercising the engine without kernel files.

pub mod body;
pub mod error;
pub mod mean_motion;
pub mod oracle;

pub use body::{ALL_BODIES, Body};
pub use error::OracleError;
pub use mean_motion::{MeanMotionConfig, MeanMotionOracle};
pub use oracle::Oracle;
