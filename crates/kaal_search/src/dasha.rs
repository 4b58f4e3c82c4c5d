//! Dasha trees for a birth instant, with the Moon sampled from the oracle.
//!
//! The oracle's longitudes must be sidereal for the nakshatra of the Moon
//! to be meaningful.

use kaal_oracle::{Body, Oracle};
use kaal_time::Instant;
use kaal_vedic_base::{DashaConfig, Graha, PeriodNode, lifetime_snapshot, lifetime_tree};

use crate::error::SearchError;
use crate::panchang::finite_deg;

/// Vimshottari lifetime tree for `birth`.
pub fn dasha_for_birth<O: Oracle + ?Sized>(
    oracle: &O,
    birth: &Instant,
    config: &DashaConfig,
) -> Result<PeriodNode<Graha>, SearchError> {
    let moon = finite_deg(oracle.longitude(birth, Body::Moon)?, "moon longitude")?;
    Ok(lifetime_tree(*birth, moon, config)?)
}

/// Active Vimshottari chain at `at` for a subject born at `birth`.
pub fn dasha_snapshot_at<O: Oracle + ?Sized>(
    oracle: &O,
    birth: &Instant,
    at: &Instant,
    config: &DashaConfig,
) -> Result<Vec<PeriodNode<Graha>>, SearchError> {
    let moon = finite_deg(oracle.longitude(birth, Body::Moon)?, "moon longitude")?;
    Ok(lifetime_snapshot(*birth, moon, at, config)?)
}
