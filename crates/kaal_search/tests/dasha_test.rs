//! Dasha trees with the Moon sampled from an oracle.

mod common;

use chrono::TimeDelta;
use common::{LinearOracle, epoch};
use kaal_oracle::{Body, Oracle, OracleError};
use kaal_search::{SearchError, dasha_for_birth, dasha_snapshot_at};
use kaal_time::Instant;
use kaal_vedic_base::{DashaConfig, Graha};

#[test]
fn moon_in_rohini_starts_with_chandra() {
    // Rohini spans 40-53.33 deg.
    let oracle = LinearOracle::new(0.0, 45.0);
    let tree = dasha_for_birth(&oracle, &epoch(), &DashaConfig::default()).unwrap();
    let first = &tree.children()[0];
    assert_eq!(*first.ruler(), Graha::Chandra);
    assert_eq!(first.start(), epoch());
    assert!(first.is_partial());
    assert_eq!(tree.depth(), 3);
}

#[test]
fn snapshot_matches_tree() {
    let oracle = LinearOracle::new(0.0, 200.0);
    let config = DashaConfig::default();
    let at = epoch() + TimeDelta::days(9_000);
    let tree = dasha_for_birth(&oracle, &epoch(), &config).unwrap();
    let chain = dasha_snapshot_at(&oracle, &epoch(), &at, &config).unwrap();
    assert_eq!(chain.len(), 3);
    let maha = tree.children().iter().find(|p| p.contains(&at)).unwrap();
    assert_eq!(chain[0].ruler(), maha.ruler());
    assert_eq!(chain[0].interval(), maha.interval());
}

struct NoMoon;

impl Oracle for NoMoon {
    fn longitude(&self, _: &Instant, _: Body) -> Result<f64, OracleError> {
        Err(OracleError::Unavailable("lunar theory not loaded".into()))
    }
    fn ascendant(&self, _: &Instant) -> Result<f64, OracleError> {
        Ok(0.0)
    }
    fn house_cusps(&self, _: &Instant) -> Result<[f64; 12], OracleError> {
        Ok([0.0; 12])
    }
    fn rise_event(&self, _: &Instant, _: Body) -> Result<Option<Instant>, OracleError> {
        Ok(None)
    }
    fn set_event(&self, _: &Instant, _: Body) -> Result<Option<Instant>, OracleError> {
        Ok(None)
    }
}

#[test]
fn oracle_failure_is_not_faked() {
    let err = dasha_for_birth(&NoMoon, &epoch(), &DashaConfig::default()).unwrap_err();
    assert!(matches!(err, SearchError::OracleUnavailable(_)));
}

#[test]
fn nan_moon_is_an_oracle_failure() {
    let oracle = LinearOracle {
        nan_sky: true,
        ..LinearOracle::new(0.0, 0.0)
    };
    let err = dasha_for_birth(&oracle, &epoch(), &DashaConfig::default()).unwrap_err();
    assert!(matches!(err, SearchError::OracleUnavailable(_)));
    let at = epoch() + TimeDelta::days(100);
    let err = dasha_snapshot_at(&oracle, &epoch(), &at, &DashaConfig::default()).unwrap_err();
    assert!(matches!(err, SearchError::OracleUnavailable(_)));
}
