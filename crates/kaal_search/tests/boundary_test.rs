//! Boundary search against synthetic quantities.

mod common;

use chrono::TimeDelta;
use common::{LinearOracle, epoch};
use kaal_search::{BoundaryConfig, SearchError, element_index, find_boundary};
use kaal_time::Instant;
use kaal_vedic_base::Classifier;
use proptest::prelude::*;

/// Index 1 during the first 24 h, 2 during the next.
fn daily_index(t: &Instant) -> Result<u8, SearchError> {
    let hours = (*t - epoch()).num_milliseconds() as f64 / 3_600_000.0;
    Ok((hours / 24.0).floor() as u8 + 1)
}

#[test]
fn boundary_of_daily_quantity() {
    let b = find_boundary(&epoch(), 1, daily_index, &BoundaryConfig::default()).unwrap();
    let err = (b - (epoch() + TimeDelta::hours(24))).num_seconds().abs();
    assert!(err <= 120, "boundary off by {err} s");
}

#[test]
fn tithi_boundary_from_linear_sky() {
    let oracle = LinearOracle::new(0.0, 0.0);
    let index = element_index(&oracle, Classifier::Tithi, &epoch()).unwrap();
    assert_eq!(index, 1);
    let b = find_boundary(
        &epoch(),
        index,
        |t| element_index(&oracle, Classifier::Tithi, t),
        &BoundaryConfig::default(),
    )
    .unwrap();
    // 12 deg at (13.176358 - 0.985647) deg/day.
    let expected_s = 12.0 / (13.176_358 - 0.985_647) * 86_400.0;
    let actual_s = (b - epoch()).num_milliseconds() as f64 / 1000.0;
    assert!((actual_s - expected_s).abs() < 120.0);
}

#[test]
fn reinvoking_from_boundary_moves_forward() {
    let oracle = LinearOracle::new(10.0, 40.0);
    let sample = |t: &Instant| element_index(&oracle, Classifier::Nakshatra, t);
    let config = BoundaryConfig::default();

    let first_index = sample(&epoch()).unwrap();
    let b1 = find_boundary(&epoch(), first_index, sample, &config).unwrap();
    let next_index = sample(&b1).unwrap();
    assert_ne!(next_index, first_index);
    let b2 = find_boundary(&b1, next_index, sample, &config).unwrap();
    assert!(b2 > b1);
    // One nakshatra later.
    let gap_h = (b2 - b1).num_minutes() as f64 / 60.0;
    assert!((gap_h - 24.29).abs() < 0.1, "gap {gap_h} h");
}

#[test]
fn stationary_quantity_exhausts_horizon() {
    let oracle = LinearOracle {
        speed: 0.0,
        ..LinearOracle::new(0.0, 100.0)
    };
    let err = find_boundary(
        &epoch(),
        element_index(&oracle, Classifier::Nakshatra, &epoch()).unwrap(),
        |t| element_index(&oracle, Classifier::Nakshatra, t),
        &BoundaryConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::BoundaryNotFound { .. }));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn boundary_strictly_after_start(moon0 in 0.0f64..360.0, offset_min in 0i64..10_000) {
        let oracle = LinearOracle::new(0.0, moon0);
        let start = epoch() + TimeDelta::minutes(offset_min);
        let sample = |t: &Instant| element_index(&oracle, Classifier::Nakshatra, t);
        let index = sample(&start).unwrap();
        let b = find_boundary(&start, index, sample, &BoundaryConfig::default()).unwrap();
        prop_assert!(b > start);
        prop_assert_ne!(sample(&b).unwrap(), index);
        // The bracket never exceeds one nakshatra.
        prop_assert!(b - start <= TimeDelta::hours(25));
    }
}
