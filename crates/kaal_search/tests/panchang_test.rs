//! Panchang element spans with synthetic oracles.

mod common;

use chrono::TimeDelta;
use common::{LinearOracle, epoch, utc};
use kaal_search::{
    BoundaryPolicy, PanchangConfig, PanchangElement, SearchError, element_index, element_span,
    panchang_elements,
};
use kaal_vedic_base::Classifier;

#[test]
fn all_elements_resolve() {
    let oracle = LinearOracle::new(0.0, 0.0);
    let at = utc(2024, 4, 8, 9, 0);
    let p = panchang_elements(&oracle, &at, &PanchangConfig::default(), BoundaryPolicy::Strict);

    for (element, result) in p.all() {
        let span = result.as_ref().unwrap_or_else(|e| panic!("{element}: {e}"));
        assert_eq!(span.element, element);
        assert!(span.end > at, "{element} ends before query");
        assert!(!span.estimated);
    }

    let tithi = p.tithi.unwrap();
    assert_eq!(tithi.index, 1);
    // Tithi 1 ends 23.62 h after the epoch.
    let expected = epoch() + TimeDelta::seconds((12.0 / 12.190_711 * 86_400.0) as i64);
    assert!((tithi.end - expected).num_seconds().abs() < 120);

    let karana = p.karana.unwrap();
    assert_eq!(karana.index, 1);
    assert!(karana.end < tithi.end);

    // 2024-04-08 is a Monday.
    let vara = p.vara.unwrap();
    assert_eq!(vara.index, 2);
    assert_eq!(vara.end, utc(2024, 4, 9, 6, 0));
}

#[test]
fn vara_before_sunrise_is_previous_day() {
    let oracle = LinearOracle::new(0.0, 0.0);
    let at = utc(2024, 4, 8, 3, 0);
    let span = element_span(
        &oracle,
        PanchangElement::Vara,
        &at,
        &PanchangConfig::default(),
        BoundaryPolicy::Strict,
    )
    .unwrap();
    // Still Sunday's Vedic day.
    assert_eq!(span.index, 1);
    assert_eq!(span.end, utc(2024, 4, 8, 6, 0));
}

#[test]
fn one_element_failing_does_not_block_others() {
    let oracle = LinearOracle {
        sun_unavailable: true,
        ..LinearOracle::new(0.0, 0.0)
    };
    let at = utc(2024, 4, 8, 9, 0);
    let p = panchang_elements(&oracle, &at, &PanchangConfig::default(), BoundaryPolicy::Strict);

    assert!(matches!(p.tithi, Err(SearchError::OracleUnavailable(_))));
    assert!(matches!(p.yoga, Err(SearchError::OracleUnavailable(_))));
    assert!(matches!(p.karana, Err(SearchError::OracleUnavailable(_))));
    assert!(p.nakshatra.is_ok());
    assert!(p.vara.is_ok());
}

#[test]
fn fallback_policy_flags_estimate() {
    let oracle = LinearOracle {
        speed: 0.0,
        ..LinearOracle::new(0.0, 50.0)
    };
    let at = epoch();
    let config = PanchangConfig::default();

    let strict = element_span(
        &oracle,
        PanchangElement::Nakshatra,
        &at,
        &config,
        BoundaryPolicy::Strict,
    )
    .unwrap_err();
    assert!(matches!(strict, SearchError::BoundaryNotFound { .. }));

    let span = element_span(
        &oracle,
        PanchangElement::Nakshatra,
        &at,
        &config,
        BoundaryPolicy::NominalFallback,
    )
    .unwrap();
    assert!(span.estimated);
    assert_eq!(span.index, 4);
    assert_eq!(span.end, at + PanchangElement::Nakshatra.nominal_period());
}

#[test]
fn degenerate_day_only_affects_vara() {
    let oracle = LinearOracle {
        no_sunset_on: vec![utc(2024, 4, 8, 0, 0).utc().date_naive()],
        ..LinearOracle::new(0.0, 0.0)
    };
    let at = utc(2024, 4, 8, 9, 0);
    let p = panchang_elements(&oracle, &at, &PanchangConfig::default(), BoundaryPolicy::Strict);
    assert!(matches!(p.vara, Err(SearchError::DegenerateDay(_))));
    assert!(p.tithi.is_ok());
    assert!(p.nakshatra.is_ok());
}

#[test]
fn spans_serialize() {
    let oracle = LinearOracle::new(0.0, 0.0);
    let span = element_span(
        &oracle,
        PanchangElement::Yoga,
        &epoch(),
        &PanchangConfig::default(),
        BoundaryPolicy::Strict,
    )
    .unwrap();
    let json = serde_json::to_value(&span).unwrap();
    assert_eq!(json["element"], "Yoga");
    assert_eq!(json["estimated"], false);
    assert!(json["end"]["utc"].is_string());
}

#[test]
fn nan_longitude_is_not_an_index() {
    let oracle = LinearOracle {
        nan_sky: true,
        ..LinearOracle::new(0.0, 0.0)
    };
    let at = utc(2024, 4, 8, 9, 0);
    for classifier in [
        Classifier::Tithi,
        Classifier::Nakshatra,
        Classifier::Yoga,
        Classifier::Karana,
        Classifier::Rashi,
    ] {
        let err = element_index(&oracle, classifier, &at).unwrap_err();
        assert!(matches!(err, SearchError::OracleUnavailable(_)), "{err}");
    }
    let p = panchang_elements(&oracle, &at, &PanchangConfig::default(), BoundaryPolicy::Strict);
    assert!(matches!(p.tithi, Err(SearchError::OracleUnavailable(_))));
    assert!(matches!(p.nakshatra, Err(SearchError::OracleUnavailable(_))));
    // Vara needs only rise and set.
    assert!(p.vara.is_ok());
}
