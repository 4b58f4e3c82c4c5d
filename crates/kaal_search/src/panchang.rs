//! Panchang element spans: the value of each limb at an instant and the
//! instant it changes.
//!
//! The four longitude limbs are located with [`find_boundary`]; vara follows
//! sunrise. Each limb is resolved independently, so one failure never hides
//! the others.

use chrono_tz::Tz;
use kaal_oracle::{Body, Oracle, OracleError};
use kaal_time::Instant;
use kaal_vedic_base::{Classifier, normalize_360};
use tracing::warn;

use crate::boundary::find_boundary;
use crate::boundary_types::BoundaryPolicy;
use crate::day::DayContext;
use crate::error::SearchError;
use crate::panchang_types::{ElementSpan, PanchangConfig, PanchangElement, PanchangElements};

/// An oracle angle, or `OracleUnavailable` when it is NaN or infinite.
pub(crate) fn finite_deg(deg: f64, what: &'static str) -> Result<f64, SearchError> {
    if deg.is_finite() {
        Ok(deg)
    } else {
        Err(OracleError::Unavailable(format!("non-finite {what}: {deg}")).into())
    }
}

/// Sample the oracle and classify it.
///
/// Tithi and karana use the Moon-Sun elongation, nakshatra and rashi the
/// Moon's longitude, yoga the sum of both longitudes.
pub fn element_index<O: Oracle + ?Sized>(
    oracle: &O,
    classifier: Classifier,
    at: &Instant,
) -> Result<u8, SearchError> {
    let deg = match classifier {
        Classifier::Tithi | Classifier::Karana => {
            finite_deg(oracle.elongation(at)?, "elongation")?
        }
        Classifier::Nakshatra | Classifier::Rashi => {
            finite_deg(oracle.longitude(at, Body::Moon)?, "moon longitude")?
        }
        Classifier::Yoga => {
            let sun = finite_deg(oracle.longitude(at, Body::Sun)?, "sun longitude")?;
            let moon = finite_deg(oracle.longitude(at, Body::Moon)?, "moon longitude")?;
            normalize_360(sun + moon)
        }
    };
    Ok(classifier.index(deg))
}

fn vara_span<O: Oracle + ?Sized>(
    oracle: &O,
    at: &Instant,
    tz: Tz,
) -> Result<ElementSpan, SearchError> {
    let mut days = DayContext::new(oracle, *at.location(), tz);
    let day = days
        .day_of(at)?
        .ok_or(SearchError::DegenerateDay(at.local(&tz).date_naive()))?;
    Ok(ElementSpan {
        element: PanchangElement::Vara,
        index: day.weekday.num_days_from_sunday() as u8 + 1,
        end: day.parts.next_sunrise(),
        estimated: false,
    })
}

/// Value of `element` at `at` and the instant it ends.
///
/// With [`BoundaryPolicy::NominalFallback`], a `BoundaryNotFound` becomes an
/// end of `at + nominal_period` marked `estimated`. Every other error is
/// returned as is.
pub fn element_span<O: Oracle + ?Sized>(
    oracle: &O,
    element: PanchangElement,
    at: &Instant,
    config: &PanchangConfig,
    policy: BoundaryPolicy,
) -> Result<ElementSpan, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    let Some(classifier) = element.classifier() else {
        return vara_span(oracle, at, config.timezone);
    };

    let index = element_index(oracle, classifier, at)?;
    let boundary = config
        .boundary_for(element)
        .ok_or(SearchError::InvalidConfig("search horizon out of range"))?;
    match find_boundary(at, index, |t| element_index(oracle, classifier, t), &boundary) {
        Ok(end) => Ok(ElementSpan {
            element,
            index,
            end,
            estimated: false,
        }),
        Err(SearchError::BoundaryNotFound { horizon, .. })
            if policy == BoundaryPolicy::NominalFallback =>
        {
            let end = at.checked_add(element.nominal_period())?;
            warn!(
                element = %element,
                at = %at,
                horizon = %horizon,
                "boundary not found, using nominal period"
            );
            Ok(ElementSpan {
                element,
                index,
                end,
                estimated: true,
            })
        }
        Err(e) => Err(e),
    }
}

/// All five panchang elements at `at`, each an independent result.
pub fn panchang_elements<O: Oracle + ?Sized>(
    oracle: &O,
    at: &Instant,
    config: &PanchangConfig,
    policy: BoundaryPolicy,
) -> PanchangElements {
    let span = |element| element_span(oracle, element, at, config, policy);
    PanchangElements {
        at: *at,
        tithi: span(PanchangElement::Tithi),
        nakshatra: span(PanchangElement::Nakshatra),
        yoga: span(PanchangElement::Yoga),
        karana: span(PanchangElement::Karana),
        vara: span(PanchangElement::Vara),
    }
}
