//! Types for panchang element spans.

use chrono::TimeDelta;
use chrono_tz::Tz;
use kaal_time::Instant;
use kaal_vedic_base::Classifier;
use serde::Serialize;

use crate::boundary_types::BoundaryConfig;
use crate::error::SearchError;

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_589;

/// Mean sidereal month in days.
pub const SIDEREAL_MONTH_DAYS: f64 = 27.321_662;

/// Mean daily motion of the Sun plus the Moon, in degrees.
const SUN_PLUS_MOON_DEG_PER_DAY: f64 = 0.985_647 + 13.176_358;

/// The five limbs of the panchang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PanchangElement {
    Tithi,
    Nakshatra,
    Yoga,
    Karana,
    /// Weekday of the Vedic day.
    Vara,
}

pub const ALL_ELEMENTS: [PanchangElement; 5] = [
    PanchangElement::Tithi,
    PanchangElement::Nakshatra,
    PanchangElement::Yoga,
    PanchangElement::Karana,
    PanchangElement::Vara,
];

impl PanchangElement {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tithi => "Tithi",
            Self::Nakshatra => "Nakshatra",
            Self::Yoga => "Yoga",
            Self::Karana => "Karana",
            Self::Vara => "Vara",
        }
    }

    /// Longitude classifier; `None` for vara, which follows sunrise.
    pub const fn classifier(self) -> Option<Classifier> {
        match self {
            Self::Tithi => Some(Classifier::Tithi),
            Self::Nakshatra => Some(Classifier::Nakshatra),
            Self::Yoga => Some(Classifier::Yoga),
            Self::Karana => Some(Classifier::Karana),
            Self::Vara => None,
        }
    }

    /// Mean duration of one element value.
    pub fn nominal_period(self) -> TimeDelta {
        let days = match self {
            Self::Tithi => SYNODIC_MONTH_DAYS / 30.0,
            Self::Karana => SYNODIC_MONTH_DAYS / 60.0,
            Self::Nakshatra => SIDEREAL_MONTH_DAYS / 27.0,
            Self::Yoga => (360.0 / 27.0) / SUN_PLUS_MOON_DEG_PER_DAY,
            Self::Vara => 1.0,
        };
        TimeDelta::milliseconds((days * 86_400_000.0).round() as i64)
    }
}

impl std::fmt::Display for PanchangElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for panchang element searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanchangConfig {
    /// Probe step and bisection iterations; the horizon is derived per
    /// element from `horizon_factor`.
    pub boundary: BoundaryConfig,
    /// Search horizon as a multiple of the element's nominal period.
    pub horizon_factor: f64,
    /// Zone whose civil date selects the Vedic day.
    pub timezone: Tz,
}

impl Default for PanchangConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryConfig::default(),
            horizon_factor: 1.5,
            timezone: Tz::UTC,
        }
    }
}

impl PanchangConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        self.boundary.validate()?;
        if !self.horizon_factor.is_finite() || !(1.2..=2.0).contains(&self.horizon_factor) {
            return Err("horizon_factor must be within [1.2, 2.0]");
        }
        Ok(())
    }

    /// Boundary config for `element` with its own horizon.
    pub fn boundary_for(&self, element: PanchangElement) -> Option<BoundaryConfig> {
        BoundaryConfig::for_nominal(element.nominal_period(), self.horizon_factor).map(|b| {
            BoundaryConfig {
                probe_step: self.boundary.probe_step,
                bisection_iterations: self.boundary.bisection_iterations,
                ..b
            }
        })
    }
}

/// One element's value at a query instant and when it ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSpan {
    pub element: PanchangElement,
    /// 1-based ordinal (vara: 1 = Sunday).
    pub index: u8,
    pub end: Instant,
    /// `end` is `start + nominal_period`, not a located boundary.
    pub estimated: bool,
}

/// The five elements at one instant, each resolved independently.
#[derive(Debug, Clone, PartialEq)]
pub struct PanchangElements {
    pub at: Instant,
    pub tithi: Result<ElementSpan, SearchError>,
    pub nakshatra: Result<ElementSpan, SearchError>,
    pub yoga: Result<ElementSpan, SearchError>,
    pub karana: Result<ElementSpan, SearchError>,
    pub vara: Result<ElementSpan, SearchError>,
}

impl PanchangElements {
    /// All five results in canonical order.
    pub fn all(&self) -> [(PanchangElement, &Result<ElementSpan, SearchError>); 5] {
        [
            (PanchangElement::Tithi, &self.tithi),
            (PanchangElement::Nakshatra, &self.nakshatra),
            (PanchangElement::Yoga, &self.yoga),
            (PanchangElement::Karana, &self.karana),
            (PanchangElement::Vara, &self.vara),
        ]
    }
}
