//! Types for window scans.

use chrono::TimeDelta;
use chrono_tz::Tz;
use kaal_time::{Instant, Interval};
use kaal_vedic_base::Nature;
use serde::Serialize;

/// Configuration for window scans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Scan step (default 30 min).
    pub step: TimeDelta,
    /// Zone whose civil dates define the days of the scan.
    pub timezone: Tz,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            step: TimeDelta::minutes(30),
            timezone: Tz::UTC,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.step <= TimeDelta::zero() {
            return Err("step must be positive");
        }
        if self.step > TimeDelta::days(1) {
            return Err("step must not exceed one day");
        }
        Ok(())
    }
}

/// Grade of a muhurta window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Quality {
    Best,
    Good,
    Average,
}

impl Quality {
    /// Grade from the nature of the choghadiya in force.
    pub const fn from_nature(nature: Nature) -> Self {
        match nature {
            Nature::Good => Self::Best,
            Nature::Neutral => Self::Good,
            Nature::Bad => Self::Average,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Best => "Best",
            Self::Good => "Good",
            Self::Average => "Average",
        }
    }
}

/// A passing predicate result: grade and the factors that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment<Q> {
    pub quality: Q,
    pub factors: Vec<String>,
}

impl<Q> Assessment<Q> {
    pub fn new(quality: Q, factors: Vec<String>) -> Self {
        Self { quality, factors }
    }
}

/// A maximal run of passing scan steps with one quality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window<Q> {
    #[serde(flatten)]
    interval: Interval,
    quality: Q,
    factors: Vec<String>,
}

impl<Q> Window<Q> {
    pub(crate) fn new(interval: Interval, assessment: Assessment<Q>) -> Self {
        let mut factors = Vec::with_capacity(assessment.factors.len());
        union_into(&mut factors, assessment.factors);
        Self {
            interval,
            quality: assessment.quality,
            factors,
        }
    }

    /// This window grown over `next`, with `factors` unioned in.
    pub(crate) fn extended(self, next: Interval, factors: Vec<String>) -> Self {
        let mut merged = self.factors;
        union_into(&mut merged, factors);
        Self {
            interval: self.interval.hull(&next),
            quality: self.quality,
            factors: merged,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn start(&self) -> Instant {
        self.interval.start()
    }

    pub fn end(&self) -> Instant {
        self.interval.end()
    }

    pub fn duration(&self) -> TimeDelta {
        self.interval.duration()
    }

    pub fn quality(&self) -> &Q {
        &self.quality
    }

    /// Contributing factors in first-seen order, without duplicates.
    pub fn factors(&self) -> &[String] {
        &self.factors
    }
}

fn union_into(into: &mut Vec<String>, from: Vec<String>) {
    for f in from {
        if !into.contains(&f) {
            into.push(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_from_nature() {
        assert_eq!(Quality::from_nature(Nature::Good), Quality::Best);
        assert_eq!(Quality::from_nature(Nature::Neutral), Quality::Good);
        assert_eq!(Quality::from_nature(Nature::Bad), Quality::Average);
        assert!(Quality::Best < Quality::Average);
    }

    #[test]
    fn scan_config_bounds() {
        assert!(ScanConfig::default().validate().is_ok());
        let zero = ScanConfig {
            step: TimeDelta::zero(),
            ..ScanConfig::default()
        };
        assert!(zero.validate().is_err());
    }
}
