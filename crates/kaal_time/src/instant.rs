//! A UTC moment bound to an observer location.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use serde::Serialize;

use crate::error::TimeError;
use crate::julian::utc_to_jd;
use crate::location::GeoLocation;

/// Absolute point in time plus the location relevant to rise/set and
/// ascendant queries.
///
/// Equality, ordering and hashing consider the UTC time only.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Instant {
    utc: DateTime<Utc>,
    location: GeoLocation,
}

impl Instant {
    pub fn new(utc: DateTime<Utc>, location: GeoLocation) -> Self {
        Self { utc, location }
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Same location, different moment.
    pub fn with_utc(&self, utc: DateTime<Utc>) -> Self {
        Self {
            utc,
            location: self.location,
        }
    }

    /// Julian Date on the UTC scale.
    pub fn jd_utc(&self) -> f64 {
        utc_to_jd(&self.utc)
    }

    /// Local wall-clock representation in `tz`.
    pub fn local<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        self.utc.with_timezone(tz)
    }

    /// Checked forward shift.
    pub fn checked_add(&self, delta: TimeDelta) -> Result<Self, TimeError> {
        self.utc
            .checked_add_signed(delta)
            .map(|utc| self.with_utc(utc))
            .ok_or(TimeError::OutOfRange("instant addition overflowed"))
    }

    /// Checked backward shift.
    pub fn checked_sub(&self, delta: TimeDelta) -> Result<Self, TimeError> {
        self.utc
            .checked_sub_signed(delta)
            .map(|utc| self.with_utc(utc))
            .ok_or(TimeError::OutOfRange("instant subtraction overflowed"))
    }

    /// Halfway point between `self` and `other`.
    pub fn midpoint(&self, other: &Instant) -> Instant {
        let half = (other.utc - self.utc) / 2;
        self.with_utc(self.utc + half)
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.utc == other.utc
    }
}

impl Eq for Instant {}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc.cmp(&other.utc)
    }
}

impl Hash for Instant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.utc.hash(state);
    }
}

impl Add<TimeDelta> for Instant {
    type Output = Instant;

    fn add(self, rhs: TimeDelta) -> Instant {
        self.with_utc(self.utc + rhs)
    }
}

impl Sub<TimeDelta> for Instant {
    type Output = Instant;

    fn sub(self, rhs: TimeDelta) -> Instant {
        self.with_utc(self.utc - rhs)
    }
}

impl Sub for Instant {
    type Output = TimeDelta;

    fn sub(self, rhs: Instant) -> TimeDelta {
        self.utc - rhs.utc
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.utc.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Parse a UTC date/time.
///
/// Accepts RFC 3339 (`2024-03-20T06:30:00Z`, any offset), a naive
/// `YYYY-MM-DDThh:mm[:ss]` taken as UTC, or a bare `YYYY-MM-DD` at midnight.
pub fn parse_utc(s: &str) -> Result<DateTime<Utc>, TimeError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimeError::Parse(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn delhi() -> GeoLocation {
        GeoLocation::new(28.6139, 77.2090, 0.0)
    }

    fn at(h: u32) -> Instant {
        Instant::new(Utc.with_ymd_and_hms(2024, 1, 15, h, 0, 0).unwrap(), delhi())
    }

    #[test]
    fn equality_ignores_location() {
        let a = at(6);
        let b = Instant::new(a.utc(), GeoLocation::new(0.0, 0.0, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn ordering_by_time() {
        assert!(at(6) < at(7));
        assert_eq!(at(6).max(at(9)), at(9));
    }

    #[test]
    fn add_and_sub() {
        let t = at(6) + TimeDelta::hours(3);
        assert_eq!(t, at(9));
        assert_eq!(t - at(6), TimeDelta::hours(3));
        assert_eq!(t.location(), &delhi());
    }

    #[test]
    fn midpoint_between() {
        assert_eq!(at(6).midpoint(&at(8)), at(7));
    }

    #[test]
    fn local_offset() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(at(6).local(&ist).hour(), 11);
    }

    #[test]
    fn parse_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 20, 6, 30, 0).unwrap();
        assert_eq!(parse_utc("2024-03-20T06:30:00Z").unwrap(), expected);
        assert_eq!(parse_utc("2024-03-20T12:00:00+05:30").unwrap(), expected);
        assert_eq!(parse_utc("2024-03-20T06:30").unwrap(), expected);
        assert_eq!(
            parse_utc("2024-03-20").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_garbage() {
        assert!(matches!(parse_utc("yesterday"), Err(TimeError::Parse(_))));
    }

    #[test]
    fn display_rfc3339() {
        assert_eq!(at(6).to_string(), "2024-01-15T06:00:00Z");
    }
}
