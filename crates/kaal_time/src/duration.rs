//! Exact duration arithmetic.
//!
//! Proportional splitting of multi-decade periods is done on integer
//! nanoseconds (`i128`) so sibling durations add up to their parent without
//! floating-point drift. Fractional days are only used at the edges.

use chrono::TimeDelta;

/// Seconds in one civil day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Nanoseconds in one civil day.
pub const NANOS_PER_DAY: i128 = 86_400 * 1_000_000_000;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Total nanoseconds in a `TimeDelta`, without overflow.
pub fn delta_to_nanos(delta: TimeDelta) -> i128 {
    delta.num_seconds() as i128 * NANOS_PER_SECOND + delta.subsec_nanos() as i128
}

/// Build a `TimeDelta` from nanoseconds. `None` if out of chrono's range.
pub fn delta_from_nanos(nanos: i128) -> Option<TimeDelta> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok()?;
    let sub = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    TimeDelta::new(secs, sub)
}

/// Convert fractional days to a `TimeDelta`, rounded to the nanosecond.
pub fn delta_from_days(days: f64) -> Option<TimeDelta> {
    if !days.is_finite() {
        return None;
    }
    let nanos = (days * NANOS_PER_DAY as f64).round();
    if nanos.abs() > i128::MAX as f64 {
        return None;
    }
    delta_from_nanos(nanos as i128)
}

/// Convert a `TimeDelta` to fractional days.
pub fn delta_to_days(delta: TimeDelta) -> f64 {
    delta_to_nanos(delta) as f64 / NANOS_PER_DAY as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nanos_positive() {
        let d = TimeDelta::seconds(90) + TimeDelta::nanoseconds(5);
        assert_eq!(delta_to_nanos(d), 90_000_000_005);
        assert_eq!(delta_from_nanos(90_000_000_005), Some(d));
    }

    #[test]
    fn nanos_negative() {
        let d = TimeDelta::nanoseconds(-1_500_000_000);
        assert_eq!(delta_to_nanos(d), -1_500_000_000);
        assert_eq!(delta_from_nanos(-1_500_000_000), Some(d));
    }

    #[test]
    fn one_twenty_years_fits() {
        let days = 120.0 * 365.25;
        let d = delta_from_days(days).unwrap();
        assert!((delta_to_days(d) - days).abs() < 1e-9);
    }

    #[test]
    fn non_finite_days_rejected() {
        assert!(delta_from_days(f64::NAN).is_none());
        assert!(delta_from_days(f64::INFINITY).is_none());
    }

    #[test]
    fn half_day() {
        let d = delta_from_days(0.5).unwrap();
        assert_eq!(d, TimeDelta::hours(12));
    }
}
