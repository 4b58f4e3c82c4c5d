//! Julian Date conversions on the UTC scale.

use chrono::{DateTime, Utc};

use crate::duration::NANOS_PER_DAY;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Julian Date of J2000.0 (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date (UTC) of a moment.
pub fn utc_to_jd(utc: &DateTime<Utc>) -> f64 {
    let since_epoch =
        utc.timestamp() as i128 * NANOS_PER_SECOND + utc.timestamp_subsec_nanos() as i128;
    UNIX_EPOCH_JD + since_epoch as f64 / NANOS_PER_DAY as f64
}

/// Moment for a Julian Date (UTC). `None` if out of range.
pub fn jd_to_utc(jd: f64) -> Option<DateTime<Utc>> {
    if !jd.is_finite() {
        return None;
    }
    let nanos = ((jd - UNIX_EPOCH_JD) * NANOS_PER_DAY as f64).round();
    let nanos = nanos as i128;
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok()?;
    DateTime::from_timestamp(secs, nanos.rem_euclid(NANOS_PER_SECOND) as u32)
}

/// Julian centuries elapsed since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}
