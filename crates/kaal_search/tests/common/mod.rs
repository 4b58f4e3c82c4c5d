//! Synthetic oracles for search tests. No kernel files needed.

#![allow(dead_code)]

use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
use kaal_oracle::{Body, Oracle, OracleError};
use kaal_time::{GeoLocation, Instant};

pub const SUN_DEG_PER_DAY: f64 = 0.985_647;
pub const MOON_DEG_PER_DAY: f64 = 13.176_358;

pub fn epoch() -> Instant {
    Instant::new(
        Utc.with_ymd_and_hms(2024, 4, 8, 0, 0, 0).unwrap(),
        GeoLocation::new(23.0, 72.6, 50.0),
    )
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Instant {
    Instant::new(
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap(),
        epoch().location().to_owned(),
    )
}

/// Bodies move linearly from `epoch()`; the Sun rises at 06:00 and sets at
/// 18:00 UTC every day.
#[derive(Debug, Clone, Default)]
pub struct LinearOracle {
    pub sun0: f64,
    pub moon0: f64,
    /// Multiplier on every daily motion; 0 freezes the sky.
    pub speed: f64,
    /// Sun longitude queries fail.
    pub sun_unavailable: bool,
    /// Moon longitude and ascendant come back as NaN.
    pub nan_sky: bool,
    /// Sunsets on these dates are unresolved.
    pub no_sunset_on: Vec<NaiveDate>,
}

impl LinearOracle {
    pub fn new(sun0: f64, moon0: f64) -> Self {
        Self {
            sun0,
            moon0,
            speed: 1.0,
            ..Self::default()
        }
    }

    fn days(&self, at: &Instant) -> f64 {
        (*at - epoch()).num_milliseconds() as f64 / 86_400_000.0 * self.speed
    }
}

fn next_at_hour(at: &Instant, hour: u32) -> Instant {
    let same_day = at.utc().date_naive().and_hms_opt(hour, 0, 0).unwrap().and_utc();
    let t = if same_day >= at.utc() {
        same_day
    } else {
        same_day + TimeDelta::days(1)
    };
    at.with_utc(t)
}

impl Oracle for LinearOracle {
    fn longitude(&self, at: &Instant, body: Body) -> Result<f64, OracleError> {
        let d = self.days(at);
        match body {
            Body::Sun if self.sun_unavailable => {
                Err(OracleError::Unavailable("solar table missing".into()))
            }
            Body::Sun => Ok((self.sun0 + SUN_DEG_PER_DAY * d).rem_euclid(360.0)),
            Body::Moon if self.nan_sky => Ok(f64::NAN),
            Body::Moon => Ok((self.moon0 + MOON_DEG_PER_DAY * d).rem_euclid(360.0)),
            // Inner planets hug the Sun, outer ones sit opposite.
            Body::Mercury | Body::Venus => {
                Ok((self.sun0 + 5.0 + SUN_DEG_PER_DAY * d).rem_euclid(360.0))
            }
            _ => Ok((self.sun0 + 180.0 + 0.1 * d).rem_euclid(360.0)),
        }
    }

    fn ascendant(&self, at: &Instant) -> Result<f64, OracleError> {
        if self.nan_sky {
            return Ok(f64::NAN);
        }
        Ok((360.985_6 * self.days(at)).rem_euclid(360.0))
    }

    fn house_cusps(&self, at: &Instant) -> Result<[f64; 12], OracleError> {
        let asc = self.ascendant(at)?;
        Ok(std::array::from_fn(|i| (asc + 30.0 * i as f64).rem_euclid(360.0)))
    }

    fn rise_event(&self, at: &Instant, _body: Body) -> Result<Option<Instant>, OracleError> {
        Ok(Some(next_at_hour(at, 6)))
    }

    fn set_event(&self, at: &Instant, _body: Body) -> Result<Option<Instant>, OracleError> {
        let set = next_at_hour(at, 18);
        if self.no_sunset_on.contains(&set.utc().date_naive()) {
            return Ok(None);
        }
        Ok(Some(set))
    }
}
