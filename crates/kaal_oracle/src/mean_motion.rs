//! Mean-motion reference oracle.
//!
//! Bodies move uniformly on circular, coplanar orbits: the Sun and Moon on
//! their geocentric mean longitudes, the planets on heliocentric mean
//! longitudes projected from the Earth's position, and the nodes on the mean
//! node. Sunrise/sunset solve the standard hour-angle equation with the mean
//! Sun's declination. Typical error is one degree for the Sun and Moon and a
//! few degrees for the planets.

use std::f64::consts::{PI, TAU};

use chrono::TimeDelta;
use kaal_time::{Instant, centuries_since_j2000, jd_to_utc};
use tracing::trace;

use crate::body::Body;
use crate::error::OracleError;
use crate::oracle::Oracle;

/// Mean obliquity of the ecliptic at J2000 (degrees).
const OBLIQUITY_DEG: f64 = 23.439_291;

/// Sidereal rotation rate in degrees per day.
const SIDEREAL_RATE_DEG: f64 = 360.985_647_366_29;

/// Rise/set refinement passes.
const MAX_ITERATIONS: usize = 4;

/// Configuration for [`MeanMotionOracle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanMotionConfig {
    /// Report sidereal longitudes (tropical minus a linear ayanamsha).
    pub sidereal: bool,
    /// Ayanamsha at J2000 in degrees.
    pub ayanamsha_j2000_deg: f64,
    /// Ayanamsha rate in degrees per Julian century.
    pub precession_deg_per_century: f64,
    /// Altitude of the Sun's center at rise/set, degrees (negative = below horizon).
    pub rise_altitude_deg: f64,
}

impl Default for MeanMotionConfig {
    fn default() -> Self {
        Self {
            sidereal: true,
            ayanamsha_j2000_deg: 23.853,
            precession_deg_per_century: 1.396_9,
            rise_altitude_deg: -50.0 / 60.0,
        }
    }
}

impl MeanMotionConfig {
    /// Tropical longitudes, standard rise altitude.
    pub fn tropical() -> Self {
        Self {
            sidereal: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.ayanamsha_j2000_deg.is_finite() || !self.precession_deg_per_century.is_finite() {
            return Err("ayanamsha parameters must be finite");
        }
        if !(-5.0..=5.0).contains(&self.rise_altitude_deg) {
            return Err("rise_altitude_deg must be within [-5, 5]");
        }
        Ok(())
    }

    /// Ayanamsha in degrees at `t` Julian centuries from J2000.
    pub fn ayanamsha_deg(&self, t: f64) -> f64 {
        self.ayanamsha_j2000_deg + self.precession_deg_per_century * t
    }
}

/// Self-contained oracle built from linear mean longitudes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanMotionOracle {
    config: MeanMotionConfig,
}

/// (L0 at J2000, rate per century, semi-major axis AU) for heliocentric planets.
fn planet_elements(body: Body) -> Option<(f64, f64, f64)> {
    match body {
        Body::Mercury => Some((252.250_906, 149_472.674_635_8, 0.387_098)),
        Body::Venus => Some((181.979_801, 58_517.815_676_0, 0.723_330)),
        Body::Mars => Some((355.433_275, 19_140.299_331_3, 1.523_688)),
        Body::Jupiter => Some((34.351_484, 3_034.905_674_6, 5.202_603)),
        Body::Saturn => Some((49.944_532, 1_222.113_794_3, 9.554_909)),
        _ => None,
    }
}

fn sun_mean_longitude(t: f64) -> f64 {
    (280.466_46 + 36_000.769_83 * t).rem_euclid(360.0)
}

/// Tropical geocentric mean longitude in degrees [0, 360).
pub(crate) fn tropical_longitude(body: Body, t: f64) -> f64 {
    match body {
        Body::Sun => sun_mean_longitude(t),
        Body::Moon => (218.316_447_7 + 481_267.881_234_21 * t).rem_euclid(360.0),
        Body::Rahu => (125.044_555 - 1_934.136_185 * t).rem_euclid(360.0),
        Body::Ketu => (125.044_555 - 1_934.136_185 * t + 180.0).rem_euclid(360.0),
        planet => {
            let Some((l0, rate, a)) = planet_elements(planet) else {
                return 0.0;
            };
            let lp = (l0 + rate * t).to_radians();
            // Earth sits opposite the Sun at 1 AU.
            let le = (sun_mean_longitude(t) + 180.0).to_radians();
            let x = a * lp.cos() - le.cos();
            let y = a * lp.sin() - le.sin();
            y.atan2(x).to_degrees().rem_euclid(360.0)
        }
    }
}

/// Greenwich mean sidereal time in degrees.
fn gmst_deg(jd_ut: f64) -> f64 {
    let d = jd_ut - kaal_time::J2000_JD;
    let t = d / 36_525.0;
    (280.460_618_37 + SIDEREAL_RATE_DEG * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0)
        .rem_euclid(360.0)
}

/// Mean Sun right ascension and declination in radians.
fn sun_ra_dec(jd_ut: f64) -> (f64, f64) {
    let lambda = sun_mean_longitude(centuries_since_j2000(jd_ut)).to_radians();
    let eps = OBLIQUITY_DEG.to_radians();
    let ra = (eps.cos() * lambda.sin()).atan2(lambda.cos()).rem_euclid(TAU);
    let dec = (eps.sin() * lambda.sin()).asin();
    (ra, dec)
}

fn wrap_pi(x: f64) -> f64 {
    let r = x.rem_euclid(TAU);
    if r > PI { r - TAU } else { r }
}

impl MeanMotionOracle {
    pub fn new(config: MeanMotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MeanMotionConfig {
        &self.config
    }

    fn frame_offset(&self, t: f64) -> f64 {
        if self.config.sidereal {
            self.config.ayanamsha_deg(t)
        } else {
            0.0
        }
    }

    /// Solar rise/set for the UT day starting at `jd_midnight`.
    ///
    /// `None` when the Sun stays above or below the target altitude.
    fn solar_event_jd(
        &self,
        jd_midnight: f64,
        latitude_deg: f64,
        longitude_deg: f64,
        rising: bool,
    ) -> Option<f64> {
        let phi = latitude_deg.to_radians();
        let h0 = self.config.rise_altitude_deg.to_radians();
        let rate = SIDEREAL_RATE_DEG.to_radians();

        let mut jd = jd_midnight + 0.5 - longitude_deg / 360.0;
        for _ in 0..MAX_ITERATIONS {
            let (ra, dec) = sun_ra_dec(jd);
            let cos_h = (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
            if !(-1.0..=1.0).contains(&cos_h) {
                return None;
            }
            let h_target = if rising { -cos_h.acos() } else { cos_h.acos() };
            let lst = (gmst_deg(jd) + longitude_deg).to_radians();
            let ha = wrap_pi(lst - ra);
            jd += wrap_pi(h_target - ha) / rate;
        }
        Some(jd)
    }

    fn solar_event(&self, at: &Instant, rising: bool) -> Result<Option<Instant>, OracleError> {
        let loc = at.location();
        loc.validate()?;
        let jd_at = at.jd_utc();
        let day0 = (jd_at - 0.5).floor() + 0.5;

        // Candidate days around `at`; keep the earliest event not before it.
        let mut best: Option<f64> = None;
        for offset in -1..=2 {
            let day = day0 + offset as f64;
            let Some(jd) =
                self.solar_event_jd(day, loc.latitude_deg, loc.longitude_deg, rising)
            else {
                continue;
            };
            if jd >= jd_at && jd - jd_at <= 1.5 && best.is_none_or(|b| jd < b) {
                best = Some(jd);
            }
        }

        let Some(jd) = best else {
            trace!(rising, jd_at, "no solar event near instant");
            return Ok(None);
        };
        let utc = jd_to_utc(jd)
            .ok_or_else(|| OracleError::Unavailable("event time out of range".to_string()))?;
        // Round to the second so repeated queries are stable.
        let utc = utc - TimeDelta::nanoseconds(utc.timestamp_subsec_nanos() as i64);
        Ok(Some(at.with_utc(utc).max(*at)))
    }
}

impl Oracle for MeanMotionOracle {
    fn longitude(&self, at: &Instant, body: Body) -> Result<f64, OracleError> {
        let t = centuries_since_j2000(at.jd_utc());
        Ok((tropical_longitude(body, t) - self.frame_offset(t)).rem_euclid(360.0))
    }

    fn ascendant(&self, at: &Instant) -> Result<f64, OracleError> {
        let loc = at.location();
        loc.validate()?;
        let jd = at.jd_utc();
        let ramc = (gmst_deg(jd) + loc.longitude_deg).to_radians();
        let eps = OBLIQUITY_DEG.to_radians();
        let phi = loc.latitude_rad();
        let asc = ramc
            .cos()
            .atan2(-(ramc.sin() * eps.cos() + phi.tan() * eps.sin()))
            .to_degrees();
        let t = centuries_since_j2000(jd);
        Ok((asc - self.frame_offset(t)).rem_euclid(360.0))
    }

    fn house_cusps(&self, at: &Instant) -> Result<[f64; 12], OracleError> {
        let asc = self.ascendant(at)?;
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = (asc + 30.0 * i as f64).rem_euclid(360.0);
        }
        Ok(cusps)
    }

    fn rise_event(&self, at: &Instant, body: Body) -> Result<Option<Instant>, OracleError> {
        match body {
            Body::Sun => self.solar_event(at, true),
            other => Err(OracleError::UnsupportedBody(other)),
        }
    }

    fn set_event(&self, at: &Instant, body: Body) -> Result<Option<Instant>, OracleError> {
        match body {
            Body::Sun => self.solar_event(at, false),
            other => Err(OracleError::UnsupportedBody(other)),
        }
    }
}
