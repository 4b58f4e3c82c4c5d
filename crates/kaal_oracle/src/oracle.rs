//! The oracle contract.

use kaal_time::Instant;

use crate::body::Body;
use crate::error::OracleError;

/// A pure function of (instant, location) supplying zodiacal samples.
///
/// All longitudes share one zodiacal frame, whichever convention the backend
/// uses; the engine never applies its own offset. Location comes from the
/// [`Instant`].
pub trait Oracle {
    /// Ecliptic longitude of `body` in degrees [0, 360).
    fn longitude(&self, at: &Instant, body: Body) -> Result<f64, OracleError>;

    /// Ascendant (rising ecliptic degree) in degrees [0, 360).
    fn ascendant(&self, at: &Instant) -> Result<f64, OracleError>;

    /// Twelve house cusps in degrees, cusp 1 first.
    fn house_cusps(&self, at: &Instant) -> Result<[f64; 12], OracleError>;

    /// Next rise of `body` at or after `at`; `None` if it does not rise
    /// within the following day.
    fn rise_event(&self, at: &Instant, body: Body) -> Result<Option<Instant>, OracleError>;

    /// Next set of `body` at or after `at`; `None` if it does not set
    /// within the following day.
    fn set_event(&self, at: &Instant, body: Body) -> Result<Option<Instant>, OracleError>;

    /// Moon minus Sun longitude in degrees [0, 360).
    fn elongation(&self, at: &Instant) -> Result<f64, OracleError> {
        let moon = self.longitude(at, Body::Moon)?;
        let sun = self.longitude(at, Body::Sun)?;
        Ok((moon - sun).rem_euclid(360.0))
    }
}

impl<T: Oracle + ?Sized> Oracle for &T {
    fn longitude(&self, at: &Instant, body: Body) -> Result<f64, OracleError> {
        (**self).longitude(at, body)
    }

    fn ascendant(&self, at: &Instant) -> Result<f64, OracleError> {
        (**self).ascendant(at)
    }

    fn house_cusps(&self, at: &Instant) -> Result<[f64; 12], OracleError> {
        (**self).house_cusps(at)
    }

    fn rise_event(&self, at: &Instant, body: Body) -> Result<Option<Instant>, OracleError> {
        (**self).rise_event(at, body)
    }

    fn set_event(&self, at: &Instant, body: Body) -> Result<Option<Instant>, OracleError> {
        (**self).set_event(at, body)
    }

    fn elongation(&self, at: &Instant) -> Result<f64, OracleError> {
        (**self).elongation(at)
    }
}
