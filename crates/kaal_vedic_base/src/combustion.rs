//! Angular proximity between bodies (combustion / asta).
//!
//! A graha is combust when it is too close to the Sun. Distances use the
//! shortest arc on the ecliptic circle, so 355 deg and 5 deg are 10 deg apart.

use crate::graha::Graha;
use crate::util::angular_distance;

/// Combustion threshold (degrees from Sun) for a graha moving direct.
///
/// Returns `None` for Sun, Rahu, and Ketu (not applicable).
pub fn combustion_threshold(graha: Graha) -> Option<f64> {
    match graha {
        Graha::Surya | Graha::Rahu | Graha::Ketu => None,
        Graha::Chandra => Some(12.0),
        Graha::Mangal => Some(17.0),
        Graha::Buddh => Some(14.0),
        Graha::Guru => Some(11.0),
        Graha::Shukra => Some(10.0),
        Graha::Shani => Some(15.0),
    }
}

/// `true` when the two longitudes are strictly closer than `orb_deg`.
pub fn within_orb(a_deg: f64, b_deg: f64, orb_deg: f64) -> bool {
    angular_distance(a_deg, b_deg) < orb_deg
}

/// Check if a graha is combust. At exactly the threshold it is **not**.
pub fn is_combust(graha: Graha, graha_lon: f64, sun_lon: f64) -> bool {
    match combustion_threshold(graha) {
        Some(t) => within_orb(graha_lon, sun_lon, t),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_nodes_none() {
        assert!(combustion_threshold(Graha::Rahu).is_none());
        assert!(combustion_threshold(Graha::Surya).is_none());
    }

    #[test]
    fn venus_wraparound_combust() {
        assert!(is_combust(Graha::Shukra, 355.0, 3.0));
    }

    #[test]
    fn exactly_at_threshold_not_combust() {
        assert!(!is_combust(Graha::Guru, 111.0, 100.0));
    }

    #[test]
    fn rahu_never_combust() {
        assert!(!is_combust(Graha::Rahu, 100.0, 100.0));
    }

    #[test]
    fn orb_symmetry() {
        assert_eq!(within_orb(10.0, 20.0, 10.5), within_orb(20.0, 10.0, 10.5));
    }
}
