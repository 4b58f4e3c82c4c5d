//! Birth balance from the Moon's position in its nakshatra.

use chrono::TimeDelta;
use kaal_time::{delta_from_nanos, delta_to_nanos};
use serde::Serialize;

use crate::classify::nakshatra_position;

/// Where the subject's reference instant falls in the entry period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirthBalance {
    /// 1-based nakshatra of the Moon.
    pub nakshatra: u8,
    /// Position of the entry ruler in a sequence of `sequence_len` rulers.
    pub ruler_index: usize,
    /// Fraction of the nakshatra (and so of the entry period) already
    /// traversed, in [0, 1).
    pub elapsed_fraction: f64,
}

impl BirthBalance {
    /// Elapsed part of an entry period of length `period`.
    pub fn elapsed_in(&self, period: TimeDelta) -> Option<TimeDelta> {
        let nanos = (delta_to_nanos(period) as f64 * self.elapsed_fraction).round();
        delta_from_nanos(nanos as i128)
    }

    /// Remaining part of an entry period of length `period`.
    pub fn balance_in(&self, period: TimeDelta) -> Option<TimeDelta> {
        self.elapsed_in(period).map(|elapsed| period - elapsed)
    }
}

/// Compute the birth balance for a nakshatra-keyed sequence.
///
/// Nakshatras map onto rulers cyclically: nakshatra `k` (1-based) starts the
/// ruler at `(k - 1) mod sequence_len`.
pub fn nakshatra_birth_balance(moon_sidereal_lon: f64, sequence_len: usize) -> BirthBalance {
    let pos = nakshatra_position(moon_sidereal_lon);
    BirthBalance {
        nakshatra: pos.nakshatra,
        ruler_index: (pos.nakshatra as usize - 1) % sequence_len.max(1),
        elapsed_fraction: pos.elapsed_fraction.min(1.0 - f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::NAKSHATRA_SPAN_27;

    #[test]
    fn balance_at_start_of_nakshatra() {
        let b = nakshatra_birth_balance(0.0, 9);
        assert_eq!(b.nakshatra, 1);
        assert_eq!(b.ruler_index, 0);
        assert!(b.elapsed_fraction.abs() < 1e-10);
        let p = TimeDelta::days(2557);
        assert_eq!(b.balance_in(p), Some(p));
    }

    #[test]
    fn balance_at_midpoint() {
        let b = nakshatra_birth_balance(NAKSHATRA_SPAN_27 / 2.0, 9);
        assert!((b.elapsed_fraction - 0.5).abs() < 1e-10);
        let p = TimeDelta::days(100);
        assert_eq!(b.elapsed_in(p), Some(TimeDelta::days(50)));
    }

    #[test]
    fn rulers_repeat_every_nine_nakshatras() {
        // Magha (10) and Mula (19) share Ashwini's ruler.
        let magha = nakshatra_birth_balance(9.0 * NAKSHATRA_SPAN_27 + 1.0, 9);
        let mula = nakshatra_birth_balance(18.0 * NAKSHATRA_SPAN_27 + 1.0, 9);
        assert_eq!((magha.nakshatra, magha.ruler_index), (10, 0));
        assert_eq!((mula.nakshatra, mula.ruler_index), (19, 0));
        // Revati (27) -> last ruler.
        assert_eq!(nakshatra_birth_balance(359.9, 9).ruler_index, 8);
    }

    #[test]
    fn negative_longitude_wraps() {
        let b = nakshatra_birth_balance(-0.1, 9);
        assert_eq!(b.nakshatra, 27);
    }
}
