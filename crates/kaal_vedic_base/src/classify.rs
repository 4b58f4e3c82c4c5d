//! Classifiers: continuous degrees to discrete 1-based ordinals.
//!
//! | Quantity  | Input                    | Segment    | Modulus |
//! |-----------|--------------------------|------------|---------|
//! | Tithi     | Moon - Sun elongation    | 12 deg     | 30      |
//! | Nakshatra | body longitude           | 13 deg 20' | 27      |
//! | Yoga      | Moon + Sun longitude     | 13 deg 20' | 27      |
//! | Karana    | Moon - Sun elongation    | 6 deg      | 60      |
//! | Rashi     | body longitude           | 30 deg     | 12      |

use serde::Serialize;

use crate::util::normalize_360;

/// One tithi: 360/30 degrees of elongation.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Span of one nakshatra in the 27-scheme: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Span of one pada: 13.3333.../4 = 3.3333... degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN_27 / 4.0;

/// One yoga: 360/27 degrees of Sun+Moon longitude.
pub const YOGA_SEGMENT_DEG: f64 = 360.0 / 27.0;

/// One karana: half a tithi.
pub const KARANA_SEGMENT_DEG: f64 = 6.0;

/// One rashi (sign).
pub const RASHI_SPAN_DEG: f64 = 30.0;

/// A discretized quantity: fixed segment width and modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Classifier {
    Tithi,
    Nakshatra,
    Yoga,
    Karana,
    Rashi,
}

impl Classifier {
    /// Number of distinct ordinals.
    pub const fn modulus(self) -> u8 {
        match self {
            Self::Tithi => 30,
            Self::Nakshatra | Self::Yoga => 27,
            Self::Karana => 60,
            Self::Rashi => 12,
        }
    }

    /// Width of one ordinal in degrees.
    pub const fn segment_deg(self) -> f64 {
        match self {
            Self::Tithi => TITHI_SEGMENT_DEG,
            Self::Nakshatra => NAKSHATRA_SPAN_27,
            Self::Yoga => YOGA_SEGMENT_DEG,
            Self::Karana => KARANA_SEGMENT_DEG,
            Self::Rashi => RASHI_SPAN_DEG,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Tithi => "tithi",
            Self::Nakshatra => "nakshatra",
            Self::Yoga => "yoga",
            Self::Karana => "karana",
            Self::Rashi => "rashi",
        }
    }

    /// 1-based ordinal of `deg` (normalized to [0, 360) first).
    pub fn index(self, deg: f64) -> u8 {
        let lon = normalize_360(deg);
        let idx = (lon / self.segment_deg()).floor() as u8;
        idx.min(self.modulus() - 1) + 1
    }
}

/// Tithi 1..=30 from Moon-Sun elongation.
pub fn tithi_index(elongation_deg: f64) -> u8 {
    Classifier::Tithi.index(elongation_deg)
}

/// Nakshatra 1..=27 from a sidereal longitude.
pub fn nakshatra_index(lon_deg: f64) -> u8 {
    Classifier::Nakshatra.index(lon_deg)
}

/// Yoga 1..=27 from the sum of Sun and Moon longitudes.
pub fn yoga_index(sun_plus_moon_deg: f64) -> u8 {
    Classifier::Yoga.index(sun_plus_moon_deg)
}

/// Karana 1..=60 from Moon-Sun elongation.
pub fn karana_index(elongation_deg: f64) -> u8 {
    Classifier::Karana.index(elongation_deg)
}

/// Rashi 1..=12 from a longitude.
pub fn rashi_index(lon_deg: f64) -> u8 {
    Classifier::Rashi.index(lon_deg)
}

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Paksha {
    /// Waxing: tithis 1-15.
    Shukla,
    /// Waning: tithis 16-30.
    Krishna,
}

/// Paksha and 1-based tithi within it.
pub fn paksha_of_tithi(tithi: u8) -> (Paksha, u8) {
    if tithi <= 15 {
        (Paksha::Shukla, tithi)
    } else {
        (Paksha::Krishna, tithi - 15)
    }
}

/// Nakshatra with pada and offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraPosition {
    /// 1-based nakshatra (1 = Ashwini, 27 = Revati).
    pub nakshatra: u8,
    /// Pada (quarter) within the nakshatra, 1-4.
    pub pada: u8,
    /// Decimal degrees within the nakshatra [0.0, 13.333...).
    pub degrees_in_nakshatra: f64,
    /// Fraction of the nakshatra already traversed [0, 1).
    pub elapsed_fraction: f64,
}

pub fn nakshatra_position(lon_deg: f64) -> NakshatraPosition {
    let lon = normalize_360(lon_deg);
    let nak_idx = ((lon / NAKSHATRA_SPAN_27).floor() as u8).min(26);
    let degrees_in_nakshatra = lon - (nak_idx as f64) * NAKSHATRA_SPAN_27;
    let pada_idx = ((degrees_in_nakshatra / PADA_SPAN).floor() as u8).min(3);
    NakshatraPosition {
        nakshatra: nak_idx + 1,
        pada: pada_idx + 1,
        degrees_in_nakshatra,
        elapsed_fraction: (degrees_in_nakshatra / NAKSHATRA_SPAN_27).clamp(0.0, 1.0),
    }
}
