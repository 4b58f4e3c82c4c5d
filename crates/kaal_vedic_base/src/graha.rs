//! The 9 grahas and weekday lordship.

use chrono::Weekday;
use kaal_oracle::Body;
use serde::Serialize;

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        match self {
            Self::Surya => 0,
            Self::Chandra => 1,
            Self::Mangal => 2,
            Self::Buddh => 3,
            Self::Guru => 4,
            Self::Shukra => 5,
            Self::Shani => 6,
            Self::Rahu => 7,
            Self::Ketu => 8,
        }
    }

    /// Oracle body for position queries.
    pub const fn body(self) -> Body {
        match self {
            Self::Surya => Body::Sun,
            Self::Chandra => Body::Moon,
            Self::Mangal => Body::Mars,
            Self::Buddh => Body::Mercury,
            Self::Guru => Body::Jupiter,
            Self::Shukra => Body::Venus,
            Self::Shani => Body::Saturn,
            Self::Rahu => Body::Rahu,
            Self::Ketu => Body::Ketu,
        }
    }
}

impl std::fmt::Display for Graha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lord of a weekday (Sunday = Surya ... Saturday = Shani).
pub const fn weekday_lord(day: Weekday) -> Graha {
    match day {
        Weekday::Sun => Graha::Surya,
        Weekday::Mon => Graha::Chandra,
        Weekday::Tue => Graha::Mangal,
        Weekday::Wed => Graha::Buddh,
        Weekday::Thu => Graha::Guru,
        Weekday::Fri => Graha::Shukra,
        Weekday::Sat => Graha::Shani,
    }
}
