//! Daily muhurta tables derived from sunrise, sunset and next sunrise.
//!
//! - Choghadiya: day and night each split into 8 slots, names cycling
//!   through 7 with a weekday-dependent start
//! - Hora: the sunrise-to-sunrise day split into 24, lords following the
//!   Chaldean order from the weekday lord
//! - Rahu kalam, Yamagandam, Gulika kalam: one eighth of daylight each, at a
//!   weekday-dependent position
//!
//! All splits are exact to the nanosecond: the last slot always ends on the
//! boundary it divides.

use chrono::Weekday;
use kaal_time::{Instant, Interval, delta_from_nanos, delta_to_nanos};
use serde::Serialize;

use crate::error::VedicError;
use crate::graha::Graha;

/// Choghadiya slots per half-day.
pub const CHOGHADIYA_PER_HALF: usize = 8;

/// Horas per Vedic day.
pub const HORA_COUNT: usize = 24;

/// Eighths of daylight used by the kalam tables.
const DAY_PARTS: usize = 8;

/// Auspiciousness of a choghadiya.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Nature {
    Good,
    Neutral,
    Bad,
}

/// The 7 choghadiya names in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Choghadiya {
    Udveg,
    Chal,
    Labh,
    Amrit,
    Kaal,
    Shubh,
    Rog,
}

const CHOGHADIYA_CYCLE: [Choghadiya; 7] = [
    Choghadiya::Udveg,
    Choghadiya::Chal,
    Choghadiya::Labh,
    Choghadiya::Amrit,
    Choghadiya::Kaal,
    Choghadiya::Shubh,
    Choghadiya::Rog,
];

/// First daytime choghadiya per weekday (Sunday first).
const DAY_START_INDEX: [usize; 7] = [0, 3, 6, 2, 5, 1, 4];

/// First night choghadiya per weekday (Sunday first).
const NIGHT_START_INDEX: [usize; 7] = [5, 1, 4, 0, 3, 6, 2];

impl Choghadiya {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Udveg => "Udveg",
            Self::Chal => "Chal",
            Self::Labh => "Labh",
            Self::Amrit => "Amrit",
            Self::Kaal => "Kaal",
            Self::Shubh => "Shubh",
            Self::Rog => "Rog",
        }
    }

    pub const fn nature(self) -> Nature {
        match self {
            Self::Labh | Self::Amrit | Self::Shubh => Nature::Good,
            Self::Chal => Nature::Neutral,
            Self::Udveg | Self::Kaal | Self::Rog => Nature::Bad,
        }
    }
}

/// Chaldean hora order starting from Surya.
const HORA_CYCLE: [Graha; 7] = [
    Graha::Surya,
    Graha::Shukra,
    Graha::Buddh,
    Graha::Chandra,
    Graha::Shani,
    Graha::Guru,
    Graha::Mangal,
];

/// Position of the weekday lord in `HORA_CYCLE` (Sunday first).
const HORA_START_INDEX: [usize; 7] = [0, 3, 6, 2, 5, 1, 4];

/// Inauspicious eighth-of-day periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Kalam {
    RahuKalam,
    Yamagandam,
    GulikaKalam,
}

impl Kalam {
    pub const fn name(self) -> &'static str {
        match self {
            Self::RahuKalam => "Rahu Kalam",
            Self::Yamagandam => "Yamagandam",
            Self::GulikaKalam => "Gulika Kalam",
        }
    }

    /// 1-based eighth of daylight for the weekday.
    pub fn segment(self, day: Weekday) -> usize {
        let table: [usize; 7] = match self {
            Self::RahuKalam => [8, 2, 7, 5, 6, 4, 3],
            Self::Yamagandam => [5, 4, 3, 2, 1, 7, 6],
            Self::GulikaKalam => [7, 6, 5, 4, 3, 2, 1],
        };
        table[day.num_days_from_sunday() as usize]
    }
}

pub const ALL_KALAMS: [Kalam; 3] = [Kalam::RahuKalam, Kalam::Yamagandam, Kalam::GulikaKalam];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChoghadiyaSlot {
    pub choghadiya: Choghadiya,
    pub nature: Nature,
    /// Daytime (sunrise to sunset) or night slot.
    pub is_day: bool,
    #[serde(flatten)]
    pub interval: Interval,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoraSlot {
    pub lord: Graha,
    /// 0-based position in the day (0..24).
    pub hora_index: u8,
    #[serde(flatten)]
    pub interval: Interval,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KalamSlot {
    pub kalam: Kalam,
    #[serde(flatten)]
    pub interval: Interval,
}

/// Split `[start, end)` into `parts` equal, contiguous intervals.
pub fn split_equal(
    start: Instant,
    end: Instant,
    parts: usize,
) -> Result<Vec<Interval>, VedicError> {
    if parts == 0 {
        return Err(VedicError::InvalidInput("cannot split into zero parts"));
    }
    let total = delta_to_nanos(end - start);
    if total < parts as i128 {
        return Err(VedicError::InvalidInput("interval too short to split"));
    }
    let mut out = Vec::with_capacity(parts);
    let mut cursor = start;
    for i in 1..=parts {
        let next = if i == parts {
            end
        } else {
            let offset = delta_from_nanos(total * i as i128 / parts as i128)
                .ok_or(VedicError::InvalidInput("split offset out of range"))?;
            start + offset
        };
        out.push(Interval::new(cursor, next)?);
        cursor = next;
    }
    Ok(out)
}

/// Sunrise, sunset and next sunrise of one Vedic day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayParts {
    /// Weekday of the sunrise in local time.
    #[serde(skip)]
    pub weekday: Weekday,
    daylight: Interval,
    night: Interval,
}

impl DayParts {
    /// Requires `sunrise < sunset < next_sunrise`.
    pub fn new(
        weekday: Weekday,
        sunrise: Instant,
        sunset: Instant,
        next_sunrise: Instant,
    ) -> Result<Self, VedicError> {
        let daylight = Interval::new(sunrise, sunset)
            .map_err(|_| VedicError::InvalidInput("sunset must follow sunrise"))?;
        let night = Interval::new(sunset, next_sunrise)
            .map_err(|_| VedicError::InvalidInput("next sunrise must follow sunset"))?;
        Ok(Self {
            weekday,
            daylight,
            night,
        })
    }

    pub fn sunrise(&self) -> Instant {
        self.daylight.start()
    }

    pub fn sunset(&self) -> Instant {
        self.daylight.end()
    }

    pub fn next_sunrise(&self) -> Instant {
        self.night.end()
    }

    /// Sunrise to sunset.
    pub fn daylight(&self) -> Interval {
        self.daylight
    }

    /// Sunset to next sunrise.
    pub fn night(&self) -> Interval {
        self.night
    }

    /// Sunrise to next sunrise.
    pub fn vedic_day(&self) -> Interval {
        self.daylight.hull(&self.night)
    }

    fn choghadiya_half(&self, is_day: bool) -> Result<Vec<ChoghadiyaSlot>, VedicError> {
        let wd = self.weekday.num_days_from_sunday() as usize;
        let (half, first) = if is_day {
            (self.daylight, DAY_START_INDEX[wd])
        } else {
            (self.night, NIGHT_START_INDEX[wd])
        };
        let slots = split_equal(half.start(), half.end(), CHOGHADIYA_PER_HALF)?;
        Ok(slots
            .into_iter()
            .enumerate()
            .map(|(i, interval)| {
                let choghadiya = CHOGHADIYA_CYCLE[(first + i) % CHOGHADIYA_CYCLE.len()];
                ChoghadiyaSlot {
                    choghadiya,
                    nature: choghadiya.nature(),
                    is_day,
                    interval,
                }
            })
            .collect())
    }

    /// 8 day slots followed by 8 night slots.
    pub fn choghadiya(&self) -> Result<Vec<ChoghadiyaSlot>, VedicError> {
        let mut all = self.choghadiya_half(true)?;
        all.extend(self.choghadiya_half(false)?);
        Ok(all)
    }

    /// Choghadiya active at `t`, if `t` lies within this Vedic day.
    pub fn choghadiya_at(&self, t: &Instant) -> Result<Option<ChoghadiyaSlot>, VedicError> {
        if !self.vedic_day().contains(t) {
            return Ok(None);
        }
        let is_day = self.daylight.contains(t);
        Ok(self
            .choghadiya_half(is_day)?
            .into_iter()
            .find(|s| s.interval.contains(t)))
    }

    pub fn horas(&self) -> Result<Vec<HoraSlot>, VedicError> {
        let first = HORA_START_INDEX[self.weekday.num_days_from_sunday() as usize];
        let slots = split_equal(self.sunrise(), self.next_sunrise(), HORA_COUNT)?;
        Ok(slots
            .into_iter()
            .enumerate()
            .map(|(i, interval)| HoraSlot {
                lord: HORA_CYCLE[(first + i) % HORA_CYCLE.len()],
                hora_index: i as u8,
                interval,
            })
            .collect())
    }

    pub fn kalam(&self, kalam: Kalam) -> Result<KalamSlot, VedicError> {
        let parts = split_equal(self.sunrise(), self.sunset(), DAY_PARTS)?;
        let segment = kalam.segment(self.weekday);
        Ok(KalamSlot {
            kalam,
            interval: parts[segment - 1],
        })
    }

    /// Rahu kalam, Yamagandam and Gulika kalam, in that order.
    pub fn kalams(&self) -> Result<Vec<KalamSlot>, VedicError> {
        ALL_KALAMS.iter().map(|k| self.kalam(*k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use kaal_time::GeoLocation;

    fn t(h: u32, m: u32) -> Instant {
        Instant::new(
            Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).unwrap(),
            GeoLocation::new(17.385, 78.4867, 0.0),
        )
    }

    /// Monday 2024-01-15: sunrise 06:00, sunset 18:00, next sunrise 06:00.
    fn monday() -> DayParts {
        DayParts::new(
            Weekday::Mon,
            t(6, 0),
            t(18, 0),
            t(6, 0) + TimeDelta::days(1),
        )
        .unwrap()
    }

    #[test]
    fn split_is_exact() {
        let parts = split_equal(t(6, 0), t(6, 0) + TimeDelta::nanoseconds(10), 3).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].end(), t(6, 0) + TimeDelta::nanoseconds(10));
        for w in parts.windows(2) {
            assert!(w[0].touches(&w[1]));
        }
    }

    #[test]
    fn split_rejects_zero() {
        assert!(split_equal(t(6, 0), t(7, 0), 0).is_err());
    }

    #[test]
    fn day_parts_order_enforced() {
        assert!(DayParts::new(Weekday::Mon, t(18, 0), t(6, 0), t(20, 0)).is_err());
    }

    #[test]
    fn monday_rahu_kalam_second_eighth() {
        // 12h daylight / 8 = 90 min; segment 2 = 07:30-09:00.
        let rk = monday().kalam(Kalam::RahuKalam).unwrap();
        assert_eq!(rk.interval.start(), t(7, 30));
        assert_eq!(rk.interval.end(), t(9, 0));
    }

    #[test]
    fn monday_yamagandam_and_gulika() {
        let day = monday();
        let yama = day.kalam(Kalam::Yamagandam).unwrap();
        assert_eq!(yama.interval.start(), t(10, 30));
        let gulika = day.kalam(Kalam::GulikaKalam).unwrap();
        assert_eq!(gulika.interval.start(), t(13, 30));
    }

    #[test]
    fn monday_choghadiya_sequence() {
        let slots = monday().choghadiya().unwrap();
        assert_eq!(slots.len(), 16);
        assert_eq!(slots[0].choghadiya, Choghadiya::Amrit);
        assert_eq!(slots[1].choghadiya, Choghadiya::Kaal);
        assert_eq!(slots[7].choghadiya, Choghadiya::Amrit);
        assert!(slots[..8].iter().all(|s| s.is_day));
        assert_eq!(slots[8].choghadiya, Choghadiya::Chal);
        assert_eq!(slots[8].interval.start(), t(18, 0));
        assert_eq!(slots[15].interval.end(), t(6, 0) + TimeDelta::days(1));
    }

    #[test]
    fn sunday_starts_with_udveg() {
        let mut day = monday();
        day.weekday = Weekday::Sun;
        assert_eq!(day.choghadiya().unwrap()[0].choghadiya, Choghadiya::Udveg);
    }

    #[test]
    fn choghadiya_lookup() {
        let day = monday();
        let slot = day.choghadiya_at(&t(7, 0)).unwrap().unwrap();
        assert_eq!(slot.choghadiya, Choghadiya::Amrit);
        assert_eq!(slot.nature, Nature::Good);
        assert!(day.choghadiya_at(&t(5, 0)).unwrap().is_none());
    }

    #[test]
    fn monday_horas_start_with_chandra() {
        let horas = monday().horas().unwrap();
        assert_eq!(horas.len(), HORA_COUNT);
        assert_eq!(horas[0].lord, Graha::Chandra);
        assert_eq!(horas[1].lord, Graha::Shani);
        assert_eq!(horas[0].interval.duration(), TimeDelta::hours(1));
        // The 25th hora would be the next day's lord (Mangal).
        assert_eq!(HORA_CYCLE[(HORA_START_INDEX[1] + 24) % 7], Graha::Mangal);
    }

    #[test]
    fn kalams_cover_three() {
        let ks = monday().kalams().unwrap();
        assert_eq!(ks.len(), 3);
        assert_eq!(ks[0].kalam, Kalam::RahuKalam);
    }
}
