//! Vedic day resolution and the per-scan day memo.
//!
//! A Vedic day runs from sunrise to the next sunrise and takes the weekday
//! of the local civil date of its sunrise. Instants before a date's sunrise
//! belong to the previous Vedic day.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use kaal_oracle::{Body, Oracle};
use kaal_time::{GeoLocation, Instant, Interval, TimeError};
use kaal_vedic_base::{ChoghadiyaSlot, DayParts, HoraSlot, Kalam, KalamSlot};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::SearchError;

/// Rise/set and the derived daily tables of one Vedic day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTables {
    /// Local civil date of the sunrise.
    pub date: NaiveDate,
    pub weekday: Weekday,
    #[serde(flatten)]
    pub parts: DayParts,
    pub choghadiya: Vec<ChoghadiyaSlot>,
    pub horas: Vec<HoraSlot>,
    pub kalams: Vec<KalamSlot>,
}

impl DayTables {
    /// Sunrise to next sunrise.
    pub fn vedic_day(&self) -> Interval {
        self.parts.vedic_day()
    }

    pub fn choghadiya_at(&self, t: &Instant) -> Option<&ChoghadiyaSlot> {
        self.choghadiya.iter().find(|s| s.interval.contains(t))
    }

    pub fn hora_at(&self, t: &Instant) -> Option<&HoraSlot> {
        self.horas.iter().find(|s| s.interval.contains(t))
    }

    /// First of `kalams` whose interval contains `t`.
    pub fn kalam_at(&self, t: &Instant, kalams: &[Kalam]) -> Option<Kalam> {
        self.kalams
            .iter()
            .find(|s| kalams.contains(&s.kalam) && s.interval.contains(t))
            .map(|s| s.kalam)
    }
}

fn local_midnight(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    // A DST jump can skip local midnight.
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}

/// Resolve sunrise, sunset and next sunrise for the local civil `date`, and
/// build the daily tables from them.
///
/// Fails with [`SearchError::DegenerateDay`] when the Sun does not rise on
/// `date`, does not set after rising, or the resulting day cannot be split
/// into its tables. Oracle failures propagate as `OracleUnavailable`.
pub fn day_tables<O: Oracle + ?Sized>(
    oracle: &O,
    date: NaiveDate,
    location: &GeoLocation,
    tz: &Tz,
) -> Result<DayTables, SearchError> {
    let degenerate = || SearchError::DegenerateDay(date);
    let midnight = Instant::new(local_midnight(date, tz).ok_or_else(degenerate)?, *location);

    let sunrise = oracle
        .rise_event(&midnight, Body::Sun)?
        .ok_or_else(degenerate)?;
    if sunrise.local(tz).date_naive() != date {
        return Err(degenerate());
    }
    let sunset = oracle
        .set_event(&sunrise, Body::Sun)?
        .ok_or_else(degenerate)?;
    let next_sunrise = oracle
        .rise_event(&sunset, Body::Sun)?
        .ok_or_else(degenerate)?;

    let weekday = date.weekday();
    let parts =
        DayParts::new(weekday, sunrise, sunset, next_sunrise).map_err(|_| degenerate())?;
    let choghadiya = parts.choghadiya().map_err(|_| degenerate())?;
    let horas = parts.horas().map_err(|_| degenerate())?;
    let kalams = parts.kalams().map_err(|_| degenerate())?;
    debug!(date = %date, sunrise = %sunrise, sunset = %sunset, "resolved vedic day");

    Ok(DayTables {
        date,
        weekday,
        parts,
        choghadiya,
        horas,
        kalams,
    })
}

/// Memo of resolved days for one scan.
///
/// Each civil date is resolved at most once. Degenerate days are remembered
/// as `None` and logged once; oracle failures are not cached.
pub struct DayContext<'a, O: ?Sized> {
    oracle: &'a O,
    location: GeoLocation,
    timezone: Tz,
    days: HashMap<NaiveDate, Option<DayTables>>,
}

impl<'a, O: Oracle + ?Sized> DayContext<'a, O> {
    pub fn new(oracle: &'a O, location: GeoLocation, timezone: Tz) -> Self {
        Self {
            oracle,
            location,
            timezone,
            days: HashMap::new(),
        }
    }

    pub fn oracle(&self) -> &'a O {
        self.oracle
    }

    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    /// Tables for the Vedic day starting on `date`; `None` if degenerate.
    pub fn day(&mut self, date: NaiveDate) -> Result<Option<&DayTables>, SearchError> {
        if !self.days.contains_key(&date) {
            let resolved = match day_tables(self.oracle, date, &self.location, &self.timezone) {
                Ok(tables) => Some(tables),
                Err(SearchError::DegenerateDay(d)) => {
                    warn!(date = %d, "rise/set unresolved, day fails closed");
                    None
                }
                Err(e) => return Err(e),
            };
            self.days.insert(date, resolved);
        }
        Ok(self.days.get(&date).and_then(Option::as_ref))
    }

    /// Tables for the Vedic day containing `t`; `None` if that day is
    /// degenerate.
    pub fn day_of(&mut self, t: &Instant) -> Result<Option<&DayTables>, SearchError> {
        let date = t.local(&self.timezone).date_naive();
        if self.day(date)?.is_some_and(|d| d.vedic_day().contains(t)) {
            return self.day(date);
        }
        let prev = date
            .pred_opt()
            .ok_or(TimeError::OutOfRange("date before supported range"))?;
        if self.day(prev)?.is_some_and(|d| d.vedic_day().contains(t)) {
            return self.day(prev);
        }
        Ok(None)
    }

    /// Number of civil dates resolved so far, degenerate ones included.
    pub fn resolved_days(&self) -> usize {
        self.days.len()
    }
}
