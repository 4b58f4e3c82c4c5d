//! Auspicious-window search.
//!
//! A [`MuhurtaRule`] is checked at each scan step's midpoint: weekday of the
//! Vedic day, exclusion of the day's inauspicious kalams, tithi / nakshatra
//! / sign allow-lists and angular-proximity exclusions. Day-level facts come
//! from a [`DayContext`] memo so rise/set is resolved once per day. A day
//! whose rise/set cannot be resolved fails closed without stopping the scan.

use kaal_oracle::Oracle;
use kaal_time::{Instant, Interval};
use kaal_vedic_base::{Classifier, within_orb};
use tracing::trace;

use crate::day::DayContext;
use crate::error::SearchError;
use crate::muhurta_types::{MuhurtaActivity, MuhurtaRule};
use crate::panchang::{element_index, finite_deg};
use crate::scan::scan;
use crate::scan_types::{Assessment, Quality, ScanConfig, Window};

/// Evaluate `rule` at `t`. `Ok(None)` when any condition fails or the day
/// is degenerate.
///
/// Quality follows the nature of the choghadiya in force at `t`.
pub fn assess<O: Oracle + ?Sized>(
    days: &mut DayContext<'_, O>,
    rule: &MuhurtaRule,
    t: &Instant,
) -> Result<Option<Assessment<Quality>>, SearchError> {
    let oracle = days.oracle();
    let Some(day) = days.day_of(t)? else {
        return Ok(None);
    };

    let mut factors = Vec::new();
    if !rule.weekdays.is_empty() {
        if !rule.weekdays.contains(&day.weekday) {
            return Ok(None);
        }
        factors.push(format!("vara {}", day.weekday));
    }
    if let Some(kalam) = day.kalam_at(t, &rule.exclude_kalams) {
        trace!(at = %t, kalam = kalam.name(), "inside excluded kalam");
        return Ok(None);
    }
    let choghadiya = day.choghadiya_at(t).copied();

    if !rule.tithis.is_empty() {
        let tithi = element_index(oracle, Classifier::Tithi, t)?;
        if !rule.tithis.contains(&tithi) {
            return Ok(None);
        }
        factors.push(format!("tithi {tithi}"));
    }
    if !rule.nakshatras.is_empty() {
        let nakshatra = element_index(oracle, Classifier::Nakshatra, t)?;
        if !rule.nakshatras.contains(&nakshatra) {
            return Ok(None);
        }
        factors.push(format!("nakshatra {nakshatra}"));
    }
    if !rule.ascendant_signs.is_empty() {
        let sign = Classifier::Rashi.index(finite_deg(oracle.ascendant(t)?, "ascendant")?);
        if !rule.ascendant_signs.contains(&sign) {
            return Ok(None);
        }
        factors.push(format!("lagna {sign}"));
    }
    for constraint in &rule.body_signs {
        let lon = finite_deg(oracle.longitude(t, constraint.body)?, "longitude")?;
        let sign = Classifier::Rashi.index(lon);
        if !constraint.signs.contains(&sign) {
            return Ok(None);
        }
        factors.push(format!("{} in rashi {sign}", constraint.body));
    }
    for exclusion in &rule.proximity_exclusions {
        let a = finite_deg(oracle.longitude(t, exclusion.body)?, "longitude")?;
        let b = finite_deg(oracle.longitude(t, exclusion.other)?, "longitude")?;
        if within_orb(a, b, exclusion.orb_deg) {
            trace!(at = %t, body = %exclusion.body, "within proximity orb");
            return Ok(None);
        }
        factors.push(format!("{} clear of {}", exclusion.body, exclusion.other));
    }

    let quality = match choghadiya {
        Some(slot) => {
            factors.push(format!("choghadiya {}", slot.choghadiya.name()));
            Quality::from_nature(slot.nature)
        }
        None => Quality::Average,
    };
    Ok(Some(Assessment::new(quality, factors)))
}

/// Scan `interval` for windows satisfying `rule`.
///
/// The location is taken from `interval.start()`.
pub fn find_muhurta_with_rule<O: Oracle + ?Sized>(
    oracle: &O,
    interval: &Interval,
    rule: &MuhurtaRule,
    config: &ScanConfig,
) -> Result<Vec<Window<Quality>>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    rule.validate().map_err(SearchError::InvalidConfig)?;
    let start = interval.start();
    let mut days = DayContext::new(oracle, *start.location(), config.timezone);
    scan(&start, &interval.end(), config.step, |t| {
        assess(&mut days, rule, t)
    })
}

/// Scan `interval` with the preset rule for `activity`.
pub fn find_muhurta<O: Oracle + ?Sized>(
    oracle: &O,
    interval: &Interval,
    activity: MuhurtaActivity,
    config: &ScanConfig,
) -> Result<Vec<Window<Quality>>, SearchError> {
    find_muhurta_with_rule(oracle, interval, &activity.rule(), config)
}
