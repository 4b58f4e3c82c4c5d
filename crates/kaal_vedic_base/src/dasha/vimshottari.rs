//! Vimshottari: the 120-year nakshatra dasha.

use chrono::TimeDelta;
use kaal_time::{Instant, Interval, delta_from_days};
use tracing::debug;

use crate::error::VedicError;
use crate::graha::Graha;

use super::balance::nakshatra_birth_balance;
use super::query::{find_active_period, snapshot};
use super::sequence::RulerSequence;
use super::tree::build_tree;
use super::types::{DAYS_PER_YEAR, MAX_DASHA_DEPTH, PeriodNode, RootSpan};

/// Vimshottari rulers and their periods in years.
pub const VIMSHOTTARI_RULERS: [(Graha, u32); 9] = [
    (Graha::Ketu, 7),
    (Graha::Shukra, 20),
    (Graha::Surya, 6),
    (Graha::Chandra, 10),
    (Graha::Mangal, 7),
    (Graha::Rahu, 18),
    (Graha::Guru, 16),
    (Graha::Shani, 19),
    (Graha::Buddh, 17),
];

pub const VIMSHOTTARI_TOTAL_YEARS: u32 = 120;

/// Configuration for lifetime dasha trees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashaConfig {
    /// Length of the dasha year in days.
    pub days_per_year: f64,
    /// Levels to generate below the root (1 = mahadasha only).
    pub depth: u8,
}

impl Default for DashaConfig {
    fn default() -> Self {
        Self {
            days_per_year: DAYS_PER_YEAR,
            depth: 3,
        }
    }
}

impl DashaConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.days_per_year.is_finite() || !(300.0..=400.0).contains(&self.days_per_year) {
            return Err("days_per_year must be within [300, 400]");
        }
        if self.depth == 0 || self.depth > MAX_DASHA_DEPTH {
            return Err("depth must be within [1, MAX_DASHA_DEPTH]");
        }
        Ok(())
    }

    fn year(&self) -> Result<TimeDelta, VedicError> {
        delta_from_days(self.days_per_year)
            .ok_or(VedicError::InvalidInput("days_per_year out of range"))
    }
}

/// The Vimshottari sequence with a year of `days_per_year` days.
pub fn vimshottari_sequence(days_per_year: f64) -> Result<RulerSequence<Graha>, VedicError> {
    let unit = delta_from_days(days_per_year)
        .ok_or(VedicError::InvalidInput("days_per_year out of range"))?;
    RulerSequence::new(VIMSHOTTARI_RULERS.to_vec(), VIMSHOTTARI_TOTAL_YEARS, unit)
}

/// Mahadashas from birth, `depth` levels deep counting the mahadasha level.
///
/// The first cycle starts when the Moon entered its birth nakshatra, so the
/// entry ruler's period is clipped to its unexpired balance. Mahadashas keep
/// following in cyclic order while they start less than one full cycle after
/// birth; with a partial entry period the entry ruler comes round once more.
/// Returns the entry ruler index, the theoretical cycle start and the
/// mahadashas.
fn lifetime_mahadashas(
    sequence: &RulerSequence<Graha>,
    birth: Instant,
    moon_sidereal_lon: f64,
    depth: u8,
) -> Result<(usize, Instant, Vec<PeriodNode<Graha>>), VedicError> {
    let balance = nakshatra_birth_balance(moon_sidereal_lon, sequence.len());
    let entry_period = sequence.period(balance.ruler_index)?;
    let elapsed = balance
        .elapsed_in(entry_period)
        .ok_or(VedicError::InvalidInput("birth balance out of range"))?;
    let cycle = sequence.cycle()?;

    let theoretical_start = birth.checked_sub(elapsed)?;
    let cycle_end = theoretical_start.checked_add(cycle)?;
    debug!(
        nakshatra = balance.nakshatra,
        entry = %sequence.ruler(balance.ruler_index).map_or("?", Graha::name),
        elapsed_fraction = balance.elapsed_fraction,
        "vimshottari birth balance"
    );
    let first = build_tree(
        balance.ruler_index,
        birth,
        cycle_end,
        depth,
        sequence,
        RootSpan::Cycle,
    )?;
    let mut mahadashas = first.children().to_vec();

    if cycle_end < birth.checked_add(cycle)? {
        let next = build_tree(
            balance.ruler_index,
            cycle_end,
            cycle_end.checked_add(cycle)?,
            1,
            sequence,
            RootSpan::Cycle,
        )?;
        if let Some(entry) = next.children().first() {
            mahadashas.push(entry.expand(sequence, depth.saturating_sub(1))?);
        }
    }
    Ok((balance.ruler_index, theoretical_start, mahadashas))
}

/// Lifetime tree for a subject born at `birth` with the Moon at
/// `moon_sidereal_lon`.
///
/// The root spans from birth to the end of the first mahadasha starting at
/// least 120 years after the theoretical cycle start, covering at least a
/// full cycle from birth. The first mahadasha is clipped to the unexpired
/// balance.
pub fn lifetime_tree(
    birth: Instant,
    moon_sidereal_lon: f64,
    config: &DashaConfig,
) -> Result<PeriodNode<Graha>, VedicError> {
    config.validate().map_err(VedicError::InvalidInput)?;
    let sequence = vimshottari_sequence(config.days_per_year)?;
    let (entry, theoretical_start, mahadashas) =
        lifetime_mahadashas(&sequence, birth, moon_sidereal_lon, config.depth)?;
    let end = mahadashas
        .last()
        .map(PeriodNode::end)
        .ok_or(VedicError::InvalidInput("empty dasha cycle"))?;
    let ruler = sequence
        .ruler(entry)
        .ok_or(VedicError::InvalidInput("anchor index out of range"))?;
    Ok(PeriodNode::new(
        ruler,
        0,
        Interval::new(birth, end)?,
        theoretical_start,
        mahadashas,
    ))
}

/// Active chain of periods at `at`, without materializing the full tree.
pub fn lifetime_snapshot(
    birth: Instant,
    moon_sidereal_lon: f64,
    at: &Instant,
    config: &DashaConfig,
) -> Result<Vec<PeriodNode<Graha>>, VedicError> {
    config.validate().map_err(VedicError::InvalidInput)?;
    let sequence = vimshottari_sequence(config.days_per_year)?;
    let (_, _, mahadashas) = lifetime_mahadashas(&sequence, birth, moon_sidereal_lon, 1)?;
    let Some(idx) = find_active_period(&mahadashas, at) else {
        return Ok(Vec::new());
    };
    let maha = &mahadashas[idx];
    let mut chain = vec![maha.leaf()];
    chain.extend(snapshot(&sequence, maha, at, config.depth - 1)?);
    Ok(chain)
}
