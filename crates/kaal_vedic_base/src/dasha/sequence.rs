//! Weighted cyclic ruler sequences.

use chrono::TimeDelta;
use kaal_time::{delta_from_nanos, delta_to_nanos};

use crate::error::VedicError;

use super::types::RootSpan;

/// N rulers with integer weights summing to a fixed total W.
///
/// `unit` is the duration of weight 1 (one year for the Vimshottari
/// sequence), so a ruler of weight `w` owns a full period of `w * unit`.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerSequence<R> {
    rulers: Vec<(R, u32)>,
    total_weight: u32,
    unit: TimeDelta,
}

impl<R: Copy + PartialEq> RulerSequence<R> {
    /// Validate and build a sequence.
    ///
    /// Fails with `MalformedWeights` when the weights do not add up to
    /// `expected_total`.
    pub fn new(
        rulers: Vec<(R, u32)>,
        expected_total: u32,
        unit: TimeDelta,
    ) -> Result<Self, VedicError> {
        if rulers.is_empty() {
            return Err(VedicError::InvalidInput("ruler sequence is empty"));
        }
        if rulers.iter().any(|(_, w)| *w == 0) {
            return Err(VedicError::InvalidInput("ruler weights must be positive"));
        }
        for (i, (r, _)) in rulers.iter().enumerate() {
            if rulers[..i].iter().any(|(other, _)| other == r) {
                return Err(VedicError::InvalidInput("ruler appears twice in sequence"));
            }
        }
        if unit <= TimeDelta::zero() {
            return Err(VedicError::InvalidInput("ruler unit must be positive"));
        }
        let actual = rulers
            .iter()
            .try_fold(0u32, |acc, (_, w)| acc.checked_add(*w))
            .ok_or(VedicError::InvalidInput("ruler weights overflow"))?;
        if actual != expected_total {
            return Err(VedicError::MalformedWeights {
                expected: expected_total,
                actual,
            });
        }
        Ok(Self {
            rulers,
            total_weight: actual,
            unit,
        })
    }

    pub fn len(&self) -> usize {
        self.rulers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rulers.is_empty()
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    pub fn unit(&self) -> TimeDelta {
        self.unit
    }

    pub fn ruler(&self, idx: usize) -> Option<R> {
        self.rulers.get(idx).map(|(r, _)| *r)
    }

    pub fn weight(&self, idx: usize) -> Option<u32> {
        self.rulers.get(idx).map(|(_, w)| *w)
    }

    /// Position of `ruler` in the sequence.
    pub fn position(&self, ruler: R) -> Option<usize> {
        self.rulers.iter().position(|(r, _)| *r == ruler)
    }

    /// All rulers in cyclic order starting at `start`, with positions.
    pub fn cyclic_from(&self, start: usize) -> impl Iterator<Item = (usize, R, u32)> + '_ {
        let n = self.rulers.len();
        (0..n).map(move |i| {
            let idx = (start + i) % n;
            let (r, w) = self.rulers[idx];
            (idx, r, w)
        })
    }

    /// Full period of the ruler at `idx`.
    pub fn period(&self, idx: usize) -> Result<TimeDelta, VedicError> {
        let w = self
            .weight(idx)
            .ok_or(VedicError::InvalidInput("ruler index out of range"))?;
        scale(self.unit, w as i128, 1)
    }

    /// Whole cycle: `W * unit`.
    pub fn cycle(&self) -> Result<TimeDelta, VedicError> {
        scale(self.unit, self.total_weight as i128, 1)
    }

    /// Nominal length of a root anchored at `anchor`.
    pub fn nominal(&self, span: RootSpan, anchor: usize) -> Result<TimeDelta, VedicError> {
        match span {
            RootSpan::Cycle => self.cycle(),
            RootSpan::Period => self.period(anchor),
        }
    }
}

/// `delta * num / den` on exact nanoseconds (floored).
pub(crate) fn scale(delta: TimeDelta, num: i128, den: i128) -> Result<TimeDelta, VedicError> {
    let nanos = delta_to_nanos(delta)
        .checked_mul(num)
        .ok_or(VedicError::InvalidInput("period length overflow"))?
        / den;
    delta_from_nanos(nanos).ok_or(VedicError::InvalidInput("period length out of range"))
}
