//! Core types for period trees.

use chrono::TimeDelta;
use kaal_time::{Instant, Interval};
use serde::Serialize;

/// Year length used for dasha period calculations.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Deepest supported level below the root (1 = mahadasha only).
pub const MAX_DASHA_DEPTH: u8 = 5;

/// Hard cap on periods per level to prevent combinatorial explosion.
pub const MAX_PERIODS_PER_LEVEL: usize = 100_000;

/// Named nesting levels below the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 1,
    Antardasha = 2,
    Pratyantardasha = 3,
    Sookshmadasha = 4,
    Pranadasha = 5,
}

impl DashaLevel {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Mahadasha),
            2 => Some(Self::Antardasha),
            3 => Some(Self::Pratyantardasha),
            4 => Some(Self::Sookshmadasha),
            5 => Some(Self::Pranadasha),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
            Self::Sookshmadasha => "Sookshmadasha",
            Self::Pranadasha => "Pranadasha",
        }
    }
}

/// What the root of a tree represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootSpan {
    /// A whole cycle: nominal length `W * unit`, children at level 1 are the
    /// full ruler sequence starting at the anchor.
    Cycle,
    /// A single ruler's period: nominal length `w_anchor * unit`.
    Period,
}

/// A labeled period whose children tile it exactly.
///
/// Level 0 is the root; its children are level 1 (mahadasha) and so on.
/// Nodes are immutable once built; deeper levels come from
/// [`PeriodNode::expand`] or [`children_of`](super::children_of), which
/// return new values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodNode<R> {
    ruler: R,
    level: u8,
    #[serde(flatten)]
    interval: Interval,
    /// Start of the unclipped period; equals `interval.start()` unless the
    /// period was cut short at the subject's reference instant.
    #[serde(skip)]
    nominal_start: Instant,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<PeriodNode<R>>,
}

impl<R> PeriodNode<R> {
    pub(crate) fn new(
        ruler: R,
        level: u8,
        interval: Interval,
        nominal_start: Instant,
        children: Vec<PeriodNode<R>>,
    ) -> Self {
        Self {
            ruler,
            level,
            interval,
            nominal_start,
            children,
        }
    }

    pub fn ruler(&self) -> &R {
        &self.ruler
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Named level, `None` for the root.
    pub fn dasha_level(&self) -> Option<DashaLevel> {
        DashaLevel::from_u8(self.level)
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn start(&self) -> Instant {
        self.interval.start()
    }

    pub fn end(&self) -> Instant {
        self.interval.end()
    }

    pub fn duration(&self) -> TimeDelta {
        self.interval.duration()
    }

    pub fn nominal_start(&self) -> Instant {
        self.nominal_start
    }

    /// Length of the unclipped period.
    pub fn nominal_duration(&self) -> TimeDelta {
        self.end() - self.nominal_start
    }

    /// `true` when the start was clipped to a reference instant.
    pub fn is_partial(&self) -> bool {
        self.nominal_start < self.interval.start()
    }

    pub fn children(&self) -> &[PeriodNode<R>] {
        &self.children
    }

    pub fn contains(&self, t: &Instant) -> bool {
        self.interval.contains(t)
    }

    /// Levels materialized below this node (0 for a leaf).
    pub fn depth(&self) -> u8 {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Same node without its children.
    pub fn leaf(&self) -> Self
    where
        R: Clone,
    {
        Self {
            ruler: self.ruler.clone(),
            level: self.level,
            interval: self.interval,
            nominal_start: self.nominal_start,
            children: Vec::new(),
        }
    }

    /// All nodes at `level` in time order.
    pub fn nodes_at_level(&self, level: u8) -> Vec<&PeriodNode<R>> {
        let mut out = Vec::new();
        self.collect_level(level, &mut out);
        out
    }

    fn collect_level<'a>(&'a self, level: u8, out: &mut Vec<&'a PeriodNode<R>>) {
        if self.level == level {
            out.push(self);
        } else if self.level < level {
            for c in &self.children {
                c.collect_level(level, out);
            }
        }
    }
}
