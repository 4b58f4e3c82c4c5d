//! Weighted cyclic period trees (dasha).
//!
//! A [`RulerSequence`] holds N rulers with integer weights summing to W.
//! A period ruled by `r` splits into N children in cyclic order starting at
//! `r`, each lasting `parent * w / W`. When the subject's reference instant
//! falls inside a period, the theoretical full period is generated and the
//! children that ended before the reference are dropped, the first survivor
//! clipped.

pub mod balance;
pub mod query;
pub mod sequence;
pub mod tree;
pub mod types;
pub mod vimshottari;

pub use balance::{BirthBalance, nakshatra_birth_balance};
pub use query::{find_active_period, snapshot};
pub use sequence::RulerSequence;
pub use tree::{build_tree, children_of};
pub use types::{
    DAYS_PER_YEAR, DashaLevel, MAX_DASHA_DEPTH, MAX_PERIODS_PER_LEVEL, PeriodNode, RootSpan,
};
pub use vimshottari::{
    DashaConfig, VIMSHOTTARI_RULERS, VIMSHOTTARI_TOTAL_YEARS, lifetime_snapshot, lifetime_tree,
    vimshottari_sequence,
};
