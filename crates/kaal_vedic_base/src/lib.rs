//! Pure Vedic calendar building blocks.
//!
//! This crate provides:
//! - Classifiers mapping longitudes to 1-based tithi, nakshatra, yoga,
//!   karana and rashi ordinals
//! - The 9 grahas and their mapping onto oracle bodies
//! - Angular proximity (combustion) tests with 360 deg wraparound
//! - Daily muhurta tables: choghadiya, hora, rahu kalam, yamagandam, gulika
//! - Weighted cyclic period trees (dasha), with partial-first-period clipping
//!
//! Nothing here queries an oracle; inputs are degrees and instants.

pub mod classify;
pub mod combustion;
pub mod dasha;
pub mod error;
pub mod graha;
pub mod muhurta;
pub mod util;

pub use classify::{
    Classifier, KARANA_SEGMENT_DEG, NAKSHATRA_SPAN_27, NakshatraPosition, PADA_SPAN, Paksha,
    RASHI_SPAN_DEG, TITHI_SEGMENT_DEG, YOGA_SEGMENT_DEG, karana_index, nakshatra_index,
    nakshatra_position, paksha_of_tithi, rashi_index, tithi_index, yoga_index,
};
pub use combustion::{combustion_threshold, is_combust, within_orb};
pub use dasha::{
    BirthBalance, DAYS_PER_YEAR, DashaConfig, DashaLevel, MAX_DASHA_DEPTH, PeriodNode, RootSpan,
    RulerSequence, build_tree, children_of, find_active_period, lifetime_snapshot, lifetime_tree,
    nakshatra_birth_balance, snapshot, vimshottari_sequence,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, weekday_lord};
pub use muhurta::{
    ALL_KALAMS, CHOGHADIYA_PER_HALF, Choghadiya, ChoghadiyaSlot, DayParts, HORA_COUNT, HoraSlot,
    Kalam, KalamSlot, Nature, split_equal,
};
pub use util::{angular_distance, normalize_360};
