//! Searches over an oracle: boundaries, panchang spans, windows, muhurta.
//!
//! This crate provides:
//! - Boundary search: forward probe plus fixed bisection for the instant a
//!   discretized quantity changes
//! - Panchang element spans (tithi, nakshatra, yoga, karana, vara), each
//!   resolved independently with an explicit fallback policy
//! - Vedic day resolution with a per-scan memo
//! - A fixed-step window scanner that merges same-quality runs
//! - Muhurta rules, activity presets and the muhurta search
//! - Dasha trees with the Moon taken from the oracle

pub mod boundary;
pub mod boundary_types;
pub mod dasha;
pub mod day;
pub mod error;
pub mod muhurta;
pub mod muhurta_types;
pub mod panchang;
pub mod panchang_types;
pub mod scan;
pub mod scan_types;

pub use boundary::find_boundary;
pub use boundary_types::{BoundaryConfig, BoundaryPolicy};
pub use dasha::{dasha_for_birth, dasha_snapshot_at};
pub use day::{DayContext, DayTables, day_tables};
pub use error::SearchError;
pub use muhurta::{assess, find_muhurta, find_muhurta_with_rule};
pub use muhurta_types::{
    ALL_ACTIVITIES, MuhurtaActivity, MuhurtaRule, ProximityExclusion, SignConstraint,
};
pub use panchang::{element_index, element_span, panchang_elements};
pub use panchang_types::{
    ALL_ELEMENTS, ElementSpan, PanchangConfig, PanchangElement, PanchangElements,
    SIDEREAL_MONTH_DAYS, SYNODIC_MONTH_DAYS,
};
pub use scan::scan;
pub use scan_types::{Assessment, Quality, ScanConfig, Window};
