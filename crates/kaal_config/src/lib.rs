//! TOML configuration for the kaal engine.
//!
//! This crate provides:
//! - `KaalConfig`: the on-disk layout, one table per runtime config, every
//!   key optional
//! - Conversions into the validated runtime types (`BoundaryConfig`,
//!   `PanchangConfig`, `ScanConfig`, `DashaConfig`, `MeanMotionConfig`)
//! - `ConfigError` for read, parse and validation failures

pub mod error;
pub mod file;

pub use error::ConfigError;
pub use file::{
    BoundarySection, DashaSection, KaalConfig, OracleSection, PanchangSection, ScanSection,
};
