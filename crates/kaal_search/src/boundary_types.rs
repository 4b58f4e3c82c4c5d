//! Types for boundary search.

use chrono::TimeDelta;
use serde::Serialize;

/// Configuration for [`find_boundary`](crate::find_boundary).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConfig {
    /// Forward probe step (default 1 h).
    pub probe_step: TimeDelta,
    /// Fixed number of bisection iterations on the bracket (default 10,
    /// about 3.5 s on a 1 h bracket).
    pub bisection_iterations: u32,
    /// Probing stops with `BoundaryNotFound` past `start + search_horizon`.
    pub search_horizon: TimeDelta,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            probe_step: TimeDelta::hours(1),
            bisection_iterations: 10,
            search_horizon: TimeDelta::hours(48),
        }
    }
}

impl BoundaryConfig {
    /// Default probing with the horizon set to `factor` nominal periods.
    ///
    /// Returns `None` if the product overflows.
    pub fn for_nominal(nominal: TimeDelta, factor: f64) -> Option<Self> {
        let nanos = nominal.num_nanoseconds()? as f64 * factor;
        if !nanos.is_finite() || nanos >= i64::MAX as f64 {
            return None;
        }
        Some(Self {
            search_horizon: TimeDelta::nanoseconds(nanos as i64),
            ..Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.probe_step <= TimeDelta::zero() {
            return Err("probe_step must be positive");
        }
        if self.bisection_iterations == 0 || self.bisection_iterations > 64 {
            return Err("bisection_iterations must be in [1, 64]");
        }
        if self.search_horizon < self.probe_step {
            return Err("search_horizon must be at least one probe_step");
        }
        Ok(())
    }
}

/// What to do when an element's boundary cannot be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BoundaryPolicy {
    /// Report `BoundaryNotFound` to the caller.
    #[default]
    Strict,
    /// Use `start + nominal_period`, flagged as estimated.
    NominalFallback,
}
