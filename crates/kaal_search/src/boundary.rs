//! Bisection search for the instant a discretized quantity changes.
//!
//! Forward-probe in fixed steps until the sampled index differs from the
//! current one, then bisect the bracket a fixed number of times. The result
//! is the first sampled instant known to carry the new index.
//!
//! Correctness assumes the quantity advances monotonically (mod its cycle)
//! across the bracket. A quantity that reverses inside a probe step can
//! produce a bracket whose midpoint test is not meaningful; this is not
//! detected.

use kaal_time::Instant;
use tracing::debug;

use crate::boundary_types::BoundaryConfig;
use crate::error::SearchError;

/// Find the next instant after `start` at which `sample_fn` stops returning
/// `current_index`.
///
/// `sample_fn(start)` must equal `current_index`, otherwise
/// [`SearchError::IndexMismatch`]. The returned instant is always strictly
/// after `start`. Errors from `sample_fn` are propagated unchanged.
pub fn find_boundary<F>(
    start: &Instant,
    current_index: u8,
    mut sample_fn: F,
    config: &BoundaryConfig,
) -> Result<Instant, SearchError>
where
    F: FnMut(&Instant) -> Result<u8, SearchError>,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let found = sample_fn(start)?;
    if found != current_index {
        return Err(SearchError::IndexMismatch {
            expected: current_index,
            found,
        });
    }

    let horizon_end = start.checked_add(config.search_horizon)?;
    let mut low = *start;
    let mut high = loop {
        let probe = low.checked_add(config.probe_step)?.min(horizon_end);
        if sample_fn(&probe)? != current_index {
            break probe;
        }
        if probe >= horizon_end {
            debug!(start = %start, index = current_index, "probe exhausted search horizon");
            return Err(SearchError::BoundaryNotFound {
                start: *start,
                horizon: config.search_horizon,
            });
        }
        low = probe;
    };
    debug!(low = %low, high = %high, index = current_index, "boundary bracketed");

    for _ in 0..config.bisection_iterations {
        let mid = low.midpoint(&high);
        if mid == low || mid == high {
            break;
        }
        if sample_fn(&mid)? == current_index {
            low = mid;
        } else {
            high = mid;
        }
    }
    Ok(high)
}
