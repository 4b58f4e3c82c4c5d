//! Fixed-step window scanner.
//!
//! Steps through `[start, end)`, evaluating a predicate at each step's
//! midpoint. Passing steps extend the previous window when it has the same
//! quality and ends where the step begins; otherwise they open a new one.
//! Windows are therefore time-ordered, non-overlapping and maximal.

use chrono::TimeDelta;
use kaal_time::{Instant, Interval};
use tracing::trace;

use crate::error::SearchError;
use crate::scan_types::{Assessment, Window};

/// Scan `[start, end)` in steps of `step`; the last step is clipped to `end`.
///
/// `predicate` returns `Ok(None)` for a failing step. Its errors abort the
/// scan and are returned unchanged. An empty range yields no windows.
pub fn scan<Q, F>(
    start: &Instant,
    end: &Instant,
    step: TimeDelta,
    mut predicate: F,
) -> Result<Vec<Window<Q>>, SearchError>
where
    Q: PartialEq,
    F: FnMut(&Instant) -> Result<Option<Assessment<Q>>, SearchError>,
{
    if step <= TimeDelta::zero() {
        return Err(SearchError::InvalidConfig("scan step must be positive"));
    }

    let mut windows: Vec<Window<Q>> = Vec::new();
    let mut cursor = *start;
    while cursor < *end {
        let next = cursor.checked_add(step)?.min(*end);
        let slot = Interval::new(cursor, next)?;
        let mid = slot.midpoint();
        match predicate(&mid)? {
            Some(assessment) => {
                trace!(at = %mid, "scan step passes");
                push_merged(&mut windows, slot, assessment);
            }
            None => trace!(at = %mid, "scan step fails"),
        }
        cursor = next;
    }
    Ok(windows)
}

fn push_merged<Q: PartialEq>(
    windows: &mut Vec<Window<Q>>,
    slot: Interval,
    assessment: Assessment<Q>,
) {
    match windows.pop() {
        Some(last) if *last.quality() == assessment.quality && last.interval().touches(&slot) => {
            windows.push(last.extended(slot, assessment.factors));
        }
        Some(last) => {
            windows.push(last);
            windows.push(Window::new(slot, assessment));
        }
        None => windows.push(Window::new(slot, assessment)),
    }
}
