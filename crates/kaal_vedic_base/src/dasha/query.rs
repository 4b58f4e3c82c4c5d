//! Active-period lookup.

use kaal_time::Instant;

use crate::error::VedicError;

use super::sequence::RulerSequence;
use super::tree::children_of;
use super::types::{MAX_DASHA_DEPTH, PeriodNode};

/// Index of the period containing `at`, if any.
///
/// `periods` must be contiguous siblings in time order.
pub fn find_active_period<R>(periods: &[PeriodNode<R>], at: &Instant) -> Option<usize> {
    let idx = periods.partition_point(|p| p.end() <= *at);
    periods.get(idx).filter(|p| p.contains(at)).map(|_| idx)
}

/// Chain of active periods below `root` at `at`, from level 1 down to
/// `depth`.
///
/// Generates only the path of active nodes, one level at a time, so the cost
/// is O(depth * N) regardless of how deep the chain goes. Returned nodes are
/// leaves. Empty when `at` is outside the root.
pub fn snapshot<R: Copy + PartialEq>(
    sequence: &RulerSequence<R>,
    root: &PeriodNode<R>,
    at: &Instant,
    depth: u8,
) -> Result<Vec<PeriodNode<R>>, VedicError> {
    let depth = depth.min(MAX_DASHA_DEPTH.saturating_sub(root.level()));
    let mut chain = Vec::with_capacity(depth as usize);
    if !root.contains(at) {
        return Ok(chain);
    }

    let mut parent = root.leaf();
    for _ in 0..depth {
        let mut children = children_of(sequence, &parent)?;
        let Some(idx) = find_active_period(&children, at) else {
            break;
        };
        let active = children.swap_remove(idx);
        chain.push(active.clone());
        parent = active;
    }
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::tree::build_tree;
    use crate::dasha::types::RootSpan;
    use chrono::{TimeDelta, TimeZone, Utc};
    use kaal_time::GeoLocation;

    fn seq() -> RulerSequence<char> {
        RulerSequence::new(vec![('a', 1), ('b', 2), ('c', 3)], 6, TimeDelta::days(360)).unwrap()
    }

    fn at(day: i64) -> Instant {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap() + TimeDelta::days(day);
        Instant::new(t, GeoLocation::default())
    }

    #[test]
    fn active_period_half_open() {
        let root = build_tree(0, at(0), at(6 * 360), 1, &seq(), RootSpan::Cycle).unwrap();
        let kids = root.children();
        assert_eq!(find_active_period(kids, &at(0)), Some(0));
        assert_eq!(find_active_period(kids, &at(359)), Some(0));
        assert_eq!(find_active_period(kids, &at(360)), Some(1));
        assert_eq!(find_active_period(kids, &at(6 * 360)), None);
        assert_eq!(find_active_period(kids, &at(-1)), None);
        assert_eq!(find_active_period::<char>(&[], &at(0)), None);
    }

    #[test]
    fn snapshot_matches_full_tree() {
        let root = build_tree(1, at(100), at(6 * 360), 3, &seq(), RootSpan::Cycle).unwrap();
        let query = at(1234);
        let chain = snapshot(&seq(), &root.leaf(), &query, 3).unwrap();
        assert_eq!(chain.len(), 3);

        let mut level = root.children();
        for node in &chain {
            let idx = find_active_period(level, &query).unwrap();
            assert_eq!(node, &level[idx].leaf());
            level = level[idx].children();
        }
    }

    #[test]
    fn snapshot_outside_root_is_empty() {
        let root = build_tree(0, at(0), at(6 * 360), 0, &seq(), RootSpan::Cycle).unwrap();
        assert!(snapshot(&seq(), &root, &at(-5), 2).unwrap().is_empty());
    }

    #[test]
    fn snapshot_levels_are_named() {
        let root = build_tree(0, at(0), at(6 * 360), 0, &seq(), RootSpan::Cycle).unwrap();
        let chain = snapshot(&seq(), &root, &at(10), 9).unwrap();
        assert_eq!(chain.len(), MAX_DASHA_DEPTH as usize);
        assert_eq!(chain[0].level(), 1);
        assert_eq!(chain[4].level(), 5);
        assert!(chain.windows(2).all(|w| w[0].interval().start() <= w[1].start()));
    }
}
