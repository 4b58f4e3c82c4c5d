//! Property tests: every tree partitions its root.

use chrono::{TimeDelta, TimeZone, Utc};
use kaal_time::{GeoLocation, Instant};
use kaal_vedic_base::dasha::{PeriodNode, RootSpan, RulerSequence, build_tree, snapshot};
use proptest::prelude::*;

fn t0() -> Instant {
    Instant::new(
        Utc.with_ymd_and_hms(2010, 5, 5, 0, 0, 0).unwrap(),
        GeoLocation::default(),
    )
}

fn check_partition<R: std::fmt::Debug>(node: &PeriodNode<R>) -> Result<(), TestCaseError> {
    let kids = node.children();
    if kids.is_empty() {
        return Ok(());
    }
    prop_assert_eq!(kids[0].start(), node.start());
    prop_assert_eq!(kids[kids.len() - 1].end(), node.end());
    for pair in kids.windows(2) {
        prop_assert_eq!(pair[0].end(), pair[1].start());
    }
    for k in kids {
        prop_assert!(k.start() < k.end());
        prop_assert_eq!(k.level(), node.level() + 1);
        check_partition(k)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn children_tile_parent(
        weights in prop::collection::vec(1u32..40, 1..8),
        anchor_seed in 0usize..64,
        depth in 0u8..4,
        clip_permille in 0i64..1000,
        whole_cycle in any::<bool>(),
    ) {
        let total: u32 = weights.iter().sum();
        let rulers: Vec<(usize, u32)> = weights.iter().copied().enumerate().collect();
        let n = rulers.len();
        let seq = RulerSequence::new(rulers, total, TimeDelta::days(365)).unwrap();
        let anchor = anchor_seed % n;
        let span = if whole_cycle { RootSpan::Cycle } else { RootSpan::Period };

        let nominal = seq.nominal(span, anchor).unwrap();
        let root_end = t0() + nominal;
        let root_start = t0() + nominal * clip_permille as i32 / 1000;
        let root = build_tree(anchor, root_start, root_end, depth, &seq, span).unwrap();

        prop_assert_eq!(root.start(), root_start);
        prop_assert_eq!(root.end(), root_end);
        check_partition(&root)?;
    }

    #[test]
    fn snapshot_nests(
        offset_days in 0i64..(120 * 365),
        depth in 1u8..6,
    ) {
        let rulers = vec![('k', 7), ('s', 20), ('u', 6), ('c', 10), ('m', 7),
                          ('r', 18), ('g', 16), ('n', 19), ('b', 17)];
        let seq = RulerSequence::new(rulers, 120, TimeDelta::days(365)).unwrap();
        let root = build_tree(0, t0(), t0() + TimeDelta::days(120 * 365), 0, &seq, RootSpan::Cycle)
            .unwrap();
        let at = t0() + TimeDelta::days(offset_days);
        let chain = snapshot(&seq, &root, &at, depth).unwrap();
        prop_assert_eq!(chain.len(), depth as usize);
        for node in &chain {
            prop_assert!(node.contains(&at));
        }
    }
}
