//! Proportional subdivision with partial-first-period clipping.
//!
//! Every level uses the same rule: a node with nominal span
//! `[nominal_start, end)` ruled by sequence position `p` has one child per
//! ruler, in cyclic order from `p`, child `k` covering the cumulative weight
//! fraction `[W_k / W, W_{k+1} / W)` of the nominal span. Boundaries are
//! computed on integer nanoseconds from the cumulative weight, so the last
//! child ends exactly on the parent's end and siblings never drift apart.
//!
//! Children ending at or before the node's (clipped) start are discarded and
//! the first survivor is clipped to that start; the rule recurses into it.

use kaal_time::{Instant, Interval, delta_from_nanos, delta_to_nanos};
use tracing::debug;

use crate::error::VedicError;

use super::sequence::RulerSequence;
use super::types::{MAX_DASHA_DEPTH, MAX_PERIODS_PER_LEVEL, PeriodNode, RootSpan};

fn offset(base: Instant, nanos: i128) -> Result<Instant, VedicError> {
    let delta =
        delta_from_nanos(nanos).ok_or(VedicError::InvalidInput("period offset out of range"))?;
    Ok(base.checked_add(delta)?)
}

fn check_size(n: usize, depth: u8) -> Result<(), VedicError> {
    let deepest = (n as u128).saturating_pow(depth as u32);
    if deepest > MAX_PERIODS_PER_LEVEL as u128 {
        return Err(VedicError::InvalidInput(
            "dasha level would exceed MAX_PERIODS_PER_LEVEL",
        ));
    }
    Ok(())
}

/// Children of the node spanning `interval` whose unclipped start is
/// `nominal_start`, `remaining` levels deep.
fn subdivide<R: Copy + PartialEq>(
    sequence: &RulerSequence<R>,
    ruler_pos: usize,
    nominal_start: Instant,
    interval: Interval,
    level: u8,
    remaining: u8,
) -> Result<Vec<PeriodNode<R>>, VedicError> {
    if remaining == 0 {
        return Ok(Vec::new());
    }
    let clip = interval.start();
    let total = delta_to_nanos(interval.end() - nominal_start);
    let total_weight = sequence.total_weight() as i128;

    let mut children = Vec::with_capacity(sequence.len());
    let mut cumulative: i128 = 0;
    for (pos, ruler, weight) in sequence.cyclic_from(ruler_pos) {
        let child_nominal_start = offset(nominal_start, total * cumulative / total_weight)?;
        cumulative += weight as i128;
        let child_end = offset(nominal_start, total * cumulative / total_weight)?;

        // Ended before the reference instant.
        if child_end <= clip {
            continue;
        }
        let start = child_nominal_start.max(clip);
        // Zero-length children only occur for sub-nanosecond parents.
        let Ok(child_interval) = Interval::new(start, child_end) else {
            continue;
        };
        let grandchildren = subdivide(
            sequence,
            pos,
            child_nominal_start,
            child_interval,
            level + 1,
            remaining - 1,
        )?;
        children.push(PeriodNode::new(
            ruler,
            level,
            child_interval,
            child_nominal_start,
            grandchildren,
        ));
    }
    Ok(children)
}

/// Build a period tree `depth` levels deep below the root.
///
/// The root covers `[root_start, root_end)` and is ruled by the sequence
/// entry at `anchor`. Its nominal length comes from `span`; when the root is
/// shorter than that, it is the tail of a theoretical period ending at
/// `root_end`, and all levels are clipped at `root_start`. A root longer than
/// its nominal length is split proportionally over its own duration.
///
/// `depth` is clamped to [`MAX_DASHA_DEPTH`].
pub fn build_tree<R: Copy + PartialEq>(
    anchor: usize,
    root_start: Instant,
    root_end: Instant,
    depth: u8,
    sequence: &RulerSequence<R>,
    span: RootSpan,
) -> Result<PeriodNode<R>, VedicError> {
    let depth = depth.min(MAX_DASHA_DEPTH);
    let ruler = sequence
        .ruler(anchor)
        .ok_or(VedicError::InvalidInput("anchor index out of range"))?;
    check_size(sequence.len(), depth)?;
    let root = Interval::new(root_start, root_end)
        .map_err(|_| VedicError::InvalidInput("root end must follow root start"))?;

    let nominal = sequence.nominal(span, anchor)?.max(root.duration());
    let nominal_start = root_end.checked_sub(nominal)?;
    debug!(
        anchor,
        depth,
        root_start = %root_start,
        root_end = %root_end,
        partial = nominal_start < root_start,
        "building period tree"
    );

    let children = subdivide(sequence, anchor, nominal_start, root, 1, depth)?;
    Ok(PeriodNode::new(ruler, 0, root, nominal_start, children))
}

/// One level of children for `node`, generated on demand.
pub fn children_of<R: Copy + PartialEq>(
    sequence: &RulerSequence<R>,
    node: &PeriodNode<R>,
) -> Result<Vec<PeriodNode<R>>, VedicError> {
    if node.level() >= MAX_DASHA_DEPTH {
        return Ok(Vec::new());
    }
    let pos = sequence
        .position(*node.ruler())
        .ok_or(VedicError::InvalidInput("ruler not in sequence"))?;
    subdivide(
        sequence,
        pos,
        node.nominal_start(),
        node.interval(),
        node.level() + 1,
        1,
    )
}

impl<R: Copy + PartialEq> PeriodNode<R> {
    /// A copy of this node with `depth` levels generated below it.
    ///
    /// Existing children are regenerated, not reused; the result never
    /// extends past [`MAX_DASHA_DEPTH`].
    pub fn expand(&self, sequence: &RulerSequence<R>, depth: u8) -> Result<Self, VedicError> {
        let depth = depth.min(MAX_DASHA_DEPTH.saturating_sub(self.level()));
        check_size(sequence.len(), depth)?;
        let pos = sequence
            .position(*self.ruler())
            .ok_or(VedicError::InvalidInput("ruler not in sequence"))?;
        let children = subdivide(
            sequence,
            pos,
            self.nominal_start(),
            self.interval(),
            self.level() + 1,
            depth,
        )?;
        Ok(PeriodNode::new(
            *self.ruler(),
            self.level(),
            self.interval(),
            self.nominal_start(),
            children,
        ))
    }
}
