//! Differential pair fencing
//!
//! Both traces of the pair are fenced on both sides, then the candidates
//! that fall between the traces are dropped. A candidate lies between the
//! traces when it is closer to some midpoint of the pair than its own base
//! point is.

use crate::error::{PlacementError, Result};
use crate::geometry::Point;
use super::fence::{fence_points, FenceCurve, FenceLayout, FencePoint, FenceSides};
use serde::{Deserialize, Serialize};

/// What to do with candidates beyond the shorter trace's sequence
///
/// Midpoints pair the two candidate sequences index by index, so when one
/// trace produces more candidates its extra ones have no partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailPolicy {
    /// Keep them without the outward test
    #[default]
    Keep,
    /// Discard them
    Drop,
}

/// Outward-facing fence candidates for a pair of traces
///
/// The per-curve side selection is ignored: both sides are always
/// generated so the pair's outer edges are found on either trace.
pub fn diff_pair_candidates(
    curves: &[FenceCurve],
    layout: &FenceLayout,
    tail: TailPolicy,
) -> Result<Vec<Point>> {
    let [first, second] = curves else {
        return Err(PlacementError::DiffPairCurveCount {
            count: curves.len(),
        });
    };

    let signs = FenceSides::Both.signs();
    let points1 = fence_points(first, layout, signs);
    let points2 = fence_points(second, layout, signs);

    let midpoints: Vec<Point> = points1
        .iter()
        .zip(&points2)
        .map(|(a, b)| a.point.midpoint(b.point))
        .collect();
    let paired = midpoints.len();

    let mut kept = 0usize;
    let mut candidates = Vec::with_capacity(points1.len() + points2.len());
    for sequence in [&points1, &points2] {
        for (i, fp) in sequence.iter().enumerate() {
            let keep = if i < paired {
                is_outward(fp, &midpoints)
            } else {
                tail == TailPolicy::Keep
            };
            if keep {
                candidates.push(fp.point);
                kept += 1;
            }
        }
    }

    tracing::debug!(
        "Differential pair: {} + {} fence points, {} midpoints, {} outward",
        points1.len(),
        points2.len(),
        paired,
        kept
    );
    Ok(candidates)
}

fn is_outward(fp: &FencePoint, midpoints: &[Point]) -> bool {
    midpoints
        .iter()
        .all(|&m| fp.point.distance(m) >= fp.base.distance(m))
}
