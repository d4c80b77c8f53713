//! Distance calculations for clearance checks
//!
//! Point-to-segment, point-to-arc and point-to-ring distances. All
//! functions return nanometers as `f64` and never fail; degenerate input
//! falls back to the nearest well-defined case.

use super::types::{Arc, Point, Segment};
use std::f64::consts::TAU;

/// Angular slack when classifying a point against the arc's angular span
pub const ANGLE_EPSILON: f64 = 1e-9;

/// Wrap an angle into `[0, 2π)`
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Point-to-segment minimum distance
pub fn point_segment_distance(p: Point, seg: &Segment) -> f64 {
    if seg.is_degenerate() {
        return p.distance(seg.a);
    }

    let [px, py] = p.to_f64();
    let [ax, ay] = seg.a.to_f64();
    let [bx, by] = seg.b.to_f64();
    let ab = [bx - ax, by - ay];
    let ap = [px - ax, py - ay];
    let ab_len2 = ab[0] * ab[0] + ab[1] * ab[1];

    let t = ((ap[0] * ab[0] + ap[1] * ab[1]) / ab_len2).clamp(0.0, 1.0);
    let closest = [ax + t * ab[0], ay + t * ab[1]];
    (px - closest[0]).hypot(py - closest[1])
}

/// Whether the direction from the arc center to `p` lies within the arc's sweep
///
/// Both ends are inclusive, for either sweep sign.
pub fn arc_spans_angle(arc: &Arc, angle: f64) -> bool {
    let sweep = arc.sweep.abs();
    let delta = if arc.sweep >= 0.0 {
        normalize_angle(angle - arc.start_angle)
    } else {
        normalize_angle(arc.start_angle - angle)
    };
    // a point just short of the start wraps to nearly 2π
    delta <= sweep + ANGLE_EPSILON || delta >= TAU - ANGLE_EPSILON
}

/// Point-to-arc minimum distance
pub fn point_arc_distance(p: Point, arc: &Arc) -> f64 {
    let center = match arc.center {
        Some(c) => c,
        None => return point_segment_distance(p, &Segment::new(arc.start, arc.end)),
    };

    let cp = p - center;
    let dist_to_center = cp.length();
    if dist_to_center == 0.0 {
        return arc.radius;
    }

    let angle = (cp.y as f64).atan2(cp.x as f64);
    if arc_spans_angle(arc, angle) {
        (dist_to_center - arc.radius).abs()
    } else {
        p.distance(arc.start).min(p.distance(arc.end))
    }
}

/// Minimum distance from a point to any segment in the set
///
/// Returns `f64::INFINITY` for an empty set.
pub fn point_segments_distance(p: Point, segments: &[Segment]) -> f64 {
    segments
        .iter()
        .map(|s| point_segment_distance(p, s))
        .fold(f64::INFINITY, f64::min)
}
