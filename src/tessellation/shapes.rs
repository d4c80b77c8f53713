//! Standard shape tessellation
//!
//! Circles, rectangles and arcs are turned into straight segments. The
//! resolution is set by `TessellationTolerance`; the defaults trade a little
//! fidelity for fewer segments to test against every candidate.

use crate::geometry::{Arc, Point, Segment};
use std::f64::consts::{PI, TAU};

/// Sides of the polygon approximating a full circle
pub const CIRCLE_SEGMENTS: usize = 64;

/// Angular step used to tessellate arcs (about 10 degrees)
pub const ARC_ANGLE_STEP: f64 = PI / 18.0;

/// Arcs always produce at least this many segments
pub const MIN_ARC_SEGMENTS: usize = 2;

/// Curve tessellation resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationTolerance {
    pub circle_segments: usize,
    pub arc_step: f64,
}

impl Default for TessellationTolerance {
    fn default() -> Self {
        Self {
            circle_segments: CIRCLE_SEGMENTS,
            arc_step: ARC_ANGLE_STEP,
        }
    }
}

/// Connect consecutive points, optionally closing the ring
pub fn ring_segments(points: &[Point], closed: bool) -> Vec<Segment> {
    if points.len() < 2 {
        return vec![];
    }
    let mut segments: Vec<Segment> = points
        .windows(2)
        .map(|w| Segment::new(w[0], w[1]))
        .collect();
    if closed {
        segments.push(Segment::new(points[points.len() - 1], points[0]));
    }
    segments
}

/// Vertices of the polygon approximating a circle
pub fn circle_points(center: Point, radius: f64, tolerance: &TessellationTolerance) -> Vec<Point> {
    if radius <= 0.0 {
        return vec![];
    }
    let segments = tolerance.circle_segments.max(3);
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            Point::from_f64(
                center.x as f64 + radius * angle.cos(),
                center.y as f64 + radius * angle.sin(),
            )
        })
        .collect()
}

/// Tessellate a circle into a closed ring
pub fn tessellate_circle(center: Point, radius: f64, tolerance: &TessellationTolerance) -> Vec<Segment> {
    ring_segments(&circle_points(center, radius, tolerance), true)
}

/// Corners of a rectangle given by one corner and its size
pub fn rectangle_points(corner: Point, size: Point) -> [Point; 4] {
    let p1 = corner;
    let p3 = corner + size;
    let p2 = Point::new(p3.x, p1.y);
    let p4 = Point::new(p1.x, p3.y);
    [p1, p2, p3, p4]
}

/// Tessellate a rectangle into four segments
pub fn tessellate_rectangle(corner: Point, size: Point) -> Vec<Segment> {
    ring_segments(&rectangle_points(corner, size), true)
}

/// Points along an arc, endpoints included
///
/// A degenerate arc yields only its endpoints.
pub fn arc_points(arc: &Arc, tolerance: &TessellationTolerance) -> Vec<Point> {
    if arc.center.is_none() {
        return vec![arc.start, arc.end];
    }

    let steps = if tolerance.arc_step > 0.0 {
        // slack keeps exact multiples of the step from flooring one short
        (arc.sweep.abs() / tolerance.arc_step + 1e-9).floor() as usize
    } else {
        0
    };
    let steps = steps.max(MIN_ARC_SEGMENTS);

    let mut points = Vec::with_capacity(steps + 1);
    points.push(arc.start);
    for i in 1..steps {
        let angle = arc.start_angle + arc.sweep * i as f64 / steps as f64;
        if let Some(p) = arc.point_at(angle) {
            points.push(p);
        }
    }
    points.push(arc.end);
    points
}

/// Tessellate an arc into an open chain of segments
pub fn tessellate_arc(arc: &Arc, tolerance: &TessellationTolerance) -> Vec<Segment> {
    ring_segments(&arc_points(arc, tolerance), false)
}
