//! Fence candidate generation
//!
//! Rows of points parallel to a reference segment or concentric with a
//! reference arc, on one or both sides of it.

use crate::geometry::{Arc, Point};
use serde::Deserialize;

/// Reference curve geometry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FenceGeometry {
    Segment { start: Point, end: Point },
    Arc { arc: Arc },
}

/// Which sides of a curve to fence
///
/// `Positive` is the left of a segment's direction and the outside of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FenceSides {
    #[default]
    Both,
    Positive,
    Negative,
}

impl FenceSides {
    pub fn signs(self) -> &'static [f64] {
        match self {
            FenceSides::Both => &[-1.0, 1.0],
            FenceSides::Positive => &[1.0],
            FenceSides::Negative => &[-1.0],
        }
    }
}

/// A fence reference curve
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FenceCurve {
    #[serde(flatten)]
    pub geometry: FenceGeometry,
    /// Full trace width
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub sides: FenceSides,
}

impl FenceCurve {
    pub fn segment(start: Point, end: Point, width: i64) -> Self {
        Self {
            geometry: FenceGeometry::Segment { start, end },
            width,
            sides: FenceSides::Both,
        }
    }

    pub fn arc(arc: Arc, width: i64) -> Self {
        Self {
            geometry: FenceGeometry::Arc { arc },
            width,
            sides: FenceSides::Both,
        }
    }

    pub fn with_sides(mut self, sides: FenceSides) -> Self {
        self.sides = sides;
        self
    }
}

/// Fence row layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FenceLayout {
    pub spacing: i64,
    /// Distance from the trace edge to the first row
    pub distance: i64,
    pub rows: u32,
    /// Extra distance added for each further row
    pub row_offset: i64,
    pub element_radius: f64,
}

/// A fence candidate and the point on its reference curve it was offset from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FencePoint {
    pub point: Point,
    pub base: Point,
}

/// Candidates for one curve, rows outermost, then sides in `signs` order
pub fn fence_points(curve: &FenceCurve, layout: &FenceLayout, signs: &[f64]) -> Vec<FencePoint> {
    let half_width = curve.width as f64 / 2.0;
    if layout.distance as f64 <= half_width + layout.element_radius {
        tracing::warn!(
            "Fence distance {} nm does not clear the trace half-width {} nm plus element radius {} nm",
            layout.distance,
            half_width,
            layout.element_radius
        );
    }
    if layout.spacing <= 0 {
        return vec![];
    }

    let mut points = Vec::new();
    for row in 1..=layout.rows {
        let row_distance = layout.distance as f64 + (row - 1) as f64 * layout.row_offset as f64;
        let offset = row_distance + half_width;
        for &side in signs {
            match &curve.geometry {
                FenceGeometry::Segment { start, end } => {
                    offset_segment(*start, *end, offset * side, layout.spacing, &mut points)
                }
                FenceGeometry::Arc { arc } if arc.center.is_some() => {
                    offset_arc(arc, offset * side, layout.spacing, &mut points)
                }
                // collinear arc: fence its chord
                FenceGeometry::Arc { arc } => {
                    offset_segment(arc.start, arc.end, offset * side, layout.spacing, &mut points)
                }
            }
        }
    }
    points
}

/// Point count for a curve of `length`, or `None` when fewer than two fit
fn point_count(length: f64, spacing: i64) -> Option<usize> {
    let count = (length / spacing as f64).round() as usize + 1;
    (count > 1).then_some(count)
}

fn offset_segment(start: Point, end: Point, offset: f64, spacing: i64, out: &mut Vec<FencePoint>) {
    let [ax, ay] = start.to_f64();
    let [bx, by] = end.to_f64();
    let (dx, dy) = (bx - ax, by - ay);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return;
    }
    let Some(count) = point_count(length, spacing) else {
        return;
    };

    let (ux, uy) = (dx / length, dy / length);
    let (nx, ny) = (-uy * offset, ux * offset);
    let step = length / (count - 1) as f64;
    for i in 0..count {
        let along = step * i as f64;
        let (x, y) = (ax + ux * along, ay + uy * along);
        out.push(FencePoint {
            point: Point::from_f64(x + nx, y + ny),
            base: Point::from_f64(x, y),
        });
    }
}

fn offset_arc(arc: &Arc, offset: f64, spacing: i64, out: &mut Vec<FencePoint>) {
    let radius = arc.radius + offset;
    if radius <= 0.0 {
        return;
    }
    let Some(count) = point_count(arc.sweep.abs() * radius, spacing) else {
        return;
    };

    let step = arc.sweep / (count - 1) as f64;
    for i in 0..count {
        let angle = arc.start_angle + step * i as f64;
        if let (Some(point), Some(base)) = (arc.point_at_radius(angle, radius), arc.point_at(angle)) {
            out.push(FencePoint { point, base });
        }
    }
}

/// Candidates for every curve, each fenced on its own sides
pub fn fence_candidates(curves: &[FenceCurve], layout: &FenceLayout) -> Vec<Point> {
    curves
        .iter()
        .flat_map(|curve| fence_points(curve, layout, curve.sides.signs()))
        .map(|fp| fp.point)
        .collect()
}
