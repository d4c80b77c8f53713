//! Polyline and polygon-with-holes tessellation
//!
//! Outlines may mix straight vertices and arc nodes. The outline and every
//! hole are tessellated separately so containment can treat holes on
//! their own.

use crate::geometry::{Arc, BoundingBox, Point, Segment};
use serde::Deserialize;
use super::shapes::{arc_points, ring_segments, TessellationTolerance};

/// A vertex or an arc in a polyline
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolyNode {
    Point(Point),
    Arc(Arc),
}

fn default_closed() -> bool {
    true
}

/// Sequence of nodes, closed by default
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolyLine {
    pub nodes: Vec<PolyNode>,
    #[serde(default = "default_closed")]
    pub closed: bool,
}

impl PolyLine {
    /// Closed polyline through the given vertices
    pub fn closed_from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        Self {
            nodes: points.into_iter().map(PolyNode::Point).collect(),
            closed: true,
        }
    }
}

/// Filled polygon with optional holes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolygonWithHoles {
    pub outline: PolyLine,
    #[serde(default)]
    pub holes: Vec<PolyLine>,
}

impl PolygonWithHoles {
    pub fn new(outline: PolyLine, holes: Vec<PolyLine>) -> Self {
        Self { outline, holes }
    }
}

/// Tessellated outline and holes, kept apart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TessellatedPolygon {
    pub outline: Vec<Segment>,
    pub holes: Vec<Vec<Segment>>,
}

impl TessellatedPolygon {
    /// Bounding box of the outline vertices
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.outline.iter().flat_map(|s| [s.a, s.b]))
    }
}

/// Flatten a polyline into vertices
///
/// An arc node without a center contributes only its start point.
/// Consecutive duplicates are dropped, as is a closing vertex equal to the
/// first one.
pub fn polyline_points(poly: &PolyLine, tolerance: &TessellationTolerance) -> Vec<Point> {
    let mut points = Vec::new();
    for node in &poly.nodes {
        match node {
            PolyNode::Point(p) => points.push(*p),
            PolyNode::Arc(arc) => {
                if arc.center.is_none() {
                    points.push(arc.start);
                } else {
                    points.extend(arc_points(arc, tolerance));
                }
            }
        }
    }
    points.dedup();
    if poly.closed && points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Tessellate a polyline into segments
pub fn tessellate_polyline(poly: &PolyLine, tolerance: &TessellationTolerance) -> Vec<Segment> {
    ring_segments(&polyline_points(poly, tolerance), poly.closed)
}

/// Tessellate a polygon's outline and holes independently
///
/// Holes that cannot enclose any area (fewer than three segments) are skipped.
pub fn tessellate_polygon(
    polygon: &PolygonWithHoles,
    tolerance: &TessellationTolerance,
) -> TessellatedPolygon {
    let outline = tessellate_polyline(&polygon.outline, tolerance);
    let holes = polygon
        .holes
        .iter()
        .map(|hole| tessellate_polyline(hole, tolerance))
        .filter(|segments| segments.len() >= 3)
        .collect();
    TessellatedPolygon { outline, holes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn square(x0: i64, y0: i64, size: i64) -> PolyLine {
        PolyLine::closed_from_points([
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ])
    }

    #[test]
    fn test_polygon_keeps_holes_separate() {
        let tol = TessellationTolerance::default();
        let polygon = PolygonWithHoles::new(square(0, 0, 100), vec![square(40, 40, 20), square(10, 10, 5)]);
        let t = tessellate_polygon(&polygon, &tol);
        assert_eq!(t.outline.len(), 4);
        assert_eq!(t.holes.len(), 2);
        assert_eq!(t.holes[0][0].a, Point::new(40, 40));
    }

    #[test]
    fn test_degenerate_hole_skipped() {
        let tol = TessellationTolerance::default();
        let sliver = PolyLine::closed_from_points([Point::new(1, 1), Point::new(2, 2)]);
        let polygon = PolygonWithHoles::new(square(0, 0, 100), vec![sliver]);
        assert!(tessellate_polygon(&polygon, &tol).holes.is_empty());
    }

    #[test]
    fn test_polyline_with_arc_node() {
        let tol = TessellationTolerance::default();
        // D-shape: straight edge plus a half circle back to the start
        let arc = Arc::from_center(Point::new(0, 0), 1000.0, -PI / 2.0, PI);
        let poly = PolyLine {
            nodes: vec![PolyNode::Point(Point::new(0, 1000)), PolyNode::Arc(arc)],
            closed: true,
        };
        let points = polyline_points(&poly, &tol);
        assert_eq!(points[0], Point::new(0, 1000));
        assert_eq!(points[1], Point::new(0, -1000));
        // 18 arc steps ending back at the first vertex, which is dropped
        assert_eq!(points.len(), 19);
        let segments = tessellate_polyline(&poly, &tol);
        assert_eq!(segments.len(), 19);
        assert!(segments.iter().all(|s| !s.is_degenerate()));
    }

    #[test]
    fn test_centerless_arc_node_contributes_start() {
        let tol = TessellationTolerance::default();
        let flat = Arc::from_three_points(Point::new(10, 0), Point::new(10, 5), Point::new(10, 10));
        let poly = PolyLine {
            nodes: vec![
                PolyNode::Point(Point::new(0, 0)),
                PolyNode::Arc(flat),
                PolyNode::Point(Point::new(0, 10)),
            ],
            closed: true,
        };
        assert_eq!(
            polyline_points(&poly, &tol),
            vec![Point::new(0, 0), Point::new(10, 0), Point::new(0, 10)]
        );
    }

    #[test]
    fn test_polygon_deserializes_from_json() {
        let json = r#"{
            "outline": { "nodes": [
                { "point": { "x": 0, "y": 0 } },
                { "point": { "x": 10, "y": 0 } },
                { "arc": { "start": { "x": 10, "y": 0 }, "mid": { "x": 15, "y": 5 }, "end": { "x": 10, "y": 10 } } },
                { "point": { "x": 0, "y": 10 } }
            ] }
        }"#;
        let polygon: PolygonWithHoles = serde_json::from_str(json).unwrap();
        assert!(polygon.outline.closed);
        assert!(polygon.holes.is_empty());
        assert!(matches!(polygon.outline.nodes[2], PolyNode::Arc(a) if a.center == Some(Point::new(10, 5))));
    }
}
