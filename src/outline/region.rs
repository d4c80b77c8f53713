//! Region: an outline segment set plus hole rings
//!
//! The outline may be made of several loops (for example board edge cuts
//! with a cutout drawn as a separate circle); parity over all of them is
//! what decides containment. Holes are tested one by one.

use crate::geometry::{
    is_point_inside_segments, point_segments_distance, BoundingBox, Point, Segment,
};
use crate::tessellation::TessellatedPolygon;
use std::collections::HashMap;

/// Closed planar area with optional holes
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    outline: Vec<Segment>,
    holes: Vec<Vec<Segment>>,
    bbox: Option<BoundingBox>,
}

impl Region {
    pub fn new(outline: Vec<Segment>, holes: Vec<Vec<Segment>>) -> Self {
        let bbox = BoundingBox::from_points(outline.iter().flat_map(|s| [s.a, s.b]));
        Self {
            outline,
            holes,
            bbox,
        }
    }

    pub fn from_tessellated(polygon: TessellatedPolygon) -> Self {
        Self::new(polygon.outline, polygon.holes)
    }

    pub fn outline(&self) -> &[Segment] {
        &self.outline
    }

    pub fn holes(&self) -> &[Vec<Segment>] {
        &self.holes
    }

    /// Number of outline segments that have a non-zero length
    pub fn boundary_segment_count(&self) -> usize {
        self.outline.iter().filter(|s| !s.is_degenerate()).count()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bbox
    }

    /// First endpoint that does not close up, outline first, then holes
    ///
    /// Every vertex of a set of closed loops is shared by an even number of
    /// segment ends.
    pub fn open_vertex(&self) -> Option<Point> {
        std::iter::once(&self.outline)
            .chain(self.holes.iter())
            .find_map(|ring| odd_vertex(ring))
    }

    /// Inside the outline and outside every hole
    pub fn contains(&self, p: Point) -> bool {
        match self.bbox {
            Some(bbox) if bbox.contains(p) => {}
            _ => return false,
        }
        if !is_point_inside_segments(p, &self.outline) {
            return false;
        }
        !self.holes.iter().any(|hole| is_point_inside_segments(p, hole))
    }

    /// Minimum distance to any outline or hole segment
    pub fn distance_to_boundary(&self, p: Point) -> f64 {
        self.holes
            .iter()
            .map(|hole| point_segments_distance(p, hole))
            .fold(point_segments_distance(p, &self.outline), f64::min)
    }
}

fn odd_vertex(segments: &[Segment]) -> Option<Point> {
    let mut degree: HashMap<Point, usize> = HashMap::new();
    for s in segments {
        *degree.entry(s.a).or_default() += 1;
        *degree.entry(s.b).or_default() += 1;
    }
    // segment order keeps the reported vertex stable
    segments
        .iter()
        .flat_map(|s| [s.a, s.b])
        .find(|p| degree.get(p).is_some_and(|d| d % 2 != 0))
}
