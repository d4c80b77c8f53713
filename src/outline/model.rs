//! Outline model
//!
//! Aggregates tessellated boundary shapes into regions and answers the
//! queries the grid generator and the resolver need.

use crate::error::{PlacementError, Result};
use crate::geometry::{Arc, BoundingBox, Point, Segment};
use crate::tessellation::{
    rectangle_points, tessellate_arc, tessellate_circle, tessellate_polygon,
    tessellate_rectangle, PolygonWithHoles, TessellatedPolygon, TessellationTolerance,
};
use super::region::Region;
use serde::Deserialize;
use std::collections::BTreeSet;

/// One shape of a board outline
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryShape {
    Segment { start: Point, end: Point },
    Arc { arc: Arc },
    Circle { center: Point, radius: i64 },
    Rectangle { corner: Point, size: Point },
    Polygon { polygon: PolygonWithHoles },
}

impl BoundaryShape {
    pub fn tessellate(&self, tolerance: &TessellationTolerance) -> TessellatedPolygon {
        let outline = match self {
            BoundaryShape::Segment { start, end } => vec![Segment::new(*start, *end)],
            BoundaryShape::Arc { arc } => tessellate_arc(arc, tolerance),
            BoundaryShape::Circle { center, radius } => {
                tessellate_circle(*center, *radius as f64, tolerance)
            }
            BoundaryShape::Rectangle { corner, size } => tessellate_rectangle(*corner, *size),
            BoundaryShape::Polygon { polygon } => return tessellate_polygon(polygon, tolerance),
        };
        TessellatedPolygon {
            outline,
            holes: vec![],
        }
    }

    pub fn bounding_box(&self, tolerance: &TessellationTolerance) -> Option<BoundingBox> {
        match self {
            BoundaryShape::Segment { start, end } => BoundingBox::from_points([*start, *end]),
            BoundaryShape::Circle { center, radius } => {
                if *radius <= 0 {
                    return None;
                }
                let r = Point::new(*radius, *radius);
                BoundingBox::from_points([*center - r, *center + r])
            }
            BoundaryShape::Rectangle { corner, size } => {
                BoundingBox::from_points(rectangle_points(*corner, *size))
            }
            BoundaryShape::Arc { .. } | BoundaryShape::Polygon { .. } => {
                self.tessellate(tolerance).bounding_box()
            }
        }
    }
}

/// Filled area to stitch
///
/// With `layers` set, candidates admitted by this area are only checked
/// against obstacles on those layers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AreaSpec {
    #[serde(flatten)]
    pub polygon: PolygonWithHoles,
    #[serde(default)]
    pub layers: Option<Vec<String>>,
}

impl AreaSpec {
    pub fn on_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers = Some(layers.into_iter().map(Into::into).collect());
        self
    }

    /// Sorted, deduplicated layer names, if the area is restricted
    pub fn layer_set(&self) -> Option<Vec<String>> {
        self.layers.as_ref().map(|layers| {
            layers
                .iter()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        })
    }
}

impl From<PolygonWithHoles> for AreaSpec {
    fn from(polygon: PolygonWithHoles) -> Self {
        Self {
            polygon,
            layers: None,
        }
    }
}

/// Result of testing a candidate against the outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionCheck {
    /// Admitted by the area at this index
    Inside { area: usize },
    Outside,
    /// Inside, but closer to the boundary than allowed
    TooClose { distance: f64 },
}

/// Placement region built from boundary shapes or filled areas
#[derive(Debug, Clone)]
pub struct Outline {
    areas: Vec<Region>,
    bbox: BoundingBox,
}

impl Outline {
    /// One region from a set of boundary shapes
    ///
    /// The outlines of all shapes form a single segment set, so a circle
    /// drawn inside a rectangle acts as a cutout. Polygon holes stay holes.
    pub fn from_shapes(shapes: &[BoundaryShape]) -> Result<Self> {
        Self::from_shapes_with(shapes, &TessellationTolerance::default())
    }

    pub fn from_shapes_with(
        shapes: &[BoundaryShape],
        tolerance: &TessellationTolerance,
    ) -> Result<Self> {
        if shapes.is_empty() {
            return Err(PlacementError::EmptyOutline);
        }

        let mut outline = Vec::new();
        let mut holes = Vec::new();
        let mut bbox: Option<BoundingBox> = None;
        for shape in shapes {
            let tessellated = shape.tessellate(tolerance);
            outline.extend(tessellated.outline);
            holes.extend(tessellated.holes);
            if let Some(b) = shape.bounding_box(tolerance) {
                merge_into(&mut bbox, &b);
            }
        }

        Self::build(vec![Region::new(outline, holes)], bbox)
    }

    /// One region per filled area
    pub fn from_areas(areas: &[PolygonWithHoles]) -> Result<Self> {
        Self::from_areas_with(areas, &TessellationTolerance::default())
    }

    pub fn from_areas_with(
        areas: &[PolygonWithHoles],
        tolerance: &TessellationTolerance,
    ) -> Result<Self> {
        if areas.is_empty() {
            return Err(PlacementError::EmptyOutline);
        }

        let mut bbox: Option<BoundingBox> = None;
        let regions: Vec<Region> = areas
            .iter()
            .map(|area| Region::from_tessellated(tessellate_polygon(area, tolerance)))
            .collect();
        for region in &regions {
            if let Some(b) = region.bounding_box() {
                merge_into(&mut bbox, &b);
            }
        }

        Self::build(regions, bbox)
    }

    fn build(areas: Vec<Region>, bbox: Option<BoundingBox>) -> Result<Self> {
        let segments: usize = areas.iter().map(Region::boundary_segment_count).sum();
        if segments < 3 {
            return Err(PlacementError::DegenerateOutline {
                reason: format!("{} non-degenerate boundary segments, need at least 3", segments),
            });
        }
        if let Some(p) = areas.iter().find_map(Region::open_vertex) {
            return Err(PlacementError::DegenerateOutline {
                reason: format!("outline is not closed at ({}, {})", p.x, p.y),
            });
        }
        let bbox = match bbox {
            Some(b) if b.width() > 0 && b.height() > 0 => b,
            Some(b) => {
                return Err(PlacementError::DegenerateOutline {
                    reason: format!("bounding box has zero area ({} x {} nm)", b.width(), b.height()),
                })
            }
            None => {
                return Err(PlacementError::DegenerateOutline {
                    reason: "no bounding box".to_string(),
                })
            }
        };
        Ok(Self { areas, bbox })
    }

    pub fn areas(&self) -> &[Region] {
        &self.areas
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn contains(&self, p: Point) -> bool {
        self.areas.iter().any(|area| area.contains(p))
    }

    /// Distance to the nearest boundary segment of any area
    pub fn distance_to_boundary(&self, p: Point) -> f64 {
        self.areas
            .iter()
            .map(|area| area.distance_to_boundary(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Containment plus edge clearance
    ///
    /// The first area that contains `p` with at least `min_edge_distance`
    /// to its boundary admits it. When areas contain `p` but none clear
    /// the edge, the largest measured distance is reported.
    pub fn check(&self, p: Point, min_edge_distance: f64) -> RegionCheck {
        let mut closest: Option<f64> = None;
        for (index, area) in self.areas.iter().enumerate() {
            if !area.contains(p) {
                continue;
            }
            let distance = area.distance_to_boundary(p);
            if distance >= min_edge_distance {
                return RegionCheck::Inside { area: index };
            }
            closest = Some(closest.map_or(distance, |c| c.max(distance)));
        }
        match closest {
            Some(distance) => RegionCheck::TooClose { distance },
            None => RegionCheck::Outside,
        }
    }
}

fn merge_into(acc: &mut Option<BoundingBox>, b: &BoundingBox) {
    match acc {
        Some(existing) => existing.merge(b),
        None => *acc = Some(*b),
    }
}
