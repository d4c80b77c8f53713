//! Obstacle index
//!
//! Obstacles keep the order they were supplied in. An R-tree over their
//! envelopes narrows each query; the survivors are tested in index order
//! so the first violation reported is the same one a linear scan finds.

use crate::geometry::{arc_spans_angle, Arc, BoundingBox, Point};
use crate::tessellation::TessellationTolerance;
use super::types::{same_net, NetId, Obstacle, ObstacleKind, ObstacleSpec};
use rstar::{RTree, RTreeObject, AABB};
use serde::Serialize;
use std::f64::consts::FRAC_PI_2;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Obstacle envelope in the R-tree
#[derive(Clone, Debug)]
struct IndexedEnvelope {
    slot: usize,
    bounds: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedEnvelope {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

/// A clearance violation against one obstacle
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Violation {
    /// Position in the index
    pub obstacle: usize,
    /// Position of the originating item in the caller's list
    pub source: usize,
    pub kind: &'static str,
    pub distance: f64,
    pub required: f64,
}

/// Static, per-run collection of obstacles
#[derive(Debug)]
pub struct ObstacleIndex {
    obstacles: Vec<Obstacle>,
    tree: RTree<IndexedEnvelope>,
}

impl Default for ObstacleIndex {
    fn default() -> Self {
        Self::from_obstacles(vec![])
    }
}

impl ObstacleIndex {
    /// Normalize caller obstacles and index them
    ///
    /// `layer_filter` restricts the index to items on those layers.
    pub fn build(specs: &[ObstacleSpec], layer_filter: Option<&[String]>) -> Self {
        Self::build_with(specs, layer_filter, &TessellationTolerance::default())
    }

    pub fn build_with(
        specs: &[ObstacleSpec],
        layer_filter: Option<&[String]>,
        tolerance: &TessellationTolerance,
    ) -> Self {
        let start = Instant::now();

        #[cfg(feature = "parallel")]
        let groups: Vec<Vec<Obstacle>> = specs
            .par_iter()
            .enumerate()
            .map(|(source, spec)| spec.normalize(source, layer_filter, tolerance))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let groups: Vec<Vec<Obstacle>> = specs
            .iter()
            .enumerate()
            .map(|(source, spec)| spec.normalize(source, layer_filter, tolerance))
            .collect();

        let obstacles: Vec<Obstacle> = groups.into_iter().flatten().collect();
        let index = Self::from_obstacles(obstacles);

        tracing::debug!(
            "Indexed {} obstacles from {} items in {:.2}ms",
            index.len(),
            specs.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        index
    }

    /// Index already normalized obstacles, keeping their order
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        let entries: Vec<IndexedEnvelope> = obstacles
            .iter()
            .enumerate()
            .filter_map(|(slot, obstacle)| {
                let bounds = envelope(obstacle);
                if bounds.is_none() {
                    tracing::debug!("Obstacle from item {} has no extent, skipped", obstacle.source);
                }
                bounds.map(|bounds| IndexedEnvelope { slot, bounds })
            })
            .collect();
        Self {
            obstacles,
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// First obstacle, in index order, that a circle of `radius` at `point`
    /// violates
    ///
    /// Obstacles on `exempt_net` are skipped. A violation is reported when
    /// `distance < radius + half_width + clearance`.
    pub fn first_violation(
        &self,
        point: Point,
        radius: f64,
        clearance: f64,
        exempt_net: Option<&NetId>,
    ) -> Option<Violation> {
        let reach = radius + clearance;
        let [x, y] = point.to_f64();
        let search_bounds = AABB::from_corners([x - reach, y - reach], [x + reach, y + reach]);

        let mut slots: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&search_bounds)
            .map(|entry| entry.slot)
            .collect();
        slots.sort_unstable();

        slots.into_iter().find_map(|slot| {
            let obstacle = &self.obstacles[slot];
            if same_net(obstacle.net.as_ref(), exempt_net) {
                return None;
            }
            let distance = obstacle.distance(point);
            let required = radius + obstacle.half_width() + clearance;
            (distance < required).then(|| Violation {
                obstacle: slot,
                source: obstacle.source,
                kind: obstacle.kind_name(),
                distance,
                required,
            })
        })
    }

    pub fn clearance_violation(
        &self,
        point: Point,
        radius: f64,
        clearance: f64,
        exempt_net: Option<&NetId>,
    ) -> bool {
        self.first_violation(point, radius, clearance, exempt_net)
            .is_some()
    }
}

/// Envelope of the obstacle's center line or area, grown by its half-width
fn envelope(obstacle: &Obstacle) -> Option<AABB<[f64; 2]>> {
    let bbox = match &obstacle.kind {
        ObstacleKind::Circle { center, .. } => BoundingBox::from_points([*center]),
        ObstacleKind::Segment { segment, .. } => BoundingBox::from_points([segment.a, segment.b]),
        ObstacleKind::Arc { arc, .. } => Some(arc_bounding_box(arc)),
        ObstacleKind::Area(region) => region.bounding_box(),
    }?;
    // one nanometer of slack covers rounding in the tessellated geometry
    let grow = obstacle.half_width() + 1.0;
    Some(AABB::from_corners(
        [bbox.min.x as f64 - grow, bbox.min.y as f64 - grow],
        [bbox.max.x as f64 + grow, bbox.max.y as f64 + grow],
    ))
}

/// Exact bounding box of an arc: endpoints plus any axis extremes it spans
fn arc_bounding_box(arc: &Arc) -> BoundingBox {
    let mut bbox = BoundingBox {
        min: arc.start,
        max: arc.start,
    };
    bbox.include(arc.end);
    if arc.center.is_some() {
        for quadrant in 0..4 {
            let angle = quadrant as f64 * FRAC_PI_2;
            if arc_spans_angle(arc, angle) {
                if let Some(p) = arc.point_at(angle) {
                    bbox.include(p);
                }
            }
        }
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::ObstacleItem;
    use std::f64::consts::PI;

    fn circle(x: i64, y: i64, radius: i64) -> ObstacleSpec {
        ObstacleSpec::new(ObstacleItem::Circle {
            center: Point::new(x, y),
            radius,
        })
    }

    #[test]
    fn test_violation_threshold_is_strict() {
        let index = ObstacleIndex::build(&[circle(0, 0, 100)], None);
        // required = 50 + 100 + 10 = 160
        assert!(index.clearance_violation(Point::new(159, 0), 50.0, 10.0, None));
        assert!(!index.clearance_violation(Point::new(160, 0), 50.0, 10.0, None));
    }

    #[test]
    fn test_first_violation_in_index_order() {
        let specs = vec![circle(1000, 0, 10), circle(0, 0, 500), circle(10, 0, 500)];
        let index = ObstacleIndex::build(&specs, None);
        let v = index.first_violation(Point::new(0, 0), 10.0, 0.0, None).unwrap();
        assert_eq!(v.obstacle, 1);
        assert_eq!(v.source, 1);
        assert_eq!(v.kind, "circle");
        assert_eq!(v.distance, 0.0);
        assert_eq!(v.required, 510.0);
    }

    #[test]
    fn test_same_net_exempt_absent_net_not() {
        let specs = vec![circle(0, 0, 100).with_net("GND")];
        let index = ObstacleIndex::build(&specs, None);
        let gnd = NetId::from("GND");
        let vcc = NetId::from("VCC");
        let p = Point::new(50, 0);
        assert!(!index.clearance_violation(p, 10.0, 0.0, Some(&gnd)));
        assert!(index.clearance_violation(p, 10.0, 0.0, Some(&vcc)));
        assert!(index.clearance_violation(p, 10.0, 0.0, None));

        let untagged = ObstacleIndex::build(&[circle(0, 0, 100)], None);
        assert!(untagged.clearance_violation(p, 10.0, 0.0, None));
        assert!(untagged.clearance_violation(p, 10.0, 0.0, Some(&gnd)));
    }

    #[test]
    fn test_track_half_width_counts() {
        let track = ObstacleSpec::new(ObstacleItem::Track {
            start: Point::new(0, 0),
            end: Point::new(1000, 0),
            width: 200,
        });
        let index = ObstacleIndex::build(&[track], None);
        // required = 10 + 100 + 20 = 130
        assert!(index.clearance_violation(Point::new(500, 129), 10.0, 20.0, None));
        assert!(!index.clearance_violation(Point::new(500, 131), 10.0, 20.0, None));
    }

    #[test]
    fn test_arc_envelope_covers_bulge() {
        // Half circle over the top: the envelope must reach y = 1000
        let arc = Arc::from_center(Point::new(0, 0), 1000.0, 0.0, PI);
        let spec = ObstacleSpec::new(ObstacleItem::ArcTrack { arc, width: 0 });
        let index = ObstacleIndex::build(&[spec], None);
        assert!(index.clearance_violation(Point::new(0, 1005), 10.0, 0.0, None));
        assert!(!index.clearance_violation(Point::new(0, -1005), 10.0, 0.0, None));

        let bbox = arc_bounding_box(&arc);
        assert_eq!(bbox.max.y, 1000);
        assert_eq!(bbox.min.y, 0);
        assert_eq!(bbox.min.x, -1000);
    }

    #[test]
    fn test_inside_area_always_violates() {
        let area = ObstacleSpec::new(ObstacleItem::RectArea {
            corner: Point::new(0, 0),
            size: Point::new(10_000, 10_000),
        });
        let index = ObstacleIndex::build(&[area], None);
        let v = index.first_violation(Point::new(5000, 5000), 1.0, 0.0, None).unwrap();
        assert_eq!(v.distance, 0.0);
        assert_eq!(v.kind, "area");
        assert!(!index.clearance_violation(Point::new(-100, 5000), 40.0, 50.0, None));
    }

    #[test]
    fn test_matches_linear_scan() {
        let specs: Vec<ObstacleSpec> = (0..50)
            .map(|i| circle((i % 10) * 700, (i / 10) * 900, 150 + (i % 3) * 40))
            .collect();
        let index = ObstacleIndex::build(&specs, None);
        for x in (-500..7000).step_by(170) {
            for y in (-500..4500).step_by(230) {
                let p = Point::new(x, y);
                let linear = index
                    .obstacles()
                    .iter()
                    .position(|o| o.distance(p) < 60.0 + o.half_width() + 25.0);
                let found = index.first_violation(p, 60.0, 25.0, None).map(|v| v.obstacle);
                assert_eq!(found, linear);
            }
        }
    }

    #[test]
    fn test_empty_index() {
        let index = ObstacleIndex::default();
        assert!(index.is_empty());
        assert!(!index.clearance_violation(Point::new(0, 0), 1e9, 1e9, None));
    }
}
