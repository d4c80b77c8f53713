//! Append-only accepted point set
//!
//! Points are stored in acceptance order next to an R-tree used for the
//! spacing query.

use crate::geometry::Point;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

#[derive(Clone, Debug)]
struct AcceptedEntry {
    order: usize,
    position: [f64; 2],
}

impl RTreeObject for AcceptedEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for AcceptedEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

#[derive(Debug, Default)]
pub struct AcceptedPoints {
    points: Vec<Point>,
    tree: RTree<AcceptedEntry>,
}

impl AcceptedPoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn push(&mut self, p: Point) {
        self.tree.insert(AcceptedEntry {
            order: self.points.len(),
            position: p.to_f64(),
        });
        self.points.push(p);
    }

    /// Earliest accepted point strictly closer than `spacing` to `p`
    pub fn nearest_conflict(&self, p: Point, spacing: f64) -> Option<usize> {
        self.tree
            .locate_within_distance(p.to_f64(), spacing * spacing)
            .filter(|entry| self.points[entry.order].distance(p) < spacing)
            .map(|entry| entry.order)
            .min()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}
