//! Placement output types

use crate::geometry::Point;
use crate::obstacles::NetId;
use crate::resolver::Rejection;
use serde::Serialize;

/// A placed element, in acceptance order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AcceptedPoint {
    pub position: Point,
    pub diameter: i64,
    pub drill: i64,
    pub net: Option<NetId>,
}

/// Outcome of one placement run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacementReport {
    /// Generator name: "grid", "area_grid", "fence" or "diff_pair"
    pub pattern: &'static str,
    pub candidate_count: usize,
    pub accepted: Vec<AcceptedPoint>,
    /// Every rejected candidate with its reason
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<Rejection>,
}

impl PlacementReport {
    pub fn positions(&self) -> Vec<Point> {
        self.accepted.iter().map(|a| a.position).collect()
    }

    /// Drop the rejection list, keeping only what gets persisted
    pub fn without_rejections(mut self) -> Self {
        self.rejected.clear();
        self
    }
}
