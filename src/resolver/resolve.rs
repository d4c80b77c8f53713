//! Greedy collision resolution
//!
//! Candidates are visited once, in generator order. Each one is tested
//! against the region (when the pattern has one), then the points accepted
//! so far, then the obstacle index. The first failed test rejects it.

use crate::geometry::Point;
use crate::obstacles::{NetId, ObstacleIndex, Violation};
use crate::outline::{Outline, RegionCheck};
use super::accepted::AcceptedPoints;
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Region constraint for grid patterns
#[derive(Debug, Clone, Copy)]
pub struct RegionRule<'a> {
    pub outline: &'a Outline,
    /// Minimum distance from a candidate center to the boundary
    pub min_edge_distance: f64,
    /// Obstacles for candidates admitted by each area, in area order.
    /// Areas past the end or set to `None` use the shared index.
    pub area_obstacles: &'a [Option<&'a ObstacleIndex>],
}

impl<'a> RegionRule<'a> {
    pub fn new(outline: &'a Outline, min_edge_distance: f64) -> Self {
        Self {
            outline,
            min_edge_distance,
            area_obstacles: &[],
        }
    }

    fn obstacles_for(&self, area: usize) -> Option<&'a ObstacleIndex> {
        self.area_obstacles.get(area).copied().flatten()
    }
}

/// Everything the resolver checks a candidate against
#[derive(Debug, Clone, Copy)]
pub struct ResolveRules<'a> {
    pub region: Option<RegionRule<'a>>,
    pub spacing: f64,
    pub element_radius: f64,
    pub clearance: f64,
    pub exempt_net: Option<&'a NetId>,
}

/// Why a candidate was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    OutsideRegion,
    EdgeClearance { distance: f64, required: f64 },
    /// Closer than the spacing to an accepted point (index into the accepted list)
    Spacing { accepted: usize },
    Obstacle(Violation),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub point: Point,
    #[serde(flatten)]
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    pub accepted: Vec<Point>,
    pub rejected: Vec<Rejection>,
}

/// Filter `candidates` into an accepted set
pub fn resolve(candidates: &[Point], index: &ObstacleIndex, rules: &ResolveRules) -> Resolution {
    let checks = rules.region.map(|rule| region_checks(candidates, &rule));

    let mut accepted = AcceptedPoints::new();
    let mut rejected = Vec::new();
    for (i, &point) in candidates.iter().enumerate() {
        let mut obstacles = index;
        let reason = match checks.as_ref().map(|c| c[i]) {
            Some(RegionCheck::Outside) => Some(RejectReason::OutsideRegion),
            Some(RegionCheck::TooClose { distance }) => Some(RejectReason::EdgeClearance {
                distance,
                required: rules.region.map_or(0.0, |r| r.min_edge_distance),
            }),
            Some(RegionCheck::Inside { area }) => {
                if let Some(own) = rules.region.and_then(|r| r.obstacles_for(area)) {
                    obstacles = own;
                }
                None
            }
            None => None,
        }
        .or_else(|| {
            accepted
                .nearest_conflict(point, rules.spacing)
                .map(|accepted| RejectReason::Spacing { accepted })
        })
        .or_else(|| {
            obstacles
                .first_violation(point, rules.element_radius, rules.clearance, rules.exempt_net)
                .map(RejectReason::Obstacle)
        });

        match reason {
            None => accepted.push(point),
            Some(reason) => {
                tracing::debug!("Candidate ({}, {}) rejected: {:?}", point.x, point.y, reason);
                rejected.push(Rejection { point, reason });
            }
        }
    }

    Resolution {
        accepted: accepted.into_points(),
        rejected,
    }
}

/// Region test for every candidate, in candidate order
fn region_checks(candidates: &[Point], rule: &RegionRule) -> Vec<RegionCheck> {
    #[cfg(feature = "parallel")]
    let iter = candidates.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = candidates.iter();

    iter.map(|&p| rule.outline.check(p, rule.min_edge_distance))
        .collect()
}
