//! Placement runner functions
//!
//! Contains the main entry points for placing elements:
//! - Grid stitching inside a board outline
//! - Grid stitching inside filled areas
//! - Fencing along traces
//! - Outward-only fencing of a differential pair

use crate::candidates::{diff_pair_candidates, fence_candidates, grid_candidates, FenceCurve};
use crate::error::{PlacementError, Result};
use crate::geometry::Point;
use crate::obstacles::{ObstacleIndex, ObstacleSpec};
use crate::outline::{AreaSpec, BoundaryShape, Outline};
use crate::resolver::{resolve, RegionRule, ResolveRules};
use crate::tessellation::PolygonWithHoles;
use std::collections::BTreeMap;
use std::time::Instant;

use super::params::PlacementParams;
use super::types::{AcceptedPoint, PlacementReport};

/// Stitch a grid inside the outline described by `shapes`
pub fn run_stitching(
    shapes: &[BoundaryShape],
    obstacles: &[ObstacleSpec],
    params: &PlacementParams,
) -> Result<PlacementReport> {
    params.validate()?;
    let outline = Outline::from_shapes(shapes)?;
    stitch("grid", &outline, &[], obstacles, params)
}

/// Stitch a grid clipped to a set of filled areas
///
/// A candidate is admitted by the first area that contains it with enough
/// edge clearance. An area with its own layers checks the candidates it
/// admits only against obstacles on those layers; other areas use
/// `params.layers`.
pub fn run_area_stitching(
    areas: &[AreaSpec],
    obstacles: &[ObstacleSpec],
    params: &PlacementParams,
) -> Result<PlacementReport> {
    params.validate()?;
    let polygons: Vec<PolygonWithHoles> = areas.iter().map(|a| a.polygon.clone()).collect();
    let outline = Outline::from_areas(&polygons)?;
    let area_layers: Vec<Option<Vec<String>>> = areas.iter().map(AreaSpec::layer_set).collect();
    stitch("area_grid", &outline, &area_layers, obstacles, params)
}

/// Fence every curve on its requested sides
pub fn run_fencing(
    curves: &[FenceCurve],
    obstacles: &[ObstacleSpec],
    params: &PlacementParams,
) -> Result<PlacementReport> {
    params.validate()?;
    if curves.is_empty() {
        return Err(PlacementError::NoReferenceCurves);
    }
    let start = Instant::now();
    let candidates = fence_candidates(curves, &params.fence_layout());
    let index = ObstacleIndex::build(obstacles, params.layers.as_deref());
    Ok(finish("fence", candidates, None, &index, params, start))
}

/// Fence the outer edges of a two-trace differential pair
pub fn run_diff_pair_fencing(
    curves: &[FenceCurve],
    obstacles: &[ObstacleSpec],
    params: &PlacementParams,
) -> Result<PlacementReport> {
    params.validate()?;
    let start = Instant::now();
    let candidates = diff_pair_candidates(curves, &params.fence_layout(), params.diff_pair_tail)?;
    let index = ObstacleIndex::build(obstacles, params.layers.as_deref());
    Ok(finish("diff_pair", candidates, None, &index, params, start))
}

/// `area_layers` holds one optional layer set per outline area
fn stitch(
    pattern: &'static str,
    outline: &Outline,
    area_layers: &[Option<Vec<String>>],
    obstacles: &[ObstacleSpec],
    params: &PlacementParams,
) -> Result<PlacementReport> {
    let start = Instant::now();
    let candidates = grid_candidates(outline, &params.grid_layout())?;
    let index = ObstacleIndex::build(obstacles, params.layers.as_deref());

    // one index per distinct layer set
    let mut layer_indexes: BTreeMap<&[String], ObstacleIndex> = BTreeMap::new();
    for layers in area_layers.iter().flatten() {
        layer_indexes
            .entry(layers.as_slice())
            .or_insert_with(|| ObstacleIndex::build(obstacles, Some(layers.as_slice())));
    }
    if !layer_indexes.is_empty() {
        tracing::debug!(
            "{}: {} area layer sets indexed",
            pattern,
            layer_indexes.len()
        );
    }
    let area_obstacles: Vec<Option<&ObstacleIndex>> = area_layers
        .iter()
        .map(|layers| layers.as_ref().and_then(|l| layer_indexes.get(l.as_slice())))
        .collect();

    let region = RegionRule {
        area_obstacles: &area_obstacles,
        ..RegionRule::new(outline, params.element_radius() + params.edge_clearance as f64)
    };
    Ok(finish(pattern, candidates, Some(region), &index, params, start))
}

fn finish(
    pattern: &'static str,
    candidates: Vec<Point>,
    region: Option<RegionRule>,
    index: &ObstacleIndex,
    params: &PlacementParams,
    start: Instant,
) -> PlacementReport {
    if candidates.is_empty() {
        tracing::warn!("{}: generator produced no candidates", pattern);
    }

    let rules = ResolveRules {
        region,
        spacing: params.spacing as f64,
        element_radius: params.element_radius(),
        clearance: params.clearance as f64,
        exempt_net: params.target_net.as_ref(),
    };
    let resolution = resolve(&candidates, index, &rules);

    let accepted: Vec<AcceptedPoint> = resolution
        .accepted
        .into_iter()
        .map(|position| AcceptedPoint {
            position,
            diameter: params.element.diameter,
            drill: params.element.drill,
            net: params.target_net.clone(),
        })
        .collect();

    if accepted.is_empty() && !candidates.is_empty() {
        tracing::warn!("{}: all {} candidates were rejected", pattern, candidates.len());
    }
    tracing::info!(
        "{}: {} of {} candidates accepted against {} obstacles in {:?}",
        pattern,
        accepted.len(),
        candidates.len(),
        index.len(),
        start.elapsed()
    );

    PlacementReport {
        pattern,
        candidate_count: candidates.len(),
        accepted,
        rejected: resolution.rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::from_mm;

    fn square(size_mm: f64) -> Vec<BoundaryShape> {
        vec![BoundaryShape::Rectangle {
            corner: Point::new(0, 0),
            size: Point::from_mm(size_mm, size_mm),
        }]
    }

    #[test]
    fn test_params_validated_before_outline() {
        let params = PlacementParams::new(0, 0, 1);
        let err = run_stitching(&[], &[], &params).unwrap_err();
        assert_eq!(err.kind(), "invalid_parameter");
    }

    #[test]
    fn test_fencing_requires_curves() {
        let params = PlacementParams::new(from_mm(0.6), from_mm(0.3), from_mm(1.0));
        assert_eq!(
            run_fencing(&[], &[], &params).unwrap_err(),
            PlacementError::NoReferenceCurves
        );
    }

    #[test]
    fn test_accepted_points_carry_element_and_net() {
        let mut params = PlacementParams::new(from_mm(0.8), from_mm(0.4), from_mm(2.0));
        params.target_net = Some("GND".into());
        let report = run_stitching(&square(4.0), &[], &params).unwrap();
        assert_eq!(report.pattern, "grid");
        assert!(!report.accepted.is_empty());
        let first = &report.accepted[0];
        assert_eq!(first.diameter, from_mm(0.8));
        assert_eq!(first.drill, from_mm(0.4));
        assert_eq!(first.net.as_ref().map(|n| n.0.as_str()), Some("GND"));
        assert_eq!(
            report.candidate_count,
            report.accepted.len() + report.rejected.len()
        );
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        // Edge clearance larger than the board leaves nothing
        let mut params = PlacementParams::new(from_mm(0.8), 0, from_mm(1.0));
        params.edge_clearance = from_mm(10.0);
        let report = run_stitching(&square(4.0), &[], &params).unwrap();
        assert!(report.accepted.is_empty());
        assert!(report.candidate_count > 0);
    }
}
