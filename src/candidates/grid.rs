//! Grid candidate generation
//!
//! A lattice centered on the outline's bounding box. Odd rows can be
//! shifted to stagger the pattern, and every point can be jittered from a
//! seeded generator so runs stay reproducible.

use crate::error::{PlacementError, Result};
use crate::geometry::{BoundingBox, Point};
use crate::outline::Outline;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Bounded per-axis random displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Jitter {
    #[serde(default)]
    pub max_x: i64,
    #[serde(default)]
    pub max_y: i64,
    #[serde(default)]
    pub seed: u64,
}

impl Jitter {
    pub fn is_active(&self) -> bool {
        self.max_x > 0 || self.max_y > 0
    }
}

/// Largest lattice a grid run may generate
pub const MAX_GRID_POINTS: u64 = 10_000_000;

/// Grid pitch and stagger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub spacing: i64,
    /// X shift applied to odd rows
    pub row_offset: i64,
    pub jitter: Option<Jitter>,
}

/// Lattice points over `bbox`, row-major from the lowest row and column
///
/// `floor(half_extent / spacing)` rows and columns are laid out on each
/// side of the center, so the lattice is symmetric when unstaggered and
/// unjittered. A non-positive spacing yields no points.
pub fn grid_lattice(bbox: &BoundingBox, layout: &GridLayout) -> Vec<Point> {
    if layout.spacing <= 0 {
        return vec![];
    }
    let spacing = layout.spacing;
    let center = bbox.center();
    let half_cols = bbox.width() / (2 * spacing);
    let half_rows = bbox.height() / (2 * spacing);

    let mut rng = layout
        .jitter
        .filter(Jitter::is_active)
        .map(|j| (j, StdRng::seed_from_u64(j.seed)));

    let capacity = lattice_size(bbox, spacing).min(MAX_GRID_POINTS as u128) as usize;
    let mut points = Vec::with_capacity(capacity);
    for row in -half_rows..=half_rows {
        let shift = if row % 2 != 0 { layout.row_offset } else { 0 };
        for col in -half_cols..=half_cols {
            let mut p = Point::new(center.x + col * spacing + shift, center.y + row * spacing);
            if let Some((jitter, rng)) = rng.as_mut() {
                if jitter.max_x > 0 {
                    p.x += rng.gen_range(-jitter.max_x..=jitter.max_x);
                }
                if jitter.max_y > 0 {
                    p.y += rng.gen_range(-jitter.max_y..=jitter.max_y);
                }
            }
            points.push(p);
        }
    }
    points
}

/// Number of lattice points `grid_lattice` lays out over `bbox`
fn lattice_size(bbox: &BoundingBox, spacing: i64) -> u128 {
    if spacing <= 0 {
        return 0;
    }
    let cols = 2 * (bbox.width() / (2 * spacing)) as u128 + 1;
    let rows = 2 * (bbox.height() / (2 * spacing)) as u128 + 1;
    cols * rows
}

/// Lattice over the outline's bounding box
///
/// Points are not clipped here; the resolver applies the containment and
/// edge clearance test so rejected points can be reported. A spacing that
/// would lay out more than `MAX_GRID_POINTS` is an input error.
pub fn grid_candidates(outline: &Outline, layout: &GridLayout) -> Result<Vec<Point>> {
    let bbox = outline.bounding_box();
    let size = lattice_size(&bbox, layout.spacing);
    if size > MAX_GRID_POINTS as u128 {
        return Err(PlacementError::invalid(
            "spacing",
            format!(
                "{} nm over a {} x {} nm outline gives {} grid points, limit is {}",
                layout.spacing,
                bbox.width(),
                bbox.height(),
                size,
                MAX_GRID_POINTS
            ),
        ));
    }
    Ok(grid_lattice(&bbox, layout))
}
