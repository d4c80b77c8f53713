//! Candidate generators
//!
//! Every generator returns a finite, ordered list; the order is the order
//! the resolver considers points in.
//!
//! # Submodules
//! - `grid` - Uniform and staggered grids with seeded jitter
//! - `fence` - Offset rows along reference segments and arcs
//! - `diff_pair` - Outward-only fencing of a trace pair

mod grid;
mod fence;
mod diff_pair;

pub use grid::{
    MAX_GRID_POINTS,
    Jitter,
    GridLayout,
    grid_lattice,
    grid_candidates,
};

pub use fence::{
    FenceGeometry,
    FenceSides,
    FenceCurve,
    FenceLayout,
    FencePoint,
    fence_points,
    fence_candidates,
};

pub use diff_pair::{
    TailPolicy,
    diff_pair_candidates,
};
