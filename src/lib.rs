//! Stitching and fencing via placement
//!
//! Places circular elements inside a region outline while keeping edge
//! clearance, mutual spacing and obstacle clearance. Candidates come from a
//! grid, a fence along traces, or an outward-only differential pair fence,
//! and a single greedy pass turns them into the accepted set.
//!
//! All coordinates are integer nanometers; see [`geometry::NM_PER_MM`].
//!
//! # Example
//! ```ignore
//! let job = via_stitch::load_job("board.json")?;
//! let report = via_stitch::run_job(&job)?;
//! println!("{} vias placed", report.accepted.len());
//! ```

pub mod error;
pub mod geometry;
pub mod tessellation;
pub mod outline;
pub mod obstacles;
pub mod candidates;
pub mod resolver;
pub mod placement;

pub use error::{PlacementError, Result};
pub use geometry::{Arc, BoundingBox, Point, Segment};
pub use obstacles::{NetId, ObstacleItem, ObstacleSpec};
pub use outline::{AreaSpec, BoundaryShape, Outline};
pub use placement::{
    load_job, read_job, run_area_stitching, run_diff_pair_fencing, run_fencing, run_job,
    run_stitching, AcceptedPoint, PlacementJob, PlacementParams, PlacementReport, PatternSpec,
};
