//! Placement runs
//!
//! Ties generators, the obstacle index and the resolver together.
//!
//! # Submodules
//! - `params` - Placement parameters and validation
//! - `types` - Accepted points and the run report
//! - `runners` - Entry points per pattern
//! - `job` - JSON job files

mod params;
mod types;
mod runners;
mod job;

pub use params::{
    ElementSize,
    PlacementParams,
};

pub use types::{
    AcceptedPoint,
    PlacementReport,
};

pub use runners::{
    run_stitching,
    run_area_stitching,
    run_fencing,
    run_diff_pair_fencing,
};

pub use job::{
    PatternSpec,
    PlacementJob,
    load_job,
    read_job,
    run_job,
};
