//! Placement outline
//!
//! # Submodules
//! - `region` - Outline segment set with holes, containment and boundary distance
//! - `model` - Boundary shapes, stitch areas, multi-area outlines and the edge clearance check

mod region;
mod model;

pub use region::Region;

pub use model::{
    AreaSpec,
    BoundaryShape,
    RegionCheck,
    Outline,
};
