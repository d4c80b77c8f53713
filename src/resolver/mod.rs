//! Collision resolution
//!
//! # Submodules
//! - `accepted` - Append-only accepted points with a spacing query
//! - `resolve` - Single greedy pass over the candidate list

mod accepted;
mod resolve;

pub use accepted::AcceptedPoints;

pub use resolve::{
    RegionRule,
    ResolveRules,
    RejectReason,
    Rejection,
    Resolution,
    resolve,
};
