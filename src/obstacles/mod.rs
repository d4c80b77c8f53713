//! Obstacles and the clearance index
//!
//! # Submodules
//! - `types` - Caller obstacle items, net identity and normalized obstacles
//! - `index` - R-tree backed index with first-violation queries

mod types;
mod index;

pub use types::{
    NetId,
    same_net,
    ObstacleItem,
    ObstacleSpec,
    ObstacleKind,
    Obstacle,
};

pub use index::{
    Violation,
    ObstacleIndex,
};
