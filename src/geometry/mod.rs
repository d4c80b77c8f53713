//! Geometry primitives for via placement
//!
//! # Submodules
//! - `types` - Points, segments, arcs and bounding boxes in nanometers
//! - `distance` - Point-to-segment, point-to-arc and point-to-ring distances
//! - `containment` - Exact ray-casting parity test

mod types;
mod distance;
mod containment;

pub use types::{
    NM_PER_MM,
    from_mm,
    to_mm,
    Point,
    Segment,
    Arc,
    BoundingBox,
};

pub use distance::{
    ANGLE_EPSILON,
    normalize_angle,
    point_segment_distance,
    point_arc_distance,
    point_segments_distance,
    arc_spans_angle,
};

pub use containment::{
    ray_crosses,
    is_point_inside_segments,
};
