//! Curve tessellation
//!
//! Converts boundary and obstacle shapes into straight segments so that
//! containment and distance queries only ever deal with segments.
//!
//! # Submodules
//! - `shapes` - Circles, rectangles and arcs
//! - `polygon` - Polylines with arc nodes and polygons with holes

mod shapes;
mod polygon;

pub use shapes::{
    CIRCLE_SEGMENTS,
    ARC_ANGLE_STEP,
    MIN_ARC_SEGMENTS,
    TessellationTolerance,
    ring_segments,
    circle_points,
    tessellate_circle,
    rectangle_points,
    tessellate_rectangle,
    arc_points,
    tessellate_arc,
};

pub use polygon::{
    PolyNode,
    PolyLine,
    PolygonWithHoles,
    TessellatedPolygon,
    polyline_points,
    tessellate_polyline,
    tessellate_polygon,
};
