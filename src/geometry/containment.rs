//! Ray-casting containment
//!
//! A horizontal ray is cast from the point towards +x and crossings are
//! counted with a half-open rule: horizontal segments never cross, and a
//! segment crosses only when `min(y) < p.y <= max(y)` and the intersection
//! lies strictly to the right of the point. The test runs in exact integer
//! arithmetic, so a ray through a shared vertex is counted exactly once.

use super::types::{Point, Segment};

/// Whether the ray from `p` towards +x crosses `seg`
pub fn ray_crosses(p: Point, seg: &Segment) -> bool {
    let (start, end) = (seg.a, seg.b);
    if start.y == end.y {
        return false;
    }
    if !(start.y.min(end.y) < p.y && p.y <= start.y.max(end.y)) {
        return false;
    }

    // p.x < start.x + dx * (p.y - start.y) / dy, cross-multiplied by dy
    let dx = (end.x - start.x) as i128;
    let dy = (end.y - start.y) as i128;
    let lhs = (p.x - start.x) as i128 * dy;
    let rhs = dx * (p.y - start.y) as i128;
    if dy > 0 {
        lhs < rhs
    } else {
        lhs > rhs
    }
}

/// Parity test: inside iff the ray crosses an odd number of segments
pub fn is_point_inside_segments(p: Point, segments: &[Segment]) -> bool {
    segments.iter().filter(|s| ray_crosses(p, s)).count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(i64, i64)]) -> Vec<Segment> {
        (0..points.len())
            .map(|i| {
                let (ax, ay) = points[i];
                let (bx, by) = points[(i + 1) % points.len()];
                Segment::new(Point::new(ax, ay), Point::new(bx, by))
            })
            .collect()
    }

    #[test]
    fn test_rectangle_inside_outside() {
        let rect = ring(&[(0, 0), (100, 0), (100, 50), (0, 50)]);
        assert!(is_point_inside_segments(Point::new(50, 25), &rect));
        assert!(is_point_inside_segments(Point::new(1, 1), &rect));
        assert!(!is_point_inside_segments(Point::new(150, 25), &rect));
        assert!(!is_point_inside_segments(Point::new(-1, 25), &rect));
        assert!(!is_point_inside_segments(Point::new(50, 51), &rect));
    }

    #[test]
    fn test_clockwise_ring_same_result() {
        let rect = ring(&[(0, 0), (0, 50), (100, 50), (100, 0)]);
        assert!(is_point_inside_segments(Point::new(50, 25), &rect));
        assert!(!is_point_inside_segments(Point::new(50, -25), &rect));
    }

    #[test]
    fn test_ray_through_vertex_counts_once() {
        let diamond = ring(&[(0, -10), (10, 0), (0, 10), (-10, 0)]);
        assert!(is_point_inside_segments(Point::new(-5, 0), &diamond));
        assert!(!is_point_inside_segments(Point::new(-15, 0), &diamond));
        assert!(!is_point_inside_segments(Point::new(15, 0), &diamond));
        // Ray grazing the top vertex only
        assert!(!is_point_inside_segments(Point::new(-5, 10), &diamond));
    }

    #[test]
    fn test_horizontal_edges_do_not_cross() {
        let s = Segment::new(Point::new(0, 5), Point::new(100, 5));
        assert!(!ray_crosses(Point::new(-10, 5), &s));
    }
}
