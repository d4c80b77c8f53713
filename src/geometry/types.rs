//! Core geometry types for placement
//!
//! All coordinates are integer nanometers so that containment tests are
//! exact. Distances and angles are computed in `f64`.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::{Add, Sub};

/// Nanometers per millimeter
pub const NM_PER_MM: i64 = 1_000_000;

/// Convert millimeters to integer nanometers (rounded)
pub fn from_mm(mm: f64) -> i64 {
    (mm * NM_PER_MM as f64).round() as i64
}

/// Convert integer nanometers to millimeters
pub fn to_mm(nm: i64) -> f64 {
    nm as f64 / NM_PER_MM as f64
}

/// A 2D point in nanometers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn from_mm(x: f64, y: f64) -> Self {
        Self::new(from_mm(x), from_mm(y))
    }

    /// Round floating coordinates to the nearest nanometer
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(x.round() as i64, y.round() as i64)
    }

    pub fn to_f64(self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }

    pub fn length(self) -> f64 {
        (self.x as f64).hypot(self.y as f64)
    }

    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Midpoint, rounded to the nearest nanometer
    pub fn midpoint(self, other: Point) -> Point {
        Point::from_f64(
            (self.x as f64 + other.x as f64) / 2.0,
            (self.y as f64 + other.y as f64) / 2.0,
        )
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }
}

/// Circular arc with a signed sweep (positive is counter-clockwise)
///
/// `center` is `None` when the arc was built from collinear points; such an
/// arc behaves like the segment `start -> end`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "ArcDef")]
pub struct Arc {
    pub start: Point,
    pub end: Point,
    pub center: Option<Point>,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

/// Accepted input forms for an arc
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum ArcDef {
    Center {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    ThreePoint {
        start: Point,
        mid: Point,
        end: Point,
    },
}

impl From<ArcDef> for Arc {
    fn from(def: ArcDef) -> Self {
        match def {
            ArcDef::Center {
                center,
                radius,
                start_angle,
                sweep,
            } => Arc::from_center(center, radius, start_angle, sweep),
            ArcDef::ThreePoint { start, mid, end } => Arc::from_three_points(start, mid, end),
        }
    }
}

impl Arc {
    /// Build an arc from its center, radius, start angle and sweep (radians)
    pub fn from_center(center: Point, radius: f64, start_angle: f64, sweep: f64) -> Self {
        let sweep = sweep.clamp(-TAU, TAU);
        if radius <= 0.0 {
            return Self::degenerate(center, center);
        }
        let at = |angle: f64| {
            Point::from_f64(
                center.x as f64 + radius * angle.cos(),
                center.y as f64 + radius * angle.sin(),
            )
        };
        Self {
            start: at(start_angle),
            end: at(start_angle + sweep),
            center: Some(center),
            radius,
            start_angle,
            sweep,
        }
    }

    /// Build an arc passing through `start`, `mid` and `end`
    pub fn from_three_points(start: Point, mid: Point, end: Point) -> Self {
        let (ax, ay) = (start.x as i128, start.y as i128);
        let (bx, by) = (mid.x as i128, mid.y as i128);
        let (cx, cy) = (end.x as i128, end.y as i128);

        let d = 2 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d == 0 {
            return Self::degenerate(start, end);
        }

        let a2 = ax * ax + ay * ay;
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) as f64 / d as f64;
        let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) as f64 / d as f64;
        let center = Point::from_f64(ux, uy);

        let angle_of = |p: Point| ((p.y - center.y) as f64).atan2((p.x - center.x) as f64);
        let start_angle = angle_of(start);
        let to_mid = (angle_of(mid) - start_angle).rem_euclid(TAU);
        let to_end = (angle_of(end) - start_angle).rem_euclid(TAU);
        let sweep = if to_mid <= to_end { to_end } else { to_end - TAU };

        Self {
            start,
            end,
            center: Some(center),
            radius: center.distance(start),
            start_angle,
            sweep,
        }
    }

    fn degenerate(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            center: None,
            radius: 0.0,
            start_angle: 0.0,
            sweep: 0.0,
        }
    }

    /// Point on the arc's circle at `angle`, or `None` for a degenerate arc
    pub fn point_at(&self, angle: f64) -> Option<Point> {
        self.point_at_radius(angle, self.radius)
    }

    /// Point on a concentric circle of `radius` at `angle`
    pub fn point_at_radius(&self, angle: f64, radius: f64) -> Option<Point> {
        let center = self.center?;
        Some(Point::from_f64(
            center.x as f64 + radius * angle.cos(),
            center.y as f64 + radius * angle.sin(),
        ))
    }

    /// Arc length along the curve (chord length when degenerate)
    pub fn length(&self) -> f64 {
        match self.center {
            Some(_) => self.sweep.abs() * self.radius,
            None => self.start.distance(self.end),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = BoundingBox { min: first, max: first };
        for p in iter {
            bbox.include(p);
        }
        Some(bbox)
    }

    pub fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn merge(&mut self, other: &BoundingBox) {
        self.include(other.min);
        self.include(other.max);
    }

    pub fn width(&self) -> i64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i64 {
        self.max.y - self.min.y
    }

    /// Center, truncated to whole nanometers
    pub fn center(&self) -> Point {
        Point::new(
            self.min.x + self.width() / 2,
            self.min.y + self.height() / 2,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_mm_conversion() {
        assert_eq!(from_mm(0.8), 800_000);
        assert_eq!(from_mm(-2.5), -2_500_000);
        assert!((to_mm(1_500_000) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_point_arithmetic_is_exact() {
        let a = Point::new(1_000_000_007, -3);
        let b = Point::new(5, 9);
        assert_eq!(a + b - b, a);
        assert_eq!((Point::new(3, 4)).length(), 5.0);
    }

    #[test]
    fn test_arc_from_three_points_ccw() {
        let arc = Arc::from_three_points(
            Point::new(1000, 0),
            Point::new(0, 1000),
            Point::new(-1000, 0),
        );
        assert_eq!(arc.center, Some(Point::new(0, 0)));
        assert!((arc.radius - 1000.0).abs() < 1e-9);
        assert!(arc.start_angle.abs() < 1e-12);
        assert!((arc.sweep - PI).abs() < 1e-9);
    }

    #[test]
    fn test_arc_from_three_points_cw() {
        let arc = Arc::from_three_points(
            Point::new(1000, 0),
            Point::new(0, -1000),
            Point::new(-1000, 0),
        );
        assert!((arc.sweep + PI).abs() < 1e-9);
    }

    #[test]
    fn test_collinear_arc_is_degenerate() {
        let arc = Arc::from_three_points(Point::new(0, 0), Point::new(5, 5), Point::new(10, 10));
        assert!(arc.center.is_none());
        assert_eq!(arc.length(), Point::new(10, 10).length());
    }

    #[test]
    fn test_arc_from_center_endpoints() {
        let arc = Arc::from_center(Point::new(0, 0), 1000.0, 0.0, FRAC_PI_2);
        assert_eq!(arc.start, Point::new(1000, 0));
        assert_eq!(arc.end, Point::new(0, 1000));
        assert!((arc.length() - 1000.0 * FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_merge_and_center() {
        let mut a = BoundingBox::from_points([Point::new(0, 0), Point::new(10, 4)]).unwrap();
        let b = BoundingBox::from_points([Point::new(20, -6)]).unwrap();
        a.merge(&b);
        assert_eq!(a.min, Point::new(0, -6));
        assert_eq!(a.max, Point::new(20, 4));
        assert_eq!(a.center(), Point::new(10, -1));
    }
}
