//! Obstacle data types
//!
//! `ObstacleSpec` is what the caller hands in; `Obstacle` is the normalized
//! form the index tests candidates against.

use crate::geometry::{point_arc_distance, point_segment_distance, Arc, Point, Segment};
use crate::outline::Region;
use crate::tessellation::{
    tessellate_circle, tessellate_polygon, tessellate_rectangle, PolygonWithHoles,
    TessellationTolerance,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque net identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetId(pub String);

impl From<&str> for NetId {
    fn from(name: &str) -> Self {
        NetId(name.to_string())
    }
}

impl From<String> for NetId {
    fn from(name: String) -> Self {
        NetId(name)
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True only when both nets are present and equal
pub fn same_net(a: Option<&NetId>, b: Option<&NetId>) -> bool {
    matches!((a, b), (Some(na), Some(nb)) if na == nb)
}

/// Caller-side obstacle geometry
///
/// Pads and vias arrive as `Circle` with their effective radius already
/// resolved. Widths are full widths.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstacleItem {
    Circle { center: Point, radius: i64 },
    Track { start: Point, end: Point, width: i64 },
    ArcTrack { arc: Arc, width: i64 },
    RectArea { corner: Point, size: Point },
    CircleArea { center: Point, radius: i64 },
    PolygonArea { polygon: PolygonWithHoles },
    /// Filled zone, one polygon set per layer
    FilledZone { fills: BTreeMap<String, Vec<PolygonWithHoles>> },
}

/// An obstacle as supplied by the caller
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObstacleSpec {
    #[serde(flatten)]
    pub item: ObstacleItem,
    #[serde(default)]
    pub net: Option<NetId>,
    /// Layers the item lives on; empty means every layer
    #[serde(default)]
    pub layers: Vec<String>,
}

impl ObstacleSpec {
    pub fn new(item: ObstacleItem) -> Self {
        Self {
            item,
            net: None,
            layers: vec![],
        }
    }

    pub fn with_net(mut self, net: impl Into<NetId>) -> Self {
        self.net = Some(net.into());
        self
    }

    pub fn on_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers = layers.into_iter().map(Into::into).collect();
        self
    }

    fn is_on(&self, layer_filter: Option<&[String]>) -> bool {
        match layer_filter {
            None => true,
            Some(_) if self.layers.is_empty() => true,
            Some(filter) => self.layers.iter().any(|l| filter.contains(l)),
        }
    }

    /// Normalize into index obstacles
    ///
    /// A filled zone yields one obstacle per polygon on the selected
    /// layers, all sharing the zone's net. Items outside the layer filter
    /// yield nothing.
    pub fn normalize(
        &self,
        source: usize,
        layer_filter: Option<&[String]>,
        tolerance: &TessellationTolerance,
    ) -> Vec<Obstacle> {
        let obstacle = |kind: ObstacleKind| Obstacle {
            kind,
            net: self.net.clone(),
            source,
        };

        if let ObstacleItem::FilledZone { fills } = &self.item {
            return fills
                .iter()
                .filter(|(layer, _)| layer_filter.map_or(true, |f| f.contains(*layer)))
                .flat_map(|(_, polygons)| polygons.iter())
                .map(|polygon| {
                    let region = Region::from_tessellated(tessellate_polygon(polygon, tolerance));
                    obstacle(ObstacleKind::Area(region))
                })
                .collect();
        }

        if !self.is_on(layer_filter) {
            return vec![];
        }

        let kind = match &self.item {
            ObstacleItem::Circle { center, radius } => ObstacleKind::Circle {
                center: *center,
                radius: (*radius).max(0) as f64,
            },
            ObstacleItem::Track { start, end, width } => ObstacleKind::Segment {
                segment: Segment::new(*start, *end),
                half_width: (*width).max(0) as f64 / 2.0,
            },
            ObstacleItem::ArcTrack { arc, width } => ObstacleKind::Arc {
                arc: *arc,
                half_width: (*width).max(0) as f64 / 2.0,
            },
            ObstacleItem::RectArea { corner, size } => {
                ObstacleKind::Area(Region::new(tessellate_rectangle(*corner, *size), vec![]))
            }
            ObstacleItem::CircleArea { center, radius } => ObstacleKind::Area(Region::new(
                tessellate_circle(*center, *radius as f64, tolerance),
                vec![],
            )),
            ObstacleItem::PolygonArea { polygon } => {
                ObstacleKind::Area(Region::from_tessellated(tessellate_polygon(polygon, tolerance)))
            }
            ObstacleItem::FilledZone { .. } => return vec![],
        };
        vec![obstacle(kind)]
    }
}

/// Normalized obstacle geometry
#[derive(Debug, Clone, PartialEq)]
pub enum ObstacleKind {
    Circle { center: Point, radius: f64 },
    Segment { segment: Segment, half_width: f64 },
    Arc { arc: Arc, half_width: f64 },
    Area(Region),
}

/// Obstacle in the index
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub net: Option<NetId>,
    /// Position of the originating item in the caller's list
    pub source: usize,
}

impl Obstacle {
    /// Distance from `p` to the obstacle's center line or area
    ///
    /// Points inside an area are at distance 0.
    pub fn distance(&self, p: Point) -> f64 {
        match &self.kind {
            ObstacleKind::Circle { center, .. } => p.distance(*center),
            ObstacleKind::Segment { segment, .. } => point_segment_distance(p, segment),
            ObstacleKind::Arc { arc, .. } => point_arc_distance(p, arc),
            ObstacleKind::Area(region) => {
                if region.contains(p) {
                    0.0
                } else {
                    region.distance_to_boundary(p)
                }
            }
        }
    }

    /// Extent beyond the center line: circle radius or half the track width
    pub fn half_width(&self) -> f64 {
        match &self.kind {
            ObstacleKind::Circle { radius, .. } => *radius,
            ObstacleKind::Segment { half_width, .. } | ObstacleKind::Arc { half_width, .. } => {
                *half_width
            }
            ObstacleKind::Area(_) => 0.0,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ObstacleKind::Circle { .. } => "circle",
            ObstacleKind::Segment { .. } => "segment",
            ObstacleKind::Arc { .. } => "arc",
            ObstacleKind::Area(_) => "area",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn square(size: i64) -> PolygonWithHoles {
        PolygonWithHoles::new(
            crate::tessellation::PolyLine::closed_from_points([
                Point::new(0, 0),
                Point::new(size, 0),
                Point::new(size, size),
                Point::new(0, size),
            ]),
            vec![],
        )
    }

    #[test]
    fn test_same_net_rules() {
        let a = NetId::from("GND");
        let b = NetId::from("VCC");
        assert!(same_net(Some(&a), Some(&a.clone())));
        assert!(!same_net(Some(&a), Some(&b)));
        assert!(!same_net(Some(&a), None));
        assert!(!same_net(None, Some(&a)));
        assert!(!same_net(None, None));
    }

    #[test]
    fn test_filled_zone_splits_per_polygon() {
        let mut fills = BTreeMap::new();
        fills.insert("F.Cu".to_string(), vec![square(100), square(50)]);
        fills.insert("B.Cu".to_string(), vec![square(10)]);
        let spec = ObstacleSpec::new(ObstacleItem::FilledZone { fills }).with_net("GND");
        let tol = TessellationTolerance::default();

        let all = spec.normalize(3, None, &tol);
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|o| o.source == 3 && o.net == Some(NetId::from("GND"))));

        let front = ["F.Cu".to_string()];
        assert_eq!(spec.normalize(3, Some(&front[..]), &tol).len(), 2);
    }

    #[test]
    fn test_layer_filter_on_plain_items() {
        let tol = TessellationTolerance::default();
        let track = ObstacleSpec::new(ObstacleItem::Track {
            start: Point::new(0, 0),
            end: Point::new(10, 0),
            width: 4,
        })
        .on_layers(["B.Cu"]);
        let front = ["F.Cu".to_string()];
        assert!(track.normalize(0, Some(&front[..]), &tol).is_empty());
        assert_eq!(track.normalize(0, None, &tol).len(), 1);

        let anywhere = ObstacleSpec::new(ObstacleItem::Circle {
            center: Point::new(0, 0),
            radius: 5,
        });
        assert_eq!(anywhere.normalize(0, Some(&front[..]), &tol).len(), 1);
    }

    #[test]
    fn test_distances_per_kind() {
        let tol = TessellationTolerance::default();
        let area = &ObstacleSpec::new(ObstacleItem::RectArea {
            corner: Point::new(0, 0),
            size: Point::new(100, 100),
        })
        .normalize(0, None, &tol)[0];
        assert_eq!(area.distance(Point::new(50, 50)), 0.0);
        assert!((area.distance(Point::new(130, 50)) - 30.0).abs() < 1e-9);
        assert_eq!(area.half_width(), 0.0);

        let track = &ObstacleSpec::new(ObstacleItem::Track {
            start: Point::new(0, 0),
            end: Point::new(100, 0),
            width: 20,
        })
        .normalize(1, None, &tol)[0];
        assert!((track.distance(Point::new(50, 40)) - 40.0).abs() < 1e-9);
        assert_eq!(track.half_width(), 10.0);
        assert_eq!(track.kind_name(), "segment");

        let arc = Arc::from_center(Point::new(0, 0), 100.0, 0.0, PI);
        let arc_track = &ObstacleSpec::new(ObstacleItem::ArcTrack { arc, width: 10 })
            .normalize(2, None, &tol)[0];
        assert!((arc_track.distance(Point::new(0, 150)) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_obstacle_spec_deserializes_flat() {
        let json = r#"[
            { "kind": "circle", "center": { "x": 1, "y": 2 }, "radius": 400000, "net": "GND" },
            { "kind": "track", "start": { "x": 0, "y": 0 }, "end": { "x": 9, "y": 0 }, "width": 2, "layers": ["F.Cu"] },
            { "kind": "filled_zone", "net": "GND", "fills": { "F.Cu": [
                { "outline": { "nodes": [ { "point": { "x": 0, "y": 0 } }, { "point": { "x": 9, "y": 0 } }, { "point": { "x": 9, "y": 9 } } ] } }
            ] } }
        ]"#;
        let specs: Vec<ObstacleSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(specs[0].net, Some(NetId::from("GND")));
        assert_eq!(specs[1].layers, vec!["F.Cu".to_string()]);
        assert!(matches!(specs[2].item, ObstacleItem::FilledZone { .. }));
    }
}
