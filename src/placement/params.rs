//! Placement parameters
//!
//! All lengths are integer nanometers. Optional fields default the same
//! way the interactive tool did: no row offset, no jitter, zero
//! clearances, one fence row.

use crate::candidates::{FenceLayout, GridLayout, Jitter, TailPolicy};
use crate::error::{PlacementError, Result};
use crate::obstacles::NetId;
use serde::{Deserialize, Serialize};

/// Element pad diameter and drill, carried through to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSize {
    pub diameter: i64,
    #[serde(default)]
    pub drill: i64,
}

fn default_rows() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlacementParams {
    pub element: ElementSize,
    /// Minimum center-to-center distance between placed elements
    pub spacing: i64,
    /// Element edge to obstacle edge
    #[serde(default)]
    pub clearance: i64,
    /// Element edge to region boundary
    #[serde(default)]
    pub edge_clearance: i64,
    /// Grid: x shift of odd rows. Fence: extra distance per further row
    #[serde(default)]
    pub row_offset: i64,
    #[serde(default)]
    pub jitter: Option<Jitter>,
    #[serde(default = "default_rows")]
    pub rows: u32,
    /// Fence: trace edge to first row
    #[serde(default)]
    pub distance: i64,
    #[serde(default)]
    pub target_net: Option<NetId>,
    /// Restrict obstacles to these layers
    #[serde(default)]
    pub layers: Option<Vec<String>>,
    #[serde(default)]
    pub diff_pair_tail: TailPolicy,
}

impl PlacementParams {
    pub fn new(diameter: i64, drill: i64, spacing: i64) -> Self {
        Self {
            element: ElementSize { diameter, drill },
            spacing,
            clearance: 0,
            edge_clearance: 0,
            row_offset: 0,
            jitter: None,
            rows: default_rows(),
            distance: 0,
            target_net: None,
            layers: None,
            diff_pair_tail: TailPolicy::default(),
        }
    }

    /// Check invariants, naming the first offending field
    pub fn validate(&self) -> Result<()> {
        if self.element.diameter <= 0 {
            return Err(PlacementError::invalid(
                "element.diameter",
                format!("must be positive, got {}", self.element.diameter),
            ));
        }
        if self.element.drill < 0 {
            return Err(PlacementError::invalid(
                "element.drill",
                format!("must not be negative, got {}", self.element.drill),
            ));
        }
        if self.spacing <= 0 {
            return Err(PlacementError::invalid(
                "spacing",
                format!("must be positive, got {}", self.spacing),
            ));
        }
        for (name, value) in [
            ("clearance", self.clearance),
            ("edge_clearance", self.edge_clearance),
            ("distance", self.distance),
        ] {
            if value < 0 {
                return Err(PlacementError::invalid(
                    name,
                    format!("must not be negative, got {}", value),
                ));
            }
        }
        if self.rows == 0 {
            return Err(PlacementError::invalid("rows", "must be at least 1"));
        }
        if let Some(jitter) = &self.jitter {
            if jitter.max_x < 0 || jitter.max_y < 0 {
                return Err(PlacementError::invalid(
                    "jitter",
                    format!("bounds must not be negative, got ({}, {})", jitter.max_x, jitter.max_y),
                ));
            }
        }
        Ok(())
    }

    pub fn element_radius(&self) -> f64 {
        self.element.diameter as f64 / 2.0
    }

    pub fn grid_layout(&self) -> GridLayout {
        GridLayout {
            spacing: self.spacing,
            row_offset: self.row_offset,
            jitter: self.jitter,
        }
    }

    pub fn fence_layout(&self) -> FenceLayout {
        FenceLayout {
            spacing: self.spacing,
            distance: self.distance,
            rows: self.rows,
            row_offset: self.row_offset,
            element_radius: self.element_radius(),
        }
    }
}
