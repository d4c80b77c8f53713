//! Error types for placement runs
//!
//! Input problems are reported before any candidate is generated. An empty
//! accepted set is not an error and never shows up here.

use thiserror::Error;

/// Failure raised for malformed input to a placement run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("outline is empty: no boundary shapes were supplied")]
    EmptyOutline,

    #[error("outline is degenerate: {reason}")]
    DegenerateOutline { reason: String },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("differential pair fencing requires exactly two reference curves, got {count}")]
    DiffPairCurveCount { count: usize },

    #[error("fencing requires at least one reference curve")]
    NoReferenceCurves,
}

impl PlacementError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PlacementError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Stable short name for the error class, used in CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            PlacementError::EmptyOutline => "empty_outline",
            PlacementError::DegenerateOutline { .. } => "degenerate_outline",
            PlacementError::InvalidParameter { .. } => "invalid_parameter",
            PlacementError::DiffPairCurveCount { .. } => "diff_pair_curve_count",
            PlacementError::NoReferenceCurves => "no_reference_curves",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlacementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_names_field() {
        let err = PlacementError::invalid("spacing", "must be positive, got 0");
        assert_eq!(err.kind(), "invalid_parameter");
        assert_eq!(
            err.to_string(),
            "invalid parameter `spacing`: must be positive, got 0"
        );
    }
}
