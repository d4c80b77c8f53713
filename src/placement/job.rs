//! Placement job files
//!
//! A job bundles parameters, one candidate pattern and the obstacle list
//! in a single JSON document.

use crate::candidates::FenceCurve;
use crate::obstacles::ObstacleSpec;
use crate::outline::{AreaSpec, BoundaryShape};
use anyhow::Context;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::params::PlacementParams;
use super::runners::{run_area_stitching, run_diff_pair_fencing, run_fencing, run_stitching};
use super::types::PlacementReport;

/// Candidate pattern and its reference geometry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternSpec {
    Grid { outline: Vec<BoundaryShape> },
    AreaGrid { areas: Vec<AreaSpec> },
    Fence { curves: Vec<FenceCurve> },
    DiffPair { curves: Vec<FenceCurve> },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlacementJob {
    pub params: PlacementParams,
    pub pattern: PatternSpec,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
}

/// Read a job from a JSON file
pub fn load_job<P: AsRef<Path>>(path: P) -> anyhow::Result<PlacementJob> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open job file {}", path.display()))?;
    read_job(BufReader::new(file))
        .with_context(|| format!("Failed to parse job file {}", path.display()))
}

/// Read a job from any JSON source
pub fn read_job<R: Read>(reader: R) -> anyhow::Result<PlacementJob> {
    let job: PlacementJob = serde_json::from_reader(reader).context("Invalid job JSON")?;
    Ok(job)
}

/// Run the job's pattern
pub fn run_job(job: &PlacementJob) -> crate::error::Result<PlacementReport> {
    let obstacles = &job.obstacles;
    let params = &job.params;
    match &job.pattern {
        PatternSpec::Grid { outline } => run_stitching(outline, obstacles, params),
        PatternSpec::AreaGrid { areas } => run_area_stitching(areas, obstacles, params),
        PatternSpec::Fence { curves } => run_fencing(curves, obstacles, params),
        PatternSpec::DiffPair { curves } => run_diff_pair_fencing(curves, obstacles, params),
    }
}
