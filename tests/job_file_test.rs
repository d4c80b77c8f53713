// Job file loading and dispatch
use std::time::Instant;
use via_stitch::geometry::{from_mm, Point};
use via_stitch::{load_job, run_job, PatternSpec};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stitch_job_fixture() {
        let job = load_job("tests/fixtures/stitch_job.json").expect("Failed to load job");
        assert!(matches!(job.pattern, PatternSpec::Grid { .. }));
        assert_eq!(job.obstacles.len(), 3);

        let start = Instant::now();
        let report = run_job(&job).expect("Job failed");
        println!("Stitch job: {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);

        // The GND track is exempt and the B.Cu zone is filtered out; only
        // the VCC pad at the center blocks a candidate.
        assert_eq!(report.candidate_count, 25);
        assert_eq!(report.accepted.len(), 24);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].point, Point::from_mm(5.0, 5.0));
        assert!(report
            .accepted
            .iter()
            .all(|a| a.net.as_ref().map(|n| n.0.as_str()) == Some("GND")));
    }

    #[test]
    fn test_diff_pair_job_fixture() {
        let job = load_job("tests/fixtures/diff_pair_job.json").expect("Failed to load job");
        let report = run_job(&job).expect("Job failed");
        assert_eq!(report.accepted.len(), 22);
        assert!(report
            .accepted
            .iter()
            .all(|a| a.position.y == from_mm(-0.5) || a.position.y == from_mm(2.5)));
    }

    #[test]
    fn test_report_serializes_rejection_reasons() {
        let job = load_job("tests/fixtures/stitch_job.json").expect("Failed to load job");
        let report = run_job(&job).expect("Job failed");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pattern"], "grid");
        assert_eq!(json["rejected"][0]["reason"], "obstacle");
        assert_eq!(json["rejected"][0]["source"], 0);
        assert_eq!(json["rejected"][0]["kind"], "circle");

        let trimmed = serde_json::to_value(&report.without_rejections()).unwrap();
        assert!(trimmed.get("rejected").is_none());
    }
}
