//! via_stitch CLI: run a placement job file and write the accepted points as JSON.

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use via_stitch::{load_job, read_job, run_job};

#[derive(Parser, Debug)]
#[command(name = "via_stitch")]
#[command(about = "Place stitching and fencing vias from a JSON job description")]
#[command(version)]
struct Cli {
    /// Path to the job file (JSON), or "-" for stdin.
    #[arg(long)]
    job: PathBuf,

    /// Path to write the report (JSON). Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Include every rejected candidate and its reason in the report.
    #[arg(long)]
    debug: bool,

    /// Override the jitter seed of the job.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut job = if cli.job.as_os_str() == "-" {
        read_job(io::stdin().lock()).context("Failed to read job from stdin")?
    } else {
        load_job(&cli.job)?
    };

    if let (Some(seed), Some(jitter)) = (cli.seed, job.params.jitter.as_mut()) {
        jitter.seed = seed;
    }

    let report = match run_job(&job) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(kind = err.kind(), "{}", err);
            return Err(err.into());
        }
    };
    let report = if cli.debug {
        report
    } else {
        report.without_rejections()
    };

    match &cli.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.flush()?;
            tracing::info!("Wrote {} points to {}", report.accepted.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}
