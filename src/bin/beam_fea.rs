//! Beam FEA command line driver
//!
//! Usage: `beam-fea <job.json> [output-dir]`
//!
//! Solves the job and writes the result files enabled in its `options`
//! block, relative to `output-dir` (default: the current directory).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;

use beam_fea::io::{save_results_in, JobFile};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(job_path) = args.next().map(PathBuf::from) else {
        bail!("usage: beam-fea <job.json> [output-dir]");
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_default();

    let job_file = JobFile::load(&job_path)
        .with_context(|| format!("Failed to read job file {}", job_path.display()))?;
    info!(
        "Loaded {} nodes and {} elements from {}",
        job_file.nodes.len(),
        job_file.elems.len(),
        job_path.display()
    );

    let mut summary = job_file.solve().context("Analysis failed")?;

    save_results_in(&mut summary, &job_file.options, &output_dir)
        .with_context(|| format!("Failed to save results to {}", output_dir.display()))?;

    println!("{}", summary.full_report());
    Ok(())
}
