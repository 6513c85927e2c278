use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use ms2triage::pipeline::batch;

use super::{ensure_dir, PipelineArgs};

/// Process every classified collection in `data_dir`
pub fn run(data_dir: &Path, args: &PipelineArgs) -> Result<()> {
    ensure_dir(data_dir)?;

    info!("ms2triage - MS2 file filter");
    info!("===========================");
    info!("Data directory: {}", data_dir.display());

    let processor = args.build_processor()?;
    let workers = processor.config().workers;
    let report = batch::run_batch(&processor, data_dir, workers)
        .with_context(|| format!("Failed to process {}", data_dir.display()))?;

    for path in &report.written {
        println!("Wrote {}", path.display());
    }
    for (path, reason) in &report.failed {
        eprintln!("Skipped {}: {}", path.display(), reason);
    }
    info!(
        "Batch finished: {} written, {} skipped",
        report.written.len(),
        report.failed.len()
    );
    Ok(())
}
