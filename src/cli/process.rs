use anyhow::{Context, Result};
use std::path::Path;

use ms2triage::pipeline::batch;

use super::PipelineArgs;

/// Process a single collection file
pub fn run(input: &Path, output: &Path, food_key: &str, args: &PipelineArgs) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let processor = args.build_processor()?;
    let workers = processor.config().workers;
    let count = batch::process_dataset_file(&processor, input, output, food_key, workers)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    println!("Wrote {} records to {}", count, output.display());
    Ok(())
}
