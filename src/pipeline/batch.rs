//! File-level driving of the pipeline.
//!
//! Inputs are `decided_<food>_gnps_datasets.json` collections in a data
//! directory; each is processed into `final_<food>_gnps_datasets.json` next to
//! it. An input that cannot be read or parsed is logged and skipped, so one
//! bad file never prevents the others from being written.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{error, info, warn};

use super::{process_collection, DatasetProcessor, PipelineError};
use crate::dataset::{read_collection, write_collection};
use crate::food_key::FoodKeyPatterns;
use crate::remote::RemoteStore;

/// File-name prefix of classified inputs.
pub const INPUT_PREFIX: &str = "decided_";
/// File-name prefix of processed outputs.
pub const OUTPUT_PREFIX: &str = "final_";
/// File-name suffix shared by inputs and outputs.
pub const COLLECTION_SUFFIX: &str = "_gnps_datasets.json";

/// One discovered input and where its result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInput {
    /// Food key parsed from the file name
    pub food_key: String,
    /// Classified collection
    pub input: PathBuf,
    /// Destination of the processed collection
    pub output: PathBuf,
}

/// What happened to each input of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Outputs written
    pub written: Vec<PathBuf>,
    /// Inputs skipped, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

/// Output path for `food_key` inside `data_dir`.
pub fn output_path(data_dir: &Path, food_key: &str) -> PathBuf {
    data_dir.join(format!("{}{}{}", OUTPUT_PREFIX, food_key, COLLECTION_SUFFIX))
}

/// Food key encoded in `file_name` if it has the given prefix and the
/// collection suffix.
pub fn food_key_from_file_name(file_name: &str, prefix: &str) -> Option<String> {
    let key = file_name
        .strip_prefix(prefix)?
        .strip_suffix(COLLECTION_SUFFIX)?;
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    valid.then(|| key.to_string())
}

/// Find classified inputs in `data_dir`, sorted by food key.
pub fn discover_inputs(data_dir: &Path) -> Result<Vec<BatchInput>, PipelineError> {
    let entries = fs::read_dir(data_dir).map_err(|source| PipelineError::DataDir {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PipelineError::DataDir {
            path: data_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(food_key) = food_key_from_file_name(name, INPUT_PREFIX) {
            inputs.push(BatchInput {
                output: output_path(data_dir, &food_key),
                input: path,
                food_key,
            });
        }
    }
    inputs.sort_by(|a, b| a.food_key.cmp(&b.food_key));
    Ok(inputs)
}

/// Process one collection file into `output`, returning the number of
/// records written.
pub fn process_dataset_file<S: RemoteStore>(
    processor: &DatasetProcessor<S>,
    input: &Path,
    output: &Path,
    food_key: &str,
    workers: usize,
) -> Result<usize, PipelineError> {
    info!("Processing {} (food key '{}')", input.display(), food_key);
    let started = Instant::now();

    let records = read_collection(input)?;
    let food = FoodKeyPatterns::from_key(food_key)?;
    let results = process_collection(processor, records, &food, workers)?;
    write_collection(output, &results)?;

    info!(
        "Wrote {} records to {} in {:.1}s",
        results.len(),
        output.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(results.len())
}

/// Process every classified input in `data_dir`.
pub fn run_batch<S: RemoteStore>(
    processor: &DatasetProcessor<S>,
    data_dir: &Path,
    workers: usize,
) -> Result<BatchReport, PipelineError> {
    let inputs = discover_inputs(data_dir)?;
    if inputs.is_empty() {
        warn!(
            "No {}*{} files found in {}",
            INPUT_PREFIX,
            COLLECTION_SUFFIX,
            data_dir.display()
        );
    }

    let mut report = BatchReport::default();
    for BatchInput {
        food_key,
        input,
        output,
    } in inputs
    {
        match process_dataset_file(processor, &input, &output, &food_key, workers) {
            Ok(_) => report.written.push(output),
            Err(err) => {
                error!("Skipping {}: {}", input.display(), err);
                report.failed.push((input, err.to_string()));
            }
        }
    }
    Ok(report)
}
