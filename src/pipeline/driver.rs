use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{error, info};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use super::{DatasetOutcome, DatasetProcessor, PipelineError, MAX_WORKERS};
use crate::dataset::DatasetRecord;
use crate::food_key::FoodKeyPatterns;
use crate::remote::RemoteStore;

/// Worker count for `datasets` datasets when `requested` workers are asked
/// for: never more than the datasets or [`MAX_WORKERS`], never less than one.
pub fn pool_size(requested: usize, datasets: usize) -> usize {
    requested.min(datasets).min(MAX_WORKERS).max(1)
}

/// Process every record on a bounded worker pool.
///
/// Each record is processed exactly once. A panic while processing a record
/// is contained to that record, which is returned tagged as
/// `processing_error`. The output is sorted by `study_id`.
pub fn process_collection<S: RemoteStore>(
    processor: &DatasetProcessor<S>,
    records: Vec<DatasetRecord>,
    food: &FoodKeyPatterns,
    workers: usize,
) -> Result<Vec<DatasetRecord>, PipelineError> {
    let total = records.len();
    if total == 0 {
        info!("No datasets to process");
        return Ok(Vec::new());
    }

    let threads = pool_size(workers, total);
    info!(
        "Processing {} datasets for '{}' with {} workers",
        total,
        food.key(),
        threads
    );
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|idx| format!("ms2triage-worker-{}", idx))
        .build()?;

    let completed = AtomicUsize::new(0);
    let mut results: Vec<DatasetRecord> = pool.install(|| {
        records
            .into_par_iter()
            .map(|record| {
                let outcome = process_isolated(processor, record, food);
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                info!("Progress: {}/{} datasets", done, total);
                outcome.into_record()
            })
            .collect()
    });

    results.sort_by(|a, b| a.study_id.cmp(&b.study_id));
    Ok(results)
}

fn process_isolated<S: RemoteStore>(
    processor: &DatasetProcessor<S>,
    record: DatasetRecord,
    food: &FoodKeyPatterns,
) -> DatasetOutcome {
    let original = record.clone();
    match catch_unwind(AssertUnwindSafe(|| processor.process(record, food))) {
        Ok(record) => DatasetOutcome::Processed(record),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("[{}] Processing failed: {}", original.display_id(), message);
            DatasetOutcome::Failed {
                record: original,
                message,
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
