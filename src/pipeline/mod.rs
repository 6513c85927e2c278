//! # Dataset Triage Pipeline
//!
//! Turns classified dataset records into records enriched with selected
//! files and MS2 spectrum counts.
//!
//! ## Stages
//!
//! - [`DatasetProcessor`]: handles one record end to end. It short-circuits
//!   on the assessment label and the remote location, lists and classifies
//!   remote files, applies the per-dataset cap and counts MS2 spectra
//!   per selected file.
//! - [`process_collection`]: runs the processor over a collection on a
//!   bounded rayon pool. A panic while processing one dataset becomes an
//!   error-tagged record instead of aborting the batch.
//! - [`batch`]: file-level driving. It discovers
//!   `decided_<food>_gnps_datasets.json` inputs and writes
//!   `final_<food>_gnps_datasets.json` outputs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ms2triage::classifier::Classifier;
//! use ms2triage::pipeline::{batch, DatasetProcessor, PipelineConfig};
//! use ms2triage::remote::FtpToolchain;
//! use ms2triage::terms::TermTables;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default();
//! let workers = config.workers;
//! let processor = DatasetProcessor::new(
//!     FtpToolchain::default(),
//!     Classifier::new(TermTables::standard()?),
//!     config,
//! );
//! batch::process_dataset_file(
//!     &processor,
//!     Path::new("data/decided_grain_gnps_datasets.json"),
//!     Path::new("data/final_grain_gnps_datasets.json"),
//!     "grain",
//!     workers,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
mod driver;
mod error;
mod processor;


pub use driver::{pool_size, process_collection};
pub use error::PipelineError;
pub use processor::DatasetProcessor;

use crate::dataset::DatasetRecord;

/// Default cap on counted files per dataset.
pub const DEFAULT_MAX_FILES: usize = 10;

/// Hard ceiling on concurrently processed datasets.
pub const MAX_WORKERS: usize = 8;

/// Read-only settings shared by every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum number of files counted per dataset
    pub max_files_per_dataset: usize,
    /// Whether vendor formats may be downloaded and converted
    pub conversion_enabled: bool,
    /// Requested number of concurrent datasets
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_files_per_dataset: DEFAULT_MAX_FILES,
            conversion_enabled: false,
            workers: default_workers(),
        }
    }
}

/// Half the available CPUs, between 1 and 4.
pub fn default_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2);
    (cpus / 2).clamp(1, 4)
}

/// Result of processing one dataset inside the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetOutcome {
    /// Processing finished; the record carries its own source type
    Processed(DatasetRecord),
    /// Processing failed unexpectedly
    Failed {
        /// The record as it was before processing
        record: DatasetRecord,
        /// Failure description
        message: String,
    },
}

impl DatasetOutcome {
    /// The record to persist. Failures become `processing_error` records
    /// with an empty selection and zero counts.
    pub fn into_record(self) -> DatasetRecord {
        match self {
            DatasetOutcome::Processed(record) => record,
            DatasetOutcome::Failed {
                mut record,
                message,
            } => {
                record.reset_results();
                record.mark_failed(message);
                record
            }
        }
    }

    /// Whether this outcome is a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, DatasetOutcome::Failed { .. })
    }
}
