use std::path::PathBuf;

use crate::dataset::DatasetError;
use crate::terms::TermError;

/// Errors that abort a collection or an input file
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Reading or writing a collection failed
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Food-key patterns failed to compile
    #[error(transparent)]
    Terms(#[from] TermError),

    /// The data directory could not be scanned
    #[error("Cannot read data directory {path}: {source}")]
    DataDir {
        /// Directory being scanned
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}
