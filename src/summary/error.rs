use std::path::PathBuf;

/// Errors that can occur while building or writing the summary
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// I/O error reading inputs or creating the output directory
    #[error("Failed to access {path}: {source}")]
    IoError {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error
    #[error("CSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON parsing error
    #[error("JSON error in {path}: {source}")]
    JsonError {
        /// File being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}
