use std::path::PathBuf;

/// Errors that can occur while reading or writing dataset collections
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// I/O error during file operations
    #[error("I/O error on {path}: {source}")]
    IoError {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Error serializing/deserializing JSON
    #[error("JSON error in {path}: {source}")]
    JsonError {
        /// File being parsed or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The file's top-level JSON value is not an array
    #[error("Expected a JSON array of datasets in {path}, found {found}")]
    NotAnArray {
        /// File being parsed
        path: PathBuf,
        /// JSON type that was found instead
        found: &'static str,
    },
}
