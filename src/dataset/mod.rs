//! # Dataset Records
//!
//! The JSON shape exchanged between pipeline stages. A collection file is an
//! array of study objects:
//!
//! ```text
//! [
//!   {
//!     "study_id": "MSV000012345",
//!     "title": "...",
//!     "ftp_link": "ftp://massive.ucsd.edu/v01/MSV000012345",
//!     "llm_assessment": "MAYBE",
//!     "llm_reason": "...",
//!     "selected_files_for_ms2_analysis": [ { "ftp_file_path": ..., "ms2_spectra_in_file": 812 } ],
//!     "total_ms2_spectra_from_selected_files": 812,
//!     "unsupported_files_skipped_count": 0,
//!     "ms2_count_source_type": "analysis_completed"
//!   }
//! ]
//! ```
//!
//! Scraping and labeling populate the identity, metadata and assessment
//! fields; [`crate::pipeline`] fills in the derived fields; reporting only
//! reads them.

mod error;
mod io;
mod lenient;
mod types;

#[cfg(test)]
mod tests;

pub use error::DatasetError;
pub use io::{read_collection, write_collection, RAW_ENTRY_KEY};
pub use types::{DatasetRecord, RemoteFile, SelectedFile, SourceType, UNKNOWN_STUDY_ID};
