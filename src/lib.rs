//! # ms2triage - MS2 Spectrum Triage for Public Metabolomics Datasets
//!
//! `ms2triage` decides which files inside public metabolomics datasets are
//! worth inspecting and counts the MS2 spectra they contain. It sits between
//! an upstream stage that labels each dataset `ACCEPTED`, `MAYBE` or
//! `REJECTED` and a downstream report.
//!
//! ## Key Features
//!
//! - **Term Tables**: seven categories of filename vocabulary (raw material,
//!   controls, edible parts, processed products, non-edible parts,
//!   treatments, QC) compiled once into case-insensitive regex sets and
//!   extensible from configuration.
//!
//! - **Filename Classifier**: a pure, ordered rule table mapping a filename,
//!   the dataset assessment and the food-name patterns to a keep/reject
//!   verdict with a reason tag.
//!
//! - **Remote Counting**: files are listed over FTP and streamed through a
//!   bounded-memory marker counter; vendor formats are optionally converted
//!   to mzML first. Every external command runs under a timeout.
//!
//! - **Bounded Parallelism**: datasets are processed on a small rayon pool;
//!   a failure in one dataset becomes an error-tagged record and never aborts
//!   the batch.
//!
//! ## Quick Start
//!
//! ```rust
//! use ms2triage::classifier::{Assessment, Classifier, MatchReason};
//! use ms2triage::food_key::FoodKeyPatterns;
//! use ms2triage::terms::TermTables;
//!
//! let classifier = Classifier::new(TermTables::standard()?);
//! let food = FoodKeyPatterns::from_key("grain")?;
//!
//! let verdict = classifier.classify("ctrl_raw_grain_01.mzML", &food, Assessment::Maybe);
//! assert!(verdict.keep);
//! assert_eq!(verdict.reason, MatchReason::RawOrControlSignal);
//!
//! let verdict = classifier.classify("beer_final_03.mzML", &food, Assessment::Maybe);
//! assert!(!verdict.keep);
//! # Ok::<(), ms2triage::terms::TermError>(())
//! ```
//!
//! ## Modules
//!
//! - [`terms`]: category term lists and compiled tables
//! - [`food_key`]: food-name patterns from a food identifier
//! - [`classifier`]: filename relevance rules
//! - [`dataset`]: dataset records and JSON collection I/O
//! - [`remote`]: remote listing, streaming counts and conversion
//! - [`pipeline`]: per-dataset orchestration and the parallel driver
//! - [`summary`]: tabular summary of processed collections

// Documentation lints
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod classifier;
pub mod dataset;
pub mod food_key;
pub mod pipeline;
pub mod remote;
pub mod summary;
pub mod terms;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::classifier::{Assessment, Classifier, MatchReason, Verdict};
    pub use crate::dataset::{
        read_collection, write_collection, DatasetRecord, SelectedFile, SourceType,
    };
    pub use crate::food_key::FoodKeyPatterns;
    pub use crate::pipeline::{
        process_collection, DatasetOutcome, DatasetProcessor, PipelineConfig, PipelineError,
    };
    pub use crate::remote::{FtpToolchain, RemoteLocation, RemoteStore};
    pub use crate::terms::{Category, TermTables};
}
