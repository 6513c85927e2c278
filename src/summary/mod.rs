//! # Pipeline Summary
//!
//! Aggregates every `final_<food>_gnps_datasets.json` in a data directory
//! into three tables:
//!
//! - **studies**: one [`StudyRow`] per dataset record
//! - **overall analytics**: one [`Analytics`] over all studies
//! - **per-food analytics**: one [`Analytics`] per food key, ordered by key
//!
//! [`write_summary`] stores the tables as CSV files in a timestamped
//! `gnps_pipeline_summary_<YYYYmmdd_HHMMSS>` directory.
//!
//! Inputs are read leniently: a file that is not a JSON array, or an element
//! that is not a dataset object, is logged and skipped.

mod error;
mod writer;


pub use error::SummaryError;
pub use writer::{summary_dir_name, write_summary, SUMMARY_DIR_PREFIX};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::classifier::Assessment;
use crate::dataset::DatasetRecord;
use crate::pipeline::batch::{food_key_from_file_name, OUTPUT_PREFIX};

/// Placeholder for absent text fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Food key used when a file name does not encode one.
pub const UNKNOWN_FOOD_KEY: &str = "unknown_food_item";

/// One dataset in the studies table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyRow {
    /// Food key of the source file
    #[serde(rename = "Food Item Key")]
    pub food_key: String,
    /// Study identifier
    #[serde(rename = "Study ID")]
    pub study_id: String,
    /// Study title
    #[serde(rename = "Title")]
    pub title: String,
    /// Species as scraped
    #[serde(rename = "Species (Original)")]
    pub species: String,
    /// Assessment label
    #[serde(rename = "LLM Assessment")]
    pub assessment: String,
    /// Justification for the label
    #[serde(rename = "LLM Reason")]
    pub assessment_reason: String,
    /// MS2 spectra over selected files
    #[serde(rename = "MS2 Spectra (Selected Files)")]
    pub ms2_spectra: u64,
    /// Source-type tag
    #[serde(rename = "MS2 Count Source")]
    pub source_type: String,
    /// Number of selected files
    #[serde(rename = "Files Processed for MS2")]
    pub files_processed: usize,
    /// Relevant files skipped for lack of conversion
    #[serde(rename = "Unsupported Files Skipped (msconvert off)")]
    pub unsupported_skipped: u64,
    /// File count reported by the repository
    #[serde(rename = "Original Num Files (Metadata)")]
    pub original_num_files: String,
    /// Spectrum count reported by the repository
    #[serde(rename = "Original Spectra (Metadata)")]
    pub original_spectra: String,
    /// Landing page of the dataset
    #[serde(rename = "Dataset URL")]
    pub url: String,
}

impl StudyRow {
    /// Flatten a processed record for the studies table.
    pub fn from_record(food_key: &str, record: &DatasetRecord) -> Self {
        let text = |value: &Option<String>| {
            value
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        Self {
            food_key: food_key.to_string(),
            study_id: if record.study_id.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                record.study_id.clone()
            },
            title: text(&record.title),
            species: text(&record.species),
            assessment: text(&record.assessment),
            assessment_reason: text(&record.assessment_reason),
            ms2_spectra: record.total_ms2_spectra,
            source_type: record
                .source_type
                .map_or_else(|| NOT_AVAILABLE.to_string(), |tag| tag.to_string()),
            files_processed: record.selected_files.len(),
            unsupported_skipped: record.unsupported_skipped,
            original_num_files: metadata_text(record.num_files.as_ref()),
            original_spectra: metadata_text(record.spectra.as_ref()),
            url: text(&record.url),
        }
    }

    fn parsed_assessment(&self) -> Option<Assessment> {
        self.assessment.parse().ok()
    }
}

fn metadata_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Study counts and spectrum totals over a group of studies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analytics {
    /// Studies in the group
    pub studies: usize,
    /// Studies labeled ACCEPTED
    pub accepted: usize,
    /// Studies labeled MAYBE
    pub maybe: usize,
    /// Studies labeled REJECTED
    pub rejected: usize,
    /// Studies with at least one MS2 spectrum
    pub studies_with_spectra: usize,
    /// Sum of MS2 spectra
    pub total_spectra: u64,
    /// Sum of skipped unsupported files
    pub unsupported_skipped: u64,
}

impl Analytics {
    /// Tally a set of rows.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a StudyRow>) -> Self {
        let mut analytics = Self::default();
        for row in rows {
            analytics.add(row);
        }
        analytics
    }

    fn add(&mut self, row: &StudyRow) {
        self.studies += 1;
        match row.parsed_assessment() {
            Some(Assessment::Accepted) => self.accepted += 1,
            Some(Assessment::Maybe) => self.maybe += 1,
            Some(Assessment::Rejected) => self.rejected += 1,
            None => {}
        }
        if row.ms2_spectra > 0 {
            self.studies_with_spectra += 1;
        }
        self.total_spectra += row.ms2_spectra;
        self.unsupported_skipped += row.unsupported_skipped;
    }

    /// Mean spectra over studies with at least one spectrum, 0 if none.
    pub fn mean_spectra(&self) -> f64 {
        if self.studies_with_spectra == 0 {
            0.0
        } else {
            self.total_spectra as f64 / self.studies_with_spectra as f64
        }
    }
}

/// Per-food analytics keyed and ordered by food key.
pub fn analytics_by_food(rows: &[StudyRow]) -> BTreeMap<String, Analytics> {
    let mut by_food: BTreeMap<String, Analytics> = BTreeMap::new();
    for row in rows {
        by_food.entry(row.food_key.clone()).or_default().add(row);
    }
    by_food
}

/// `final_*_gnps_datasets.json` files in `data_dir`, sorted by path.
pub fn discover_final_files(data_dir: &Path) -> Result<Vec<PathBuf>, SummaryError> {
    let io_err = |source| SummaryError::IoError {
        path: data_dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(data_dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_final = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| food_key_from_file_name(name, OUTPUT_PREFIX).is_some());
        if is_final && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Study rows from one final file.
pub fn read_study_rows(path: &Path) -> Result<Vec<StudyRow>, SummaryError> {
    let food_key = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|name| food_key_from_file_name(name, OUTPUT_PREFIX))
        .unwrap_or_else(|| UNKNOWN_FOOD_KEY.to_string());

    let content = fs::read_to_string(path).map_err(|source| SummaryError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| SummaryError::JsonError {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = value else {
        warn!("{} does not contain a list at the root; skipping", path.display());
        return Ok(Vec::new());
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        if !item.is_object() {
            warn!("Skipping non-object item in {}", path.display());
            continue;
        }
        match serde_json::from_value::<DatasetRecord>(item) {
            Ok(record) => rows.push(StudyRow::from_record(&food_key, &record)),
            Err(err) => warn!("Skipping malformed record in {}: {}", path.display(), err),
        }
    }
    info!("Extracted {} studies from {}", rows.len(), path.display());
    Ok(rows)
}

/// Study rows from every final file in `data_dir`. Unreadable files are
/// logged and skipped.
pub fn collect_study_rows(data_dir: &Path) -> Result<Vec<StudyRow>, SummaryError> {
    let files = discover_final_files(data_dir)?;
    if files.is_empty() {
        warn!("No final collection files found in {}", data_dir.display());
    }

    let mut rows = Vec::new();
    for path in files {
        match read_study_rows(&path) {
            Ok(mut file_rows) => rows.append(&mut file_rows),
            Err(err) => warn!("Skipping {}: {}", path.display(), err),
        }
    }
    Ok(rows)
}
