use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::classifier::{Assessment, MatchReason, ParseAssessmentError};
use crate::remote::FileFormat;

/// Placeholder used in logs when a record carries no study identifier.
pub const UNKNOWN_STUDY_ID: &str = "UNKNOWN_ID";

/// How a dataset's spectrum total was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Assessment was REJECTED; nothing was inspected
    Rejected,
    /// No usable FTP location
    NoFtpLink,
    /// The record carries no assessment label
    MissingAssessment,
    /// The assessment label is not ACCEPTED, MAYBE or REJECTED
    InvalidAssessment,
    /// Remote listing returned no spectral files
    NoFilesFound,
    /// Files were listed but none passed the heuristics and is countable
    NoProcessableFiles,
    /// Selected files were counted
    AnalysisCompleted,
    /// Processing the dataset failed unexpectedly
    ProcessingError,
}

impl SourceType {
    /// Snake-case tag as persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Rejected => "rejected",
            SourceType::NoFtpLink => "no_ftp_link",
            SourceType::MissingAssessment => "missing_assessment",
            SourceType::InvalidAssessment => "invalid_assessment",
            SourceType::NoFilesFound => "no_files_found",
            SourceType::NoProcessableFiles => "no_processable_files",
            SourceType::AnalysisCompleted => "analysis_completed",
            SourceType::ProcessingError => "processing_error",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scraped study, as exchanged between pipeline stages.
///
/// Fields this crate does not interpret are kept in `extra` and written back
/// unchanged. Text fields accept any JSON scalar, and derived fields of the
/// wrong shape read as their defaults, so one odd record never fails a
/// collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Study identifier, unique within a collection
    #[serde(default, deserialize_with = "lenient::text")]
    pub study_id: String,

    /// Study title
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    /// Species as scraped
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub species: Option<String>,

    /// Free-text description
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// File count reported by the repository (number or string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_files: Option<Value>,

    /// Spectrum count reported by the repository (number or string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectra: Option<Value>,

    /// Landing page of the dataset
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,

    /// Remote base location, `ftp://host/path`
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub ftp_link: Option<String>,

    /// Upstream assessment label
    #[serde(
        rename = "llm_assessment",
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub assessment: Option<String>,

    /// Upstream justification for the label
    #[serde(
        rename = "llm_reason",
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub assessment_reason: Option<String>,

    /// Files chosen for MS2 counting
    #[serde(
        rename = "selected_files_for_ms2_analysis",
        default,
        deserialize_with = "lenient::or_default"
    )]
    pub selected_files: Vec<SelectedFile>,

    /// Sum of MS2 spectra over `selected_files`
    #[serde(
        rename = "total_ms2_spectra_from_selected_files",
        default,
        deserialize_with = "lenient::or_default"
    )]
    pub total_ms2_spectra: u64,

    /// Relevant files skipped because they need a disabled conversion step
    #[serde(
        rename = "unsupported_files_skipped_count",
        default,
        deserialize_with = "lenient::or_default"
    )]
    pub unsupported_skipped: u64,

    /// How the total was derived
    #[serde(
        rename = "ms2_count_source_type",
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_type: Option<SourceType>,

    /// Failure message for error-tagged records
    #[serde(
        rename = "processing_error_message",
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub error_message: Option<String>,

    /// Any other scraped fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DatasetRecord {
    /// Create a record with only an identifier set.
    pub fn new(study_id: impl Into<String>) -> Self {
        Self {
            study_id: study_id.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for the assessment label.
    pub fn with_assessment(mut self, assessment: Assessment) -> Self {
        self.assessment = Some(assessment.as_str().to_string());
        self
    }

    /// Builder-style setter for the FTP location.
    pub fn with_ftp_link(mut self, link: impl Into<String>) -> Self {
        self.ftp_link = Some(link.into());
        self
    }

    /// Identifier for log lines.
    pub fn display_id(&self) -> &str {
        if self.study_id.is_empty() {
            UNKNOWN_STUDY_ID
        } else {
            &self.study_id
        }
    }

    /// The parsed assessment label, `None` when absent.
    pub fn parsed_assessment(&self) -> Option<Result<Assessment, ParseAssessmentError>> {
        self.assessment.as_deref().map(|label| label.parse())
    }

    /// Clear every derived field before (re)processing.
    pub fn reset_results(&mut self) {
        self.selected_files.clear();
        self.total_ms2_spectra = 0;
        self.unsupported_skipped = 0;
        self.source_type = None;
        self.error_message = None;
    }

    /// Turn this record into an error-tagged result.
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.selected_files.clear();
        self.total_ms2_spectra = 0;
        self.source_type = Some(SourceType::ProcessingError);
        self.error_message = Some(message.into());
    }
}

/// A spectral file found under a dataset's remote location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Full remote path
    pub path: String,
    /// Final path component
    pub filename: String,
    /// Lowercase extension including the dot (`.mzml`)
    pub extension: String,
}

impl RemoteFile {
    /// Build a descriptor from a remote path. Paths without an extension and
    /// directory entries (trailing `/`) yield `None`, except Bruker `.d`
    /// acquisition directories, which are files for our purposes.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let (path, is_dir) = match path.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (path, false),
        };
        let filename = path.rsplit('/').next().filter(|name| !name.is_empty())?;
        let dot = filename.rfind('.').filter(|&idx| idx > 0)?;
        let extension = filename[dot..].to_ascii_lowercase();
        if is_dir && extension != ".d" {
            return None;
        }
        Some(Self {
            path: path.to_string(),
            filename: filename.to_string(),
            extension,
        })
    }

    /// Spectral format implied by the extension.
    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_extension(&self.extension)
    }
}

/// A remote file that passed the heuristics, with its measured count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// Full remote path
    #[serde(rename = "ftp_file_path")]
    pub path: String,
    /// Final path component
    pub filename: String,
    /// Lowercase extension including the dot
    #[serde(rename = "file_ext_lower")]
    pub extension: String,
    /// Classifier rule that kept the file
    #[serde(rename = "heuristic_match_reason")]
    pub reason: MatchReason,
    /// MS2 spectra counted in the file
    #[serde(rename = "ms2_spectra_in_file", default)]
    pub spectra: u64,
}

impl SelectedFile {
    /// A not-yet-counted selection.
    pub fn new(file: RemoteFile, reason: MatchReason) -> Self {
        Self {
            path: file.path,
            filename: file.filename,
            extension: file.extension,
            reason,
            spectra: 0,
        }
    }

    /// The remote descriptor this selection was made from.
    pub fn remote(&self) -> RemoteFile {
        RemoteFile {
            path: self.path.clone(),
            filename: self.filename.clone(),
            extension: self.extension.clone(),
        }
    }
}
