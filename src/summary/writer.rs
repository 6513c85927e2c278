use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::info;

use super::{Analytics, StudyRow, SummaryError};

/// Directory-name prefix of a summary.
pub const SUMMARY_DIR_PREFIX: &str = "gnps_pipeline_summary";

const STUDIES_FILE: &str = "studies.csv";
const OVERALL_FILE: &str = "overall_analytics.csv";
const PER_FOOD_FILE: &str = "per_food_analytics.csv";

/// `gnps_pipeline_summary_<YYYYmmdd_HHMMSS>` for `timestamp`.
pub fn summary_dir_name(timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}",
        SUMMARY_DIR_PREFIX,
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Write the three summary tables under `output_dir` and return the
/// directory they were written to.
pub fn write_summary(
    output_dir: &Path,
    rows: &[StudyRow],
    timestamp: NaiveDateTime,
) -> Result<PathBuf, SummaryError> {
    let dir = output_dir.join(summary_dir_name(timestamp));
    fs::create_dir_all(&dir).map_err(|source| SummaryError::IoError {
        path: dir.clone(),
        source,
    })?;

    write_studies(&dir.join(STUDIES_FILE), rows)?;
    write_overall(&dir.join(OVERALL_FILE), &Analytics::from_rows(rows))?;
    write_per_food(&dir.join(PER_FOOD_FILE), &super::analytics_by_food(rows))?;

    info!("Summary of {} studies written to {}", rows.len(), dir.display());
    Ok(dir)
}

fn write_studies(path: &Path, rows: &[StudyRow]) -> Result<(), SummaryError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| SummaryError::IoError {
        path: path.to_path_buf(),
        source,
    })
}

fn write_overall(path: &Path, overall: &Analytics) -> Result<(), SummaryError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Metric", "Value"])?;

    let metrics = [
        ("Total Studies Processed", overall.studies.to_string()),
        ("Total ACCEPTED by LLM", overall.accepted.to_string()),
        ("Total MAYBE by LLM", overall.maybe.to_string()),
        ("Total REJECTED by LLM", overall.rejected.to_string()),
        (
            "Studies with >0 Useful MS2 Spectra",
            overall.studies_with_spectra.to_string(),
        ),
        ("Total Useful MS2 Spectra Found", overall.total_spectra.to_string()),
        (
            "Total Unsupported Files Skipped (msconvert off)",
            overall.unsupported_skipped.to_string(),
        ),
        (
            "Avg Useful MS2 Spectra (for studies with >0)",
            format!("{:.2}", overall.mean_spectra()),
        ),
    ];
    for (metric, value) in &metrics {
        writer.write_record([*metric, value.as_str()])?;
    }
    writer.flush().map_err(|source| SummaryError::IoError {
        path: path.to_path_buf(),
        source,
    })
}

fn write_per_food(
    path: &Path,
    by_food: &BTreeMap<String, Analytics>,
) -> Result<(), SummaryError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Food Item Key",
        "Total Studies",
        "ACCEPTED by LLM",
        "MAYBE by LLM",
        "REJECTED by LLM",
        "Studies with >0 Useful MS2",
        "Total Useful MS2 Spectra",
        "Total Unsupported Skipped",
        "Avg Useful MS2 Spectra (>0)",
    ])?;
    for (food_key, a) in by_food {
        writer.write_record([
            food_key.clone(),
            a.studies.to_string(),
            a.accepted.to_string(),
            a.maybe.to_string(),
            a.rejected.to_string(),
            a.studies_with_spectra.to_string(),
            a.total_spectra.to_string(),
            a.unsupported_skipped.to_string(),
            format!("{:.2}", a.mean_spectra()),
        ])?;
    }
    writer.flush().map_err(|source| SummaryError::IoError {
        path: path.to_path_buf(),
        source,
    })
}
