use anyhow::{Context, Result};
use chrono::Local;
use log::{info, warn};
use std::path::Path;

use ms2triage::summary::{self, Analytics};

use super::ensure_dir;

/// Write summary tables for the processed collections in `data_dir`
pub fn run(data_dir: &Path, output_dir: &Path) -> Result<()> {
    ensure_dir(data_dir)?;
    info!("Starting summary generation from {}", data_dir.display());

    let rows = summary::collect_study_rows(data_dir)
        .with_context(|| format!("Failed to read {}", data_dir.display()))?;
    if rows.is_empty() {
        warn!("No study data extracted; no summary written");
        return Ok(());
    }

    let dir = summary::write_summary(output_dir, &rows, Local::now().naive_local())
        .context("Failed to write summary")?;

    let overall = Analytics::from_rows(&rows);
    println!("Studies:            {}", overall.studies);
    println!(
        "ACCEPTED/MAYBE/REJECTED: {}/{}/{}",
        overall.accepted, overall.maybe, overall.rejected
    );
    println!("Studies with MS2:   {}", overall.studies_with_spectra);
    println!("Total MS2 spectra:  {}", overall.total_spectra);
    println!("Summary written to {}", dir.display());
    Ok(())
}
