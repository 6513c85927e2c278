//! # ms2triage
//!
//! Command-line driver for the MS2 triage pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Count relevant MS2 spectra for every decided_<food>_gnps_datasets.json in data/
//! ms2triage -v filter --data-dir data --workers 4
//!
//! # Process one collection
//! ms2triage process decided_rice_gnps_datasets.json final_rice_gnps_datasets.json --food-key rice
//!
//! # Inspect a single filename
//! ms2triage classify ctrl_grain_01.mzML --assessment maybe --food-key grain
//!
//! # Summary tables from the final_* files
//! ms2triage summarize --data-dir data --output-dir reports
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
