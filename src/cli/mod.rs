use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

use ms2triage::classifier::{Assessment, Classifier};
use ms2triage::pipeline::{DatasetProcessor, PipelineConfig};
use ms2triage::remote::FtpToolchain;

mod classify;
mod config;
mod filter;
mod process;
mod summarize;

use config::Config;

/// ms2triage - MS2 spectrum triage for public metabolomics datasets
#[derive(Parser)]
#[command(name = "ms2triage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that run the pipeline.
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Datasets processed concurrently (default: half the CPUs, 1-4)
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Maximum files counted per dataset
    #[arg(long)]
    max_files: Option<usize>,

    /// Download and convert vendor formats (.raw, .wiff, .d) with docker
    #[arg(long)]
    enable_conversion: bool,
}

impl PipelineArgs {
    /// Merge config file and flags into a ready processor.
    fn build_processor(&self) -> Result<DatasetProcessor<FtpToolchain>> {
        let config = Config::load(self.config.as_deref())?;
        let defaults = PipelineConfig::default();
        let pipeline = PipelineConfig {
            max_files_per_dataset: self
                .max_files
                .or(config.pipeline.max_files)
                .unwrap_or(defaults.max_files_per_dataset),
            conversion_enabled: self.enable_conversion
                || config.pipeline.conversion_enabled.unwrap_or(false),
            workers: self
                .workers
                .or(config.pipeline.workers)
                .unwrap_or(defaults.workers),
        };

        info!("Workers: {}", pipeline.workers);
        info!("Max files per dataset: {}", pipeline.max_files_per_dataset);
        info!(
            "Vendor conversion: {}",
            if pipeline.conversion_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        let classifier = Classifier::new(config.term_tables()?);
        let store = FtpToolchain::new(config.ftp_settings());
        Ok(DatasetProcessor::new(store, classifier, pipeline))
    }
}

/// Assessment label accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AssessmentArg {
    /// Relevant dataset
    Accepted,
    /// Possibly relevant dataset
    Maybe,
    /// Irrelevant dataset
    Rejected,
}

impl From<AssessmentArg> for Assessment {
    fn from(arg: AssessmentArg) -> Self {
        match arg {
            AssessmentArg::Accepted => Assessment::Accepted,
            AssessmentArg::Maybe => Assessment::Maybe,
            AssessmentArg::Rejected => Assessment::Rejected,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Process every decided_<food>_gnps_datasets.json in the data directory
    Filter {
        /// Directory holding the classified collections
        #[arg(long, value_name = "DIR", default_value = "data")]
        data_dir: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Process a single collection file
    Process {
        /// Classified collection (JSON array)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Destination of the processed collection
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Food key the collection was scraped for (e.g. brown_rice)
        #[arg(long)]
        food_key: String,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show how a filename would be classified
    Classify {
        /// Filename to classify
        #[arg(value_name = "FILENAME")]
        filename: String,

        /// Dataset assessment
        #[arg(short, long, value_enum)]
        assessment: AssessmentArg,

        /// Food key for food-name matching
        #[arg(long, default_value = "")]
        food_key: String,

        /// Load extra term patterns from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Write summary tables for every final_<food>_gnps_datasets.json
    Summarize {
        /// Directory holding the processed collections
        #[arg(long, value_name = "DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Directory the summary directory is created in
        #[arg(long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Filter { data_dir, pipeline } => filter::run(&data_dir, &pipeline),
        Commands::Process {
            input,
            output,
            food_key,
            pipeline,
        } => process::run(&input, &output, &food_key, &pipeline),
        Commands::Classify {
            filename,
            assessment,
            food_key,
            config,
        } => classify::run(
            &filename,
            assessment.into(),
            &food_key,
            config.as_deref(),
        ),
        Commands::Summarize {
            data_dir,
            output_dir,
        } => summarize::run(&data_dir, &output_dir),
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Directory does not exist: {}", dir.display());
    }
    Ok(())
}
