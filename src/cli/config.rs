//! TOML configuration file support.
//!
//! Every key is optional; command-line flags take precedence:
//!
//! ```toml
//! # ms2triage.toml
//! [pipeline]
//! workers = 4
//! max_files = 10
//! conversion_enabled = false
//!
//! [remote]
//! lftp = "/usr/local/bin/lftp"
//! listing_timeout_secs = 600
//!
//! [terms]
//! qc = ["pool"]
//! control = ["day_zero"]
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use ms2triage::remote::FtpSettings;
use ms2triage::terms::{Category, TermTables};

/// Root configuration structure for ms2triage.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// External tool locations and time budgets.
    #[serde(default)]
    pub remote: RemoteSection,

    /// Extra patterns per term category, keyed by category name.
    #[serde(default)]
    pub terms: BTreeMap<String, Vec<String>>,
}

/// `[pipeline]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineSection {
    /// Concurrent datasets.
    pub workers: Option<usize>,

    /// Maximum counted files per dataset.
    pub max_files: Option<usize>,

    /// Download and convert vendor formats.
    pub conversion_enabled: Option<bool>,
}

/// `[remote]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSection {
    /// `lftp` binary.
    pub lftp: Option<String>,

    /// `curl` binary.
    pub curl: Option<String>,

    /// `docker` binary.
    pub docker: Option<String>,

    /// Docker image providing `msconvert`.
    pub converter_image: Option<String>,

    /// Seconds allowed for one recursive listing.
    pub listing_timeout_secs: Option<u64>,

    /// Seconds allowed for streaming one file.
    pub count_timeout_secs: Option<u64>,

    /// Seconds allowed for downloading one vendor file.
    pub download_timeout_secs: Option<u64>,

    /// Seconds allowed for converting one vendor file.
    pub convert_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Tool settings with config overrides applied.
    pub fn ftp_settings(&self) -> FtpSettings {
        let mut settings = FtpSettings::default();
        let remote = &self.remote;
        if let Some(lftp) = &remote.lftp {
            settings.lftp = lftp.clone();
        }
        if let Some(curl) = &remote.curl {
            settings.curl = curl.clone();
        }
        if let Some(docker) = &remote.docker {
            settings.docker = docker.clone();
        }
        if let Some(image) = &remote.converter_image {
            settings.converter_image = image.clone();
        }
        if let Some(secs) = remote.listing_timeout_secs {
            settings.listing_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = remote.count_timeout_secs {
            settings.count_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = remote.download_timeout_secs {
            settings.download_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = remote.convert_timeout_secs {
            settings.convert_timeout = Duration::from_secs(secs);
        }
        settings
    }

    /// Standard term tables extended with the `[terms]` section.
    pub fn term_tables(&self) -> Result<TermTables> {
        let mut builder = TermTables::builder();
        for (key, patterns) in &self.terms {
            let Some(category) = Category::ALL.iter().copied().find(|c| c.key() == key) else {
                let known: Vec<_> = Category::ALL.iter().map(|c| c.key()).collect();
                bail!(
                    "Unknown term category '{}' in config (expected one of: {})",
                    key,
                    known.join(", ")
                );
            };
            builder = builder.extend(category, patterns.iter().cloned());
        }
        builder
            .build()
            .context("Failed to compile term patterns")
    }
}
