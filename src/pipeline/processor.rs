use log::{debug, error, info, warn};

use super::PipelineConfig;
use crate::classifier::{Assessment, Classifier};
use crate::dataset::{DatasetRecord, RemoteFile, SelectedFile, SourceType};
use crate::food_key::FoodKeyPatterns;
use crate::remote::{MarkerSet, RemoteError, RemoteLocation, RemoteStore};

/// Per-dataset orchestrator.
///
/// Owns the remote store, the classifier and the pipeline settings. All of
/// them are read-only once constructed, so one processor is shared by every
/// worker of [`process_collection`](super::process_collection).
#[derive(Debug)]
pub struct DatasetProcessor<S> {
    store: S,
    classifier: Classifier,
    config: PipelineConfig,
    conversion_available: bool,
}

impl<S: RemoteStore> DatasetProcessor<S> {
    /// Create a processor. When conversion is enabled the store is asked once
    /// whether its converter can run.
    pub fn new(store: S, classifier: Classifier, config: PipelineConfig) -> Self {
        let conversion_available = if config.conversion_enabled {
            let available = store.probe_converter();
            if !available {
                warn!("Conversion requested but the converter is unavailable; vendor files will be skipped");
            }
            available
        } else {
            false
        };
        Self {
            store,
            classifier,
            config,
            conversion_available,
        }
    }

    /// The remote store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The filename classifier.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The pipeline settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Whether vendor files will be converted and counted.
    pub fn conversion_available(&self) -> bool {
        self.conversion_available
    }

    /// Process one record, returning it with every derived field set.
    ///
    /// Failures of individual remote operations never escape: listing
    /// failures yield `no_files_found`, counting failures a zero count for
    /// that file.
    pub fn process(&self, mut record: DatasetRecord, food: &FoodKeyPatterns) -> DatasetRecord {
        record.reset_results();
        let id = record.display_id().to_string();

        let assessment = match record.parsed_assessment() {
            None => {
                warn!("[{}] No assessment label; skipping", id);
                return finish(record, SourceType::MissingAssessment);
            }
            Some(Err(err)) => {
                warn!("[{}] {}; skipping", id, err);
                return finish(record, SourceType::InvalidAssessment);
            }
            Some(Ok(Assessment::Rejected)) => {
                info!("[{}] Assessment is REJECTED; skipping", id);
                return finish(record, SourceType::Rejected);
            }
            Some(Ok(assessment)) => assessment,
        };

        let location = match record.ftp_link.as_deref().map(RemoteLocation::parse) {
            Some(Ok(location)) => location,
            Some(Err(err)) => {
                warn!("[{}] {}", id, err);
                return finish(record, SourceType::NoFtpLink);
            }
            None => {
                warn!("[{}] No FTP link", id);
                return finish(record, SourceType::NoFtpLink);
            }
        };

        info!("[{}] Processing ({}) at {}", id, assessment, location);
        let files = match self.store.list_remote_files(&location) {
            Ok(files) => files,
            Err(RemoteError::ToolMissing(tool)) => {
                error!(
                    "[{}] CRITICAL: '{}' is not installed; cannot list remote files",
                    id, tool
                );
                Vec::new()
            }
            Err(err) => {
                error!("[{}] Listing failed: {}", id, err);
                Vec::new()
            }
        };
        if files.is_empty() {
            info!("[{}] No spectral files found", id);
            return finish(record, SourceType::NoFilesFound);
        }

        let (mut selected, unsupported) = self.select(&id, files, food, assessment);
        record.unsupported_skipped = unsupported;
        if unsupported > 0 {
            info!(
                "[{}] Skipped {} relevant files that need conversion",
                id, unsupported
            );
        }
        if selected.is_empty() {
            info!("[{}] No processable files after filtering", id);
            return finish(record, SourceType::NoProcessableFiles);
        }

        let cap = self.config.max_files_per_dataset;
        if selected.len() > cap {
            // Stable: raw/control files first, listing order otherwise
            selected.sort_by_key(|file| !file.reason.mentions_raw_or_control());
            info!(
                "[{}] {} candidate files, keeping the first {} after prioritization",
                id,
                selected.len(),
                cap
            );
            selected.truncate(cap);
        }

        for file in &mut selected {
            file.spectra = self.count_file(&id, &location, file);
        }
        record.total_ms2_spectra = selected.iter().map(|file| file.spectra).sum();
        info!(
            "[{}] {} MS2 spectra across {} files",
            id,
            record.total_ms2_spectra,
            selected.len()
        );
        record.selected_files = selected;
        finish(record, SourceType::AnalysisCompleted)
    }

    /// Classify listed files. Returns the kept, countable files in listing
    /// order and the number of kept files skipped for lack of conversion.
    fn select(
        &self,
        id: &str,
        files: Vec<RemoteFile>,
        food: &FoodKeyPatterns,
        assessment: Assessment,
    ) -> (Vec<SelectedFile>, u64) {
        let mut selected = Vec::new();
        let mut unsupported = 0;

        for file in files {
            let verdict = self.classifier.classify(&file.filename, food, assessment);
            if !verdict.keep {
                debug!("[{}] Rejected {} ({})", id, file.filename, verdict.reason);
                continue;
            }
            let Some(format) = file.format() else {
                debug!("[{}] Ignoring {}: unknown format", id, file.filename);
                continue;
            };
            if format.requires_conversion() && !self.conversion_available {
                debug!("[{}] Skipping {}: conversion unavailable", id, file.filename);
                unsupported += 1;
                continue;
            }
            debug!("[{}] Selected {} ({})", id, file.filename, verdict.reason);
            selected.push(SelectedFile::new(file, verdict.reason));
        }
        (selected, unsupported)
    }

    fn count_file(&self, id: &str, location: &RemoteLocation, file: &SelectedFile) -> u64 {
        let remote = file.remote();
        let result = match remote.format() {
            Some(format) => match format.ms2_markers() {
                Some(markers) => self
                    .store
                    .count_markers_in_stream(location, &remote, &markers),
                None => self.count_converted(location, &remote),
            },
            None => Err(RemoteError::UnsupportedFormat(remote.extension.clone())),
        };
        match result {
            Ok(count) => count,
            Err(err) => {
                warn!(
                    "[{}] Could not count {}: {}; recording 0",
                    id, remote.filename, err
                );
                0
            }
        }
    }

    fn count_converted(
        &self,
        location: &RemoteLocation,
        file: &RemoteFile,
    ) -> Result<u64, RemoteError> {
        let workdir = tempfile::Builder::new().prefix("msconvert_").tempdir()?;
        let converted = self
            .store
            .convert_to_interchange_format(location, file, workdir.path())?;
        let count = MarkerSet::mzml().count_file(&converted)?;
        debug!(
            "Counted {} MS2 spectra in converted {}",
            count,
            converted.display()
        );
        Ok(count)
    }
}

fn finish(mut record: DatasetRecord, source: SourceType) -> DatasetRecord {
    record.source_type = Some(source);
    record
}
