//! Exercises the command-line toolchain against stand-in `lftp` and `curl`
//! scripts serving local fixture files.

#![cfg(unix)]

use ms2triage::classifier::{Assessment, Classifier};
use ms2triage::dataset::{DatasetRecord, SourceType};
use ms2triage::food_key::FoodKeyPatterns;
use ms2triage::pipeline::{DatasetProcessor, PipelineConfig};
use ms2triage::remote::{FileFormat, FtpSettings, FtpToolchain, RemoteLocation, RemoteStore};
use ms2triage::terms::TermTables;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

const LISTING: &str = "\
/v01/MSV001/
/v01/MSV001/peak/
/v01/MSV001/peak/ctrl_raw_grain_01.mzML
/v01/MSV001/peak/beer_final_03.mzML
/v01/MSV001/peak/ctrl_grain_02.mgf
/v01/MSV001/peak/README.txt
/v01/MSV001/raw/ctrl_raw_grain_01.raw
";

const MZML: &str = r#"<mzML>
<spectrum index="0"><cvParam cvRef="MS" accession="MS:1000579" name="MS1 spectrum"/></spectrum>
<spectrum index="1"><cvParam cvRef="MS" accession="MS:1000580" name="MSn spectrum"/></spectrum>
<spectrum index="2"><cvParam cvRef="MS" accession="MS:1000580" name="MSn spectrum"/></spectrum>
<spectrum index="3"><cvParam cvRef="MS" accession="MS:1000580" name="MSn spectrum"/></spectrum>
</mzML>
"#;

const MGF: &str = "BEGIN IONS\nPEPMASS=301.1\nEND IONS\nBEGIN IONS\nPEPMASS=412.2\nEND IONS\n";

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// One test per binary: writing an executable while another thread forks
/// can fail with ETXTBSY
#[test]
fn test_toolchain_with_stub_tools() {
    let dir = tempdir().unwrap();
    let fixtures = dir.path().join("fixtures");
    fs::create_dir(&fixtures).unwrap();
    fs::write(fixtures.join("listing.txt"), LISTING).unwrap();
    fs::write(fixtures.join("ctrl_raw_grain_01.mzML"), MZML).unwrap();
    fs::write(fixtures.join("ctrl_grain_02.mgf"), MGF).unwrap();

    let lftp = dir.path().join("lftp");
    let curl = dir.path().join("curl");
    write_script(&lftp, &format!("cat '{}/listing.txt'", fixtures.display()));
    write_script(
        &curl,
        &format!(
            "for last; do :; done\ncat \"{}/$(basename \"$last\")\"",
            fixtures.display()
        ),
    );

    let settings = FtpSettings {
        lftp: lftp.to_string_lossy().into_owned(),
        curl: curl.to_string_lossy().into_owned(),
        docker: dir.path().join("no-docker").to_string_lossy().into_owned(),
        listing_timeout: Duration::from_secs(30),
        count_timeout: Duration::from_secs(30),
        ..FtpSettings::default()
    };
    let toolchain = FtpToolchain::new(settings);
    let location = RemoteLocation::parse("ftp://massive.ucsd.edu/v01/MSV001").unwrap();

    // Listing keeps known spectral formats only
    let files = toolchain.list_remote_files(&location).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ctrl_raw_grain_01.mzML",
            "beer_final_03.mzML",
            "ctrl_grain_02.mgf",
            "ctrl_raw_grain_01.raw"
        ]
    );

    // Streaming count over a real pipe
    let mzml = &files[0];
    let markers = FileFormat::MzMl.ms2_markers().unwrap();
    assert_eq!(
        toolchain
            .count_markers_in_stream(&location, mzml, &markers)
            .unwrap(),
        3
    );

    // A file the stub cannot serve makes curl exit non-zero
    let missing = &files[1];
    assert!(toolchain
        .count_markers_in_stream(&location, missing, &markers)
        .is_err());

    // Docker is absent, so conversion is reported unavailable
    assert!(!toolchain.probe_converter());

    // Whole dataset through the processor
    let processor = DatasetProcessor::new(
        toolchain,
        Classifier::new(TermTables::standard().unwrap()),
        PipelineConfig {
            conversion_enabled: true,
            workers: 1,
            ..PipelineConfig::default()
        },
    );
    assert!(!processor.conversion_available());

    let record = DatasetRecord::new("MSV001")
        .with_assessment(Assessment::Maybe)
        .with_ftp_link("ftp://massive.ucsd.edu/v01/MSV001");
    let out = processor.process(record, &FoodKeyPatterns::from_key("grain").unwrap());

    assert_eq!(out.source_type, Some(SourceType::AnalysisCompleted));
    let counts: Vec<_> = out
        .selected_files
        .iter()
        .map(|f| (f.filename.as_str(), f.spectra))
        .collect();
    assert_eq!(
        counts,
        vec![("ctrl_raw_grain_01.mzML", 3), ("ctrl_grain_02.mgf", 2)]
    );
    assert_eq!(out.total_ms2_spectra, 5);
    assert_eq!(out.unsupported_skipped, 1);
}
