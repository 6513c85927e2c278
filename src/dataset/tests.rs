use super::*;
use crate::classifier::{Assessment, MatchReason};
use crate::remote::FileFormat;
use std::fs;
use tempfile::tempdir;

// ==================== Record Serialization ====================

#[test]
fn test_record_preserves_unknown_fields() {
    let json = r#"{
        "study_id": "MSV000080001",
        "title": "Raw rice grain metabolome",
        "species": "Oryza sativa",
        "num_files": 42,
        "spectra": "12,345",
        "ftp_link": "ftp://massive.ucsd.edu/v01/MSV000080001",
        "llm_assessment": "MAYBE",
        "llm_reason": "Raw grains may be controls.",
        "principal_investigators": "Doe, J.",
        "size": "1.2 GB"
    }"#;

    let record: DatasetRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.study_id, "MSV000080001");
    assert_eq!(record.parsed_assessment(), Some(Ok(Assessment::Maybe)));
    assert_eq!(record.num_files, Some(serde_json::json!(42)));
    assert!(record.selected_files.is_empty());
    assert_eq!(record.source_type, None);

    let out = serde_json::to_value(&record).unwrap();
    assert_eq!(out["principal_investigators"], "Doe, J.");
    assert_eq!(out["size"], "1.2 GB");
    assert_eq!(out["spectra"], "12,345");
    assert_eq!(out["total_ms2_spectra_from_selected_files"], 0);
    assert!(out.get("ms2_count_source_type").is_none());
}

#[test]
fn test_selected_file_wire_names() {
    let mut selected = SelectedFile::new(
        RemoteFile::from_path("/v01/MSV1/peak/ctrl_01.mzML").unwrap(),
        MatchReason::RawOrControlSignal,
    );
    selected.spectra = 17;

    let out = serde_json::to_value(&selected).unwrap();
    assert_eq!(out["ftp_file_path"], "/v01/MSV1/peak/ctrl_01.mzML");
    assert_eq!(out["filename"], "ctrl_01.mzML");
    assert_eq!(out["file_ext_lower"], ".mzml");
    assert_eq!(out["heuristic_match_reason"], "raw_or_control_signal");
    assert_eq!(out["ms2_spectra_in_file"], 17);
}

#[test]
fn test_source_type_tags() {
    let json = serde_json::to_string(&SourceType::NoFtpLink).unwrap();
    assert_eq!(json, "\"no_ftp_link\"");
    assert_eq!(SourceType::AnalysisCompleted.to_string(), "analysis_completed");
}

#[test]
fn test_missing_and_invalid_assessment() {
    let record = DatasetRecord::new("MSV1");
    assert!(record.parsed_assessment().is_none());

    let mut record = DatasetRecord::new("MSV2");
    record.assessment = Some("UNSURE".to_string());
    assert!(matches!(record.parsed_assessment(), Some(Err(_))));
}

#[test]
fn test_mark_failed() {
    let mut record = DatasetRecord::new("MSV1").with_assessment(Assessment::Accepted);
    record.total_ms2_spectra = 99;
    record.unsupported_skipped = 2;
    record.mark_failed("listing exploded");

    assert_eq!(record.source_type, Some(SourceType::ProcessingError));
    assert_eq!(record.total_ms2_spectra, 0);
    assert_eq!(record.unsupported_skipped, 2);
    assert_eq!(record.error_message.as_deref(), Some("listing exploded"));
}

#[test]
fn test_display_id_placeholder() {
    assert_eq!(DatasetRecord::default().display_id(), UNKNOWN_STUDY_ID);
    assert_eq!(DatasetRecord::new("MSV9").display_id(), "MSV9");
}

// ==================== Remote Descriptors ====================

#[test]
fn test_remote_file_from_path() {
    let file = RemoteFile::from_path("/v01/MSV1/raw/Sample_A.mzXML").unwrap();
    assert_eq!(file.filename, "Sample_A.mzXML");
    assert_eq!(file.extension, ".mzxml");
    assert_eq!(file.format(), Some(FileFormat::MzXml));
}

#[test]
fn test_remote_file_rejects_directories_and_bare_names() {
    assert!(RemoteFile::from_path("/v01/MSV1/raw/").is_none());
    assert!(RemoteFile::from_path("/v01/MSV1/README").is_none());
    assert!(RemoteFile::from_path("/v01/MSV1/.hidden").is_none());
    assert!(RemoteFile::from_path("   ").is_none());
}

#[test]
fn test_remote_file_bruker_directory() {
    let file = RemoteFile::from_path("/v01/MSV1/raw/run_01.d/").unwrap();
    assert_eq!(file.path, "/v01/MSV1/raw/run_01.d");
    assert_eq!(file.filename, "run_01.d");
    assert_eq!(file.format(), Some(FileFormat::BrukerD));
}

// ==================== Collection I/O ====================

#[test]
fn test_collection_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("final_rice_gnps_datasets.json");

    let records = vec![
        DatasetRecord::new("MSV1").with_assessment(Assessment::Maybe),
        DatasetRecord::new("MSV2").with_ftp_link("ftp://host/path"),
    ];
    write_collection(&path, &records).unwrap();

    let loaded = read_collection(&path).unwrap();
    assert_eq!(loaded, records);
}

#[test]
fn test_read_collection_rejects_objects() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("decided_rice_gnps_datasets.json");
    fs::write(&path, r#"{"study_id": "MSV1"}"#).unwrap();

    let err = read_collection(&path).unwrap_err();
    assert!(matches!(err, DatasetError::NotAnArray { found: "object", .. }));
}

#[test]
fn test_read_collection_reports_bad_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{").unwrap();

    assert!(matches!(
        read_collection(&path),
        Err(DatasetError::JsonError { .. })
    ));
}

#[test]
fn test_read_collection_keeps_siblings_of_odd_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("decided_rice_gnps_datasets.json");
    fs::write(
        &path,
        r#"[
            {"study_id": "MSV1", "llm_assessment": "MAYBE", "ftp_link": "ftp://host/v01/MSV1"},
            {"study_id": null, "title": 12, "llm_assessment": "ACCEPTED"},
            {"study_id": 4021, "species": null, "total_ms2_spectra_from_selected_files": "lots"},
            "not a record"
        ]"#,
    )
    .unwrap();

    let records = read_collection(&path).unwrap();
    assert_eq!(records.len(), 4);

    assert_eq!(records[0].study_id, "MSV1");
    assert_eq!(records[0].ftp_link.as_deref(), Some("ftp://host/v01/MSV1"));

    assert_eq!(records[1].study_id, "");
    assert_eq!(records[1].display_id(), UNKNOWN_STUDY_ID);
    assert_eq!(records[1].title.as_deref(), Some("12"));
    assert_eq!(records[1].parsed_assessment(), Some(Ok(Assessment::Accepted)));

    assert_eq!(records[2].study_id, "4021");
    assert_eq!(records[2].species, None);
    assert_eq!(records[2].total_ms2_spectra, 0);

    assert!(records[3].parsed_assessment().is_none());
    assert_eq!(records[3].extra[RAW_ENTRY_KEY], "not a record");
}

#[test]
fn test_write_collection_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("final_rice_gnps_datasets.json");
    fs::write(&path, "previous contents").unwrap();

    let records = vec![DatasetRecord::new("MSV7")];
    write_collection(&path, &records).unwrap();

    assert_eq!(read_collection(&path).unwrap(), records);
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);
}
