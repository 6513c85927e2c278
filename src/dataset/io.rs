use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use super::error::DatasetError;
use super::types::DatasetRecord;

/// Key under which a non-object array entry is carried through.
pub const RAW_ENTRY_KEY: &str = "raw_entry";

/// Read a JSON array of dataset records.
///
/// Entries are decoded one at a time. An entry that is not an object is kept
/// as a record holding the original value under [`RAW_ENTRY_KEY`]; with no
/// assessment it is tagged `missing_assessment` downstream.
pub fn read_collection(path: &Path) -> Result<Vec<DatasetRecord>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| DatasetError::JsonError {
        path: path.to_path_buf(),
        source,
    })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(DatasetError::NotAnArray {
                path: path.to_path_buf(),
                found: json_type_name(&other),
            })
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_entry(path, index, item))
        .collect())
}

fn decode_entry(path: &Path, index: usize, item: Value) -> DatasetRecord {
    if item.is_object() {
        match DatasetRecord::deserialize(&item) {
            Ok(record) => return record,
            Err(err) => warn!("Entry {} in {} is malformed: {}", index, path.display(), err),
        }
    } else {
        warn!(
            "Entry {} in {} is a {}, not an object",
            index,
            path.display(),
            json_type_name(&item)
        );
    }

    let mut extra = Map::new();
    extra.insert(RAW_ENTRY_KEY.to_string(), item);
    DatasetRecord {
        extra,
        ..Default::default()
    }
}

/// Write records as a pretty-printed JSON array, creating parent directories.
///
/// The array is written to a temporary file beside `path` and renamed into
/// place, so an existing file is either left intact or fully replaced.
pub fn write_collection(path: &Path, records: &[DatasetRecord]) -> Result<(), DatasetError> {
    let io_err = |source| DatasetError::IoError {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(io_err)?;
            parent
        }
        None => Path::new("."),
    };

    let temp = NamedTempFile::new_in(parent).map_err(io_err)?;
    let mut writer = BufWriter::new(temp);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
        DatasetError::JsonError {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    let temp = writer.into_inner().map_err(|err| io_err(err.into_error()))?;
    temp.as_file().sync_all().map_err(io_err)?;
    temp.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
