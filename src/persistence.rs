// File: src/persistence.rs
use crate::core::types::Dictionary;
use crate::error::AugmentError;
use log::info;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads one JSON object of outline -> translation.
pub fn load_dictionary(path: &Path) -> Result<Dictionary, AugmentError> {
    let file = File::open(path).map_err(|source| AugmentError::Read { path: path.to_path_buf(), source })?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| AugmentError::Parse { path: path.to_path_buf(), source })?;
    let Value::Object(entries) = value else {
        return Err(AugmentError::NotAnObject { path: path.to_path_buf() });
    };

    let mut dictionary = Dictionary::with_capacity(entries.len());
    for (key, value) in entries {
        match value {
            Value::String(translation) => {
                dictionary.insert(key, translation);
            }
            _ => return Err(AugmentError::NonStringValue { path: path.to_path_buf(), key }),
        }
    }
    Ok(dictionary)
}

/// Loads every source in order; a later file overrides an earlier one's keys.
pub fn load_dictionaries<P: AsRef<Path>>(paths: &[P]) -> Result<Dictionary, AugmentError> {
    let mut merged = Dictionary::new();
    for path in paths {
        let path = path.as_ref();
        info!("Reading in dictionary from {}", path.display());
        merged.extend(load_dictionary(path)?);
    }
    info!("Done reading in dictionary(s). Combined size: {}", merged.len());
    Ok(merged)
}

/// Writes the generated dictionary, key-ordered and pretty-printed.
pub fn save_dictionary(dictionary: &BTreeMap<String, String>, path: &Path) -> Result<(), AugmentError> {
    write_json(dictionary, path)
}

/// Writes any serializable value (the run report, for one) the same way.
pub fn save_report<T: Serialize + ?Sized>(report: &T, path: &Path) -> Result<(), AugmentError> {
    write_json(report, path)
}

// Pretty JSON goes to a temp file in the target directory, which is then
// renamed over `path`; readers never see a half-written file.
fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), AugmentError> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_error = |source| AugmentError::Write { path: path.to_path_buf(), source };
    fs::create_dir_all(parent_dir).map_err(write_error)?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(write_error)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, value)
            .map_err(|source| AugmentError::Serialize { path: path.to_path_buf(), source })?;
        writer.write_all(b"\n").map_err(write_error)?;
        writer.flush().map_err(write_error)?;
    }

    temp_file.persist(path).map_err(|source| AugmentError::Persist { path: path.to_path_buf(), source })?;
    Ok(())
}
