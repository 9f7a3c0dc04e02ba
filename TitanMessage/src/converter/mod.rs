//! Format conversion utilities
//!
//! Converts single files between the binary containers and translation JSON:
//! - MBM / TBL (binary) → JSON - kind picked from the file extension
//! - JSON → MBM / TBL (binary) - kind and destination taken from the record

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::formats::text::TextCodec;
use crate::formats::translation::{Translation, TranslationKind, read_translation, write_translation};
use crate::formats::{mbm, tbl};
use crate::utils::path::{join_relative, record_path};

/// Read an .mbm/.tbl file into a translation record, picking the format from its extension
///
/// # Errors
/// Returns [`Error::UnknownFileType`] for other extensions, otherwise as the format's reader.
pub fn read_binary<P: AsRef<Path>>(path: P, relative_path: &str, codec: &TextCodec) -> Result<Translation> {
    let path = path.as_ref();
    match TranslationKind::from_path(path)? {
        TranslationKind::MessageBinary => mbm::read_mbm(path, relative_path, codec),
        TranslationKind::StringTable => tbl::read_tbl(path, relative_path, codec),
    }
}

/// Build binary data for a translation record, dispatching on its kind
///
/// # Errors
/// Returns an error if the record cannot be represented in its format.
pub fn export_translation(translation: &Translation, codec: &TextCodec) -> Result<Vec<u8>> {
    match translation.kind {
        TranslationKind::MessageBinary => mbm::export_message_binary(translation, codec),
        TranslationKind::StringTable => tbl::export_string_table(translation, codec),
    }
}

/// Where a binary's JSON goes: `target_root/relative_dir/<stem>.json`
///
/// # Errors
/// Returns [`Error::InvalidPath`] if the source has no file name or the directory escapes the root.
pub fn json_destination(source: &Path, target_root: &Path, relative_dir: &str) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .ok_or_else(|| Error::InvalidPath(source.display().to_string()))?;
    let mut file_name = stem.to_os_string();
    file_name.push(".json");
    Ok(join_relative(target_root, relative_dir)?.join(file_name))
}

/// Where a record's binary goes: `target_root/relative_path`
///
/// # Errors
/// Returns [`Error::InvalidPath`] if the stored path is absolute or escapes the root.
pub fn binary_destination(target_root: &Path, translation: &Translation) -> Result<PathBuf> {
    join_relative(target_root, &translation.relative_path)
}

/// Convert an .mbm/.tbl file to translation JSON
///
/// `relative_dir` is the source's directory relative to the conversion root;
/// it is stored in the record so the binary can be rebuilt in the same place.
///
/// # Errors
/// Returns an error if the source cannot be read or parsed, or the JSON cannot be written.
pub fn convert_binary_to_json<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    dest: Q,
    relative_dir: &str,
    codec: &TextCodec,
) -> Result<Translation> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    tracing::info!("Converting binary→JSON: {:?} → {:?}", source, dest);

    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidPath(source.display().to_string()))?;

    let translation = read_binary(source, &record_path(relative_dir, file_name), codec)?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    write_translation(dest, &translation)?;

    tracing::info!("Conversion complete: {} entries", translation.len());
    Ok(translation)
}

/// Write a translation record as a binary under `target_root`
///
/// The binary is fully built before anything is written.
///
/// # Errors
/// Returns an error if the record cannot be encoded or the file cannot be written.
pub fn write_binary(translation: &Translation, target_root: &Path, codec: &TextCodec) -> Result<PathBuf> {
    let dest = binary_destination(target_root, translation)?;
    let data = export_translation(translation, codec)?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest, data)?;
    Ok(dest)
}

/// Convert a translation JSON file back to its binary under `target_root`
///
/// # Errors
/// Returns an error if the JSON cannot be read or parsed, or the binary cannot be written.
pub fn convert_json_to_binary<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    target_root: Q,
    codec: &TextCodec,
) -> Result<PathBuf> {
    let source = source.as_ref();
    let target_root = target_root.as_ref();
    tracing::info!("Converting JSON→binary: {:?} → {:?}", source, target_root);

    let translation = read_translation(source)?;
    let dest = write_binary(&translation, target_root, codec)?;

    tracing::info!("Conversion complete: {:?}", dest);
    Ok(dest)
}
