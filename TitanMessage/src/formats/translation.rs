//! Translation records
//!
//! The editable intermediate form shared by both container formats. Each
//! record remembers which format produced it and where the binary came
//! from, so it can be written back without knowing where the JSON lives.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "kind": "message-binary",
//!   "relative_path": "Data/Event/msg_001.mbm",
//!   "entries": [
//!     { "id": 1, "original": "Hello", "translation": "Hallo", "notes": "" },
//!     { "id": -1, "original": "", "translation": "", "notes": "" }
//!   ]
//! }
//! ```
//!
//! Files written by the original converter (`FileType`, `RelativePath`,
//! `Entries`, `ID`, ...) are read as well.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a placeholder entry (an empty message table slot)
pub const PLACEHOLDER_ID: i32 = -1;

/// Which container format a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationKind {
    /// `.mbm` message binary
    #[serde(alias = "MessageBinary")]
    MessageBinary,
    /// `.tbl` string table
    #[serde(alias = "StringTable")]
    StringTable,
}

impl TranslationKind {
    /// Get the file extension for this kind
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::MessageBinary => "mbm",
            Self::StringTable => "tbl",
        }
    }

    /// Detect the kind from a file extension (case-insensitive)
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        [Self::MessageBinary, Self::StringTable]
            .into_iter()
            .find(|kind| kind.extension().eq_ignore_ascii_case(ext))
    }

    /// Detect the kind of a binary file from its path
    ///
    /// # Errors
    /// Returns [`Error::UnknownFileType`] if the extension is not `.mbm` or `.tbl`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnknownFileType(path.display().to_string()))
    }
}

impl std::fmt::Display for TranslationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MessageBinary => write!(f, "message-binary"),
            Self::StringTable => write!(f, "string-table"),
        }
    }
}

/// A single translatable string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatableEntry {
    /// Message ID (MBM) or table index (TBL); `-1` marks a placeholder
    #[serde(alias = "ID")]
    pub id: i32,
    /// Text as decoded from the binary
    #[serde(alias = "Original", default)]
    pub original: String,
    /// Text to write back on export
    #[serde(alias = "Translation", default)]
    pub translation: String,
    /// Free-form notes for translators
    #[serde(alias = "Notes", default)]
    pub notes: String,
}

impl TranslatableEntry {
    /// Create an entry whose translation starts out as the original text
    pub fn new(id: i32, text: impl Into<String>) -> Self {
        let original = text.into();
        Self {
            id,
            translation: original.clone(),
            original,
            notes: String::new(),
        }
    }

    /// Create a placeholder for an empty message table slot
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_ID, String::new())
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }

    /// Whether the translation differs from the original text
    pub fn is_translated(&self) -> bool {
        self.translation != self.original
    }
}

/// A translation record for one binary file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Container format the record was imported from
    #[serde(alias = "FileType")]
    pub kind: TranslationKind,
    /// Path of the binary relative to the conversion root
    #[serde(alias = "RelativePath")]
    pub relative_path: String,
    /// Entries in on-disk table order
    #[serde(alias = "Entries", default)]
    pub entries: Vec<TranslatableEntry>,
}

impl Translation {
    pub fn new(kind: TranslationKind, relative_path: impl Into<String>) -> Self {
        Self {
            kind,
            relative_path: relative_path.into(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of placeholder entries
    pub fn placeholder_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_placeholder()).count()
    }

    /// Number of entries whose translation differs from the original
    pub fn translated_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_translated()).count()
    }

    /// Get an entry by ID (placeholders are never returned)
    pub fn get_entry(&self, id: i32) -> Option<&TranslatableEntry> {
        if id == PLACEHOLDER_ID {
            return None;
        }
        self.entries.iter().find(|e| e.id == id)
    }

    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a record from JSON
    ///
    /// # Errors
    /// Returns [`Error::JsonError`] if the JSON is malformed or has an unknown `kind`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read a translation record from a JSON file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_translation<P: AsRef<Path>>(path: P) -> Result<Translation> {
    let json = std::fs::read_to_string(path)?;
    // Tolerate a UTF-8 BOM left by Windows editors
    Translation::from_json(json.trim_start_matches('\u{feff}'))
}

/// Write a translation record to a JSON file
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_translation<P: AsRef<Path>>(path: P, translation: &Translation) -> Result<()> {
    let mut json = translation.to_json()?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Translation {
        let mut translation = Translation::new(TranslationKind::MessageBinary, "Event/msg.mbm");
        translation.entries.push(TranslatableEntry::new(3, "Hello"));
        translation.entries.push(TranslatableEntry::placeholder());
        translation
    }

    #[test]
    fn test_json_field_names() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"kind\": \"message-binary\""));
        assert!(json.contains("\"relative_path\": \"Event/msg.mbm\""));
        assert!(json.contains("\"translation\": \"Hello\""));
        assert_eq!(Translation::from_json(&json).unwrap(), sample());
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let json = r#"{
            "FileType": "StringTable",
            "RelativePath": "Data\\nametable.tbl",
            "Entries": [
                { "ID": 0, "Original": "Sword", "Translation": "Schwert", "Notes": "" }
            ]
        }"#;
        let translation = Translation::from_json(json).unwrap();
        assert_eq!(translation.kind, TranslationKind::StringTable);
        assert_eq!(translation.relative_path, "Data\\nametable.tbl");
        assert_eq!(translation.entries[0].translation, "Schwert");
        assert_eq!(translation.translated_count(), 1);
    }

    #[test]
    fn test_read_translation_skips_bom() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("msg.json");
        std::fs::write(&path, format!("\u{feff}{}", sample().to_json().unwrap())).unwrap();
        assert_eq!(read_translation(&path).unwrap(), sample());
    }

    #[test]
    fn test_write_then_read_translation() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("msg.json");
        write_translation(&path, &sample()).unwrap();
        assert_eq!(read_translation(&path).unwrap(), sample());
    }

    #[test]
    fn test_notes_default_to_empty() {
        let json = r#"{"kind": "string-table", "relative_path": "a.tbl",
            "entries": [{"id": 0, "original": "x", "translation": "y"}]}"#;
        let translation = Translation::from_json(json).unwrap();
        assert_eq!(translation.entries[0].notes, "");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{"kind": "font", "relative_path": "a.bin", "entries": []}"#;
        assert!(matches!(Translation::from_json(json), Err(Error::JsonError(_))));
    }

    #[test]
    fn test_kind_extension_round_trip() {
        for kind in [TranslationKind::MessageBinary, TranslationKind::StringTable] {
            assert_eq!(TranslationKind::from_extension(kind.extension()), Some(kind));
            assert_eq!(
                TranslationKind::from_extension(&kind.extension().to_uppercase()),
                Some(kind)
            );
        }
        assert_eq!(TranslationKind::from_extension("json"), None);
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            TranslationKind::from_path("a/B.MBM").unwrap(),
            TranslationKind::MessageBinary
        );
        assert_eq!(TranslationKind::from_path("x.tbl").unwrap(), TranslationKind::StringTable);
        assert!(matches!(
            TranslationKind::from_path("x.json"),
            Err(Error::UnknownFileType(_))
        ));
    }

    #[test]
    fn test_placeholders_are_not_looked_up() {
        let translation = sample();
        assert_eq!(translation.placeholder_count(), 1);
        assert!(translation.get_entry(PLACEHOLDER_ID).is_none());
        assert_eq!(translation.get_entry(3).unwrap().original, "Hello");
    }
}
