//! Error types for `TitanMessage`

use thiserror::Error;

/// The error type for `TitanMessage` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== MBM Format Errors ====================
    /// The file is not a valid message binary (missing MSG2 magic).
    #[error("invalid MBM magic: expected MSG2, found {0:?}")]
    InvalidMbmMagic([u8; 4]),

    /// An offset or length taken from a header or table runs past the end of the data.
    #[error("truncated input: {context} at offset {offset:#x}")]
    TruncatedInput {
        /// What was being read when the data ran out.
        context: &'static str,
        /// Offset at which the read was attempted.
        offset: u64,
    },

    /// A non-empty message carries the ID reserved for empty slots.
    #[error("message {index} uses the reserved ID {id:#x}")]
    ReservedMessageId {
        /// Table slot of the message.
        index: usize,
        /// The ID read from the table.
        id: u32,
    },

    // ==================== TBL Format Errors ====================
    /// A string table end offset lies before the start of its string.
    #[error("invalid end offset {end_offset:#x} for string {index}")]
    InvalidStringOffset {
        /// Index of the string in the table.
        index: usize,
        /// The end offset read from the offset list.
        end_offset: u16,
    },

    /// Too many entries to fit the 16-bit string count.
    #[error("string table holds {count} entries (max {max})")]
    TooManyEntries {
        /// Number of entries in the record.
        count: usize,
        /// Largest count the format can store.
        max: usize,
    },

    /// The string data outgrew the 16-bit end offsets.
    #[error("string table data overflows 16-bit offsets at entry {index} (offset {offset:#x})")]
    StringTableOverflow {
        /// Index of the entry that overflowed.
        index: usize,
        /// The cumulative end offset that did not fit.
        offset: usize,
    },

    // ==================== Character Override Errors ====================
    /// A character override entry does not map exactly one character to one character.
    #[error("invalid character override {source_char:?} -> {replacement:?}: both sides must be a single character")]
    InvalidCharOverride {
        /// The game-side character string.
        source_char: String,
        /// The readable replacement string.
        replacement: String,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ==================== File System Errors ====================
    /// File extension does not belong to a supported binary format.
    #[error("unrecognized file type: {0}")]
    UnknownFileType(String),

    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl Error {
    /// Whether this error means the input was not in the expected format
    /// (as opposed to I/O trouble or a cut-off file).
    pub fn is_format_mismatch(&self) -> bool {
        matches!(
            self,
            Error::InvalidMbmMagic(_)
                | Error::ReservedMessageId { .. }
                | Error::InvalidStringOffset { .. }
                | Error::UnknownFileType(_)
        )
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `TitanMessage` operations.
pub type Result<T> = std::result::Result<T, Error>;
