//! # Titan's Message
//!
//! A pure-Rust library for converting Etrian Odyssey IV text data into
//! editable JSON and back.
//!
//! ## Supported Formats
//!
//! - **MBM** - Message binaries holding event and dialogue text
//! - **TBL** - String tables holding item, enemy and skill names
//! - **Game text** - Shift-JIS with inline control codes, shown as `[Name:0001]` tokens
//!
//! ## Quick Start
//!
//! ### Converting a Single File
//!
//! ```no_run
//! use titan_message::prelude::*;
//!
//! let codec = TextCodec::default();
//!
//! // Binary to JSON, remembering where the binary lives
//! convert_binary_to_json("romfs/Event/msg_001.mbm", "json/Event/msg_001.json", "Event", &codec)?;
//!
//! // ...edit the translations, then write the binary back
//! convert_json_to_binary("json/Event/msg_001.json", "patched", &codec)?;
//! # Ok::<(), titan_message::Error>(())
//! ```
//!
//! ### Working with Records in Memory
//!
//! ```
//! use titan_message::prelude::*;
//!
//! let codec = TextCodec::default();
//! let data = [0x01, 0x00, 0x03, 0x00, 0x82, 0xA0, 0x00];
//!
//! let mut translation = import_string_table(&data, "nametable.tbl", &codec)?;
//! assert_eq!(translation.entries[0].original, "あ");
//!
//! translation.entries[0].translation = "A".to_string();
//! let patched = export_string_table(&translation, &codec)?;
//! assert_eq!(patched, [0x01, 0x00, 0x03, 0x00, 0x82, 0x60, 0x00]);
//! # Ok::<(), titan_message::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `titan-message` command-line binary

pub mod batch;
pub mod converter;
pub mod error;
pub mod formats;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};
pub use formats::{export_message_binary, export_string_table, import_message_binary, import_string_table};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::formats::text::{CharOverrides, ControlCode, TextCodec};
    pub use crate::formats::translation::{
        PLACEHOLDER_ID, TranslatableEntry, Translation, TranslationKind, read_translation,
        write_translation,
    };
    pub use crate::formats::{
        export_message_binary, export_string_table, import_message_binary, import_string_table,
    };

    pub use crate::converter::{convert_binary_to_json, convert_json_to_binary};

    pub use crate::batch::{
        BatchOptions, BatchResult, BinaryFilter, ErrorPolicy, batch_binary_to_json,
        batch_json_to_binary, find_binary_files, find_json_files,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
