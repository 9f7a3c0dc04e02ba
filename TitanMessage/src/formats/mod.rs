//! File format handlers for Etrian Odyssey IV text data
//!
//! - `text` - the double-byte game text encoding and its inline control codes
//! - `mbm` - message binaries (event and dialogue text)
//! - `tbl` - string tables (names)
//! - `translation` - the editable record both containers convert to and from

mod common;
pub mod mbm;
pub mod tbl;
pub mod text;
pub mod translation;

// Re-export main types
pub use mbm::{export_message_binary, import_message_binary, read_mbm};
pub use tbl::{export_string_table, import_string_table, read_tbl};
pub use text::{CharOverrides, ControlCode, TextCodec};
pub use translation::{
    PLACEHOLDER_ID, TranslatableEntry, Translation, TranslationKind, read_translation,
    write_translation,
};
