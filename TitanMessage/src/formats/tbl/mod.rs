//! .tbl string table format
//!
//! Dense list of NUL-terminated strings used for item, enemy and skill
//! names. All integers are little-endian.
//!
//! ```text
//! u16        number of strings (n)
//! u16 x n    end offset of each string, terminator included, counted
//!            from the first byte after this list
//! strings    n NUL-terminated strings back to back
//! ```
//!
//! There are no stored IDs; entries are numbered by their table index.

mod reader;
mod writer;

pub use reader::{import_string_table, read_tbl};
pub use writer::export_string_table;

/// Byte that ends each string
pub const STRING_TERMINATOR: u8 = 0x00;

/// Largest number of strings the 16-bit count can hold
pub const MAX_ENTRIES: usize = u16::MAX as usize;
