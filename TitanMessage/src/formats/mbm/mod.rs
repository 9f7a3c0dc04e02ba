//! .mbm message binary format
//!
//! Table-of-strings container used for event and dialogue text. All
//! integers are little-endian.
//!
//! ```text
//! 0x00  u32      reserved (0)
//! 0x04  [u8; 4]  "MSG2"
//! 0x08  u32      version (0x10000)
//! 0x0C  u32      file size, minus 16 bytes per empty table slot
//! 0x10  u32      number of non-empty messages
//! 0x14  u32      message table offset (0x20)
//! 0x18  [u8; 8]  padding
//! 0x20  message table: (id, byte length, string offset, reserved) x u32
//! ```
//!
//! Empty table slots (byte length 0) are kept as placeholder entries with
//! ID `-1`, so writing a record back reproduces the original slot layout.

mod reader;
mod writer;

pub use reader::{MbmHeader, MessageRecord, import_message_binary, read_header, read_mbm, read_record};
pub use writer::export_message_binary;

/// "MSG2" magic signature
pub const MBM_SIGNATURE: &[u8; 4] = b"MSG2";

/// Offset of the magic signature
pub const MAGIC_OFFSET: usize = 0x04;

/// Offset of the valid-entry count and table offset fields
pub const COUNTS_OFFSET: u64 = 0x10;

/// Version field written on export
pub const MBM_VERSION: u32 = 0x10000;

/// Header size and message table offset written on export
pub const HEADER_SIZE: u32 = 0x20;

/// Size of each message table record
pub const RECORD_SIZE: u64 = 0x10;
