//! `.mbm` file reading and parsing

use super::{COUNTS_OFFSET, MAGIC_OFFSET, MBM_SIGNATURE, RECORD_SIZE};
use crate::error::{Error, Result};
use crate::formats::common::{ReadContext, slice_at};
use crate::formats::text::TextCodec;
use crate::formats::translation::{PLACEHOLDER_ID, TranslatableEntry, Translation, TranslationKind};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use std::path::Path;

/// Header fields of a message binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MbmHeader {
    pub version: u32,
    /// Stored file size (excludes empty table slots)
    pub file_size: u32,
    /// Number of non-empty messages
    pub valid_count: u32,
    /// Offset of the message table
    pub table_offset: u32,
}

/// One message table record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: u32,
    /// Byte length of the string, terminator included; 0 for an empty slot
    pub length: u32,
    /// Offset of the string from the start of the file
    pub offset: u32,
    pub reserved: u32,
}

/// Read a .mbm file from disk
///
/// `relative_path` is stored in the record for writing it back later.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise as [`import_message_binary`].
pub fn read_mbm<P: AsRef<Path>>(path: P, relative_path: &str, codec: &TextCodec) -> Result<Translation> {
    let data = std::fs::read(path)?;
    import_message_binary(&data, relative_path, codec)
}

/// Check the magic signature and read the header fields
///
/// # Errors
///
/// Returns [`Error::InvalidMbmMagic`] if the data does not carry the MSG2 signature.
/// Returns [`Error::TruncatedInput`] if the header is cut off.
pub fn read_header(data: &[u8]) -> Result<MbmHeader> {
    let mut magic = [0u8; 4];
    let available = data.get(MAGIC_OFFSET..).unwrap_or_default();
    let copy_len = available.len().min(magic.len());
    magic[..copy_len].copy_from_slice(&available[..copy_len]);
    if copy_len < magic.len() || &magic != MBM_SIGNATURE {
        return Err(Error::InvalidMbmMagic(magic));
    }

    let mut cursor = Cursor::new(data);
    cursor.set_position(MAGIC_OFFSET as u64 + 4);
    let version = cursor.read_u32::<LittleEndian>().or_truncated("MBM header", cursor.position())?;
    let file_size = cursor.read_u32::<LittleEndian>().or_truncated("MBM header", cursor.position())?;

    cursor.set_position(COUNTS_OFFSET);
    let valid_count = cursor.read_u32::<LittleEndian>().or_truncated("MBM header", COUNTS_OFFSET)?;
    let table_offset = cursor.read_u32::<LittleEndian>().or_truncated("MBM header", COUNTS_OFFSET + 4)?;

    Ok(MbmHeader {
        version,
        file_size,
        valid_count,
        table_offset,
    })
}

/// Read the message table record in slot `index`
///
/// # Errors
///
/// Returns [`Error::TruncatedInput`] if the record lies past the end of the data.
pub fn read_record(data: &[u8], header: &MbmHeader, index: usize) -> Result<MessageRecord> {
    let position = u64::from(header.table_offset) + index as u64 * RECORD_SIZE;
    record_at(data, position)
}

fn record_at(data: &[u8], position: u64) -> Result<MessageRecord> {
    let bytes = slice_at(data, position, RECORD_SIZE, "message table record")?;
    let mut cursor = Cursor::new(bytes);
    Ok(MessageRecord {
        id: cursor.read_u32::<LittleEndian>()?,
        length: cursor.read_u32::<LittleEndian>()?,
        offset: cursor.read_u32::<LittleEndian>()?,
        reserved: cursor.read_u32::<LittleEndian>()?,
    })
}

/// Parse message binary data into a translation record
///
/// The table is scanned until the header's number of non-empty messages has
/// been read. Empty slots met on the way become placeholder entries. The scan
/// also stops where the string data begins, since the table cannot overlap it;
/// all-zero rows right before that point are padding and are dropped.
///
/// # Errors
///
/// Returns [`Error::InvalidMbmMagic`] if the data is not a message binary.
/// Returns [`Error::ReservedMessageId`] if a non-empty message uses ID `-1`.
/// Returns [`Error::TruncatedInput`] if the table or a string runs past the end of the data.
pub fn import_message_binary(data: &[u8], relative_path: &str, codec: &TextCodec) -> Result<Translation> {
    let header = read_header(data)?;
    let mut translation = Translation::new(TranslationKind::MessageBinary, relative_path);

    let mut valid = 0u32;
    let mut position = u64::from(header.table_offset);
    let mut strings_start: Option<u64> = None;
    let mut padding_rows = 0usize;

    while valid < header.valid_count {
        if let Some(start) = strings_start.filter(|&start| position >= start) {
            tracing::warn!(
                "{relative_path}: message table reached string data at {start:#x} after {valid} of {} messages",
                header.valid_count
            );
            let kept = translation.entries.len() - padding_rows;
            translation.entries.truncate(kept);
            break;
        }

        let record = record_at(data, position)?;
        let index = translation.entries.len();
        position += RECORD_SIZE;

        if record.length == 0 {
            if record == MessageRecord::default() {
                padding_rows += 1;
            } else {
                padding_rows = 0;
            }
            translation.entries.push(TranslatableEntry::placeholder());
            continue;
        }
        padding_rows = 0;

        let id = record.id as i32;
        if id == PLACEHOLDER_ID {
            return Err(Error::ReservedMessageId { index, id: record.id });
        }

        let offset = u64::from(record.offset);
        let bytes = slice_at(data, offset, u64::from(record.length), "message string")?;
        translation.entries.push(TranslatableEntry::new(id, codec.decode(bytes)));
        valid += 1;

        if offset >= position {
            strings_start = Some(strings_start.map_or(offset, |start| start.min(offset)));
        }
    }

    tracing::debug!(
        "{relative_path}: {} messages, {} empty slots",
        valid,
        translation.placeholder_count()
    );

    Ok(translation)
}
