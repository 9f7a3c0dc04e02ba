//! `.tbl` file writing

use super::{MAX_ENTRIES, STRING_TERMINATOR};
use crate::error::{Error, Result};
use crate::formats::text::TextCodec;
use crate::formats::translation::Translation;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{Cursor, Write};

/// Build string table data from a translation record
///
/// Every entry is written, in record order.
///
/// # Errors
/// Returns [`Error::TooManyEntries`] or [`Error::StringTableOverflow`] if the
/// record does not fit the 16-bit count and offsets.
pub fn export_string_table(translation: &Translation, codec: &TextCodec) -> Result<Vec<u8>> {
    let count = translation.entries.len();
    if count > MAX_ENTRIES {
        return Err(Error::TooManyEntries {
            count,
            max: MAX_ENTRIES,
        });
    }

    let mut writer = Cursor::new(Vec::new());
    writer.write_u16::<LittleEndian>(count as u16)?;

    // Offset list, filled in once the strings are written
    let offsets_position = writer.position();
    writer.write_all(&vec![0u8; count * 2])?;

    let mut end_offsets = Vec::with_capacity(count);
    let mut end_offset = 0usize;
    for (index, entry) in translation.entries.iter().enumerate() {
        let text = codec.encode(&entry.translation);
        end_offset += text.len() + 1;
        let Ok(stored) = u16::try_from(end_offset) else {
            return Err(Error::StringTableOverflow {
                index,
                offset: end_offset,
            });
        };

        writer.write_all(&text)?;
        writer.write_u8(STRING_TERMINATOR)?;
        end_offsets.push(stored);
    }

    writer.set_position(offsets_position);
    for end_offset in end_offsets {
        writer.write_u16::<LittleEndian>(end_offset)?;
    }

    Ok(writer.into_inner())
}
