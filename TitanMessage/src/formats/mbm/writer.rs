//! `.mbm` file writing

use super::{HEADER_SIZE, MBM_SIGNATURE, MBM_VERSION, RECORD_SIZE};
use crate::error::Result;
use crate::formats::text::{STRING_TERMINATOR, TextCodec};
use crate::formats::translation::Translation;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{Cursor, Write};

/// Build message binary data from a translation record
///
/// Every entry gets a table slot in record order. Placeholder entries keep
/// their slot zero-filled and contribute no string data.
///
/// # Errors
/// Returns an error if writing to the buffer fails.
pub fn export_message_binary(translation: &Translation, codec: &TextCodec) -> Result<Vec<u8>> {
    let entry_count = translation.entries.len();
    let placeholder_count = translation.placeholder_count();
    let valid_count = entry_count - placeholder_count;

    let mut writer = Cursor::new(Vec::new());

    // Header
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_all(MBM_SIGNATURE)?;
    writer.write_u32::<LittleEndian>(MBM_VERSION)?;

    let file_size_position = writer.position();
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(valid_count as u32)?;

    writer.write_u32::<LittleEndian>(HEADER_SIZE)?;
    writer.write_all(&[0u8; 8])?;

    // Message table, filled in as strings are written
    let table_position = writer.position();
    writer.write_all(&vec![0u8; entry_count * RECORD_SIZE as usize])?;

    for (i, entry) in translation.entries.iter().enumerate() {
        if entry.is_placeholder() {
            continue;
        }

        let mut text = codec.encode(&entry.translation);
        text.extend_from_slice(&STRING_TERMINATOR.to_be_bytes());

        let text_position = writer.position();
        writer.write_all(&text)?;
        let text_end = writer.position();

        writer.set_position(table_position + i as u64 * RECORD_SIZE);
        writer.write_u32::<LittleEndian>(entry.id as u32)?;
        writer.write_u32::<LittleEndian>(text.len() as u32)?;
        writer.write_u32::<LittleEndian>(text_position as u32)?;
        writer.write_u32::<LittleEndian>(0)?;

        writer.set_position(text_end);
    }

    // Stored size leaves out the empty table slots
    let file_size = writer.get_ref().len() as u64 - placeholder_count as u64 * RECORD_SIZE;
    writer.set_position(file_size_position);
    writer.write_u32::<LittleEndian>(file_size as u32)?;

    tracing::debug!(
        "{}: wrote {valid_count} messages, {placeholder_count} empty slots",
        translation.relative_path
    );

    Ok(writer.into_inner())
}
