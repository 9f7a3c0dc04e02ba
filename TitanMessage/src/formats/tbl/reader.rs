//! `.tbl` file reading and parsing

use crate::error::{Error, Result};
use crate::formats::common::{ReadContext, slice_at};
use crate::formats::text::TextCodec;
use crate::formats::translation::{TranslatableEntry, Translation, TranslationKind};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use std::path::Path;

/// Read a .tbl file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise as [`import_string_table`].
pub fn read_tbl<P: AsRef<Path>>(path: P, relative_path: &str, codec: &TextCodec) -> Result<Translation> {
    let data = std::fs::read(path)?;
    import_string_table(&data, relative_path, codec)
}

/// Parse string table data into a translation record
///
/// # Errors
///
/// Returns [`Error::TruncatedInput`] if the offset list or a string runs past the end of the data.
/// Returns [`Error::InvalidStringOffset`] if an end offset lies before the start of its string.
pub fn import_string_table(data: &[u8], relative_path: &str, codec: &TextCodec) -> Result<Translation> {
    let mut cursor = Cursor::new(data);
    let count = cursor.read_u16::<LittleEndian>().or_truncated("TBL string count", 0)? as usize;

    let mut end_offsets = Vec::with_capacity(count);
    for i in 0..count {
        let position = 2 + 2 * i as u64;
        end_offsets.push(cursor.read_u16::<LittleEndian>().or_truncated("TBL offset list", position)?);
    }

    let strings_start = cursor.position();
    let mut translation = Translation::new(TranslationKind::StringTable, relative_path);
    translation.entries.reserve(count);

    let mut start = strings_start;
    for (index, &end_offset) in end_offsets.iter().enumerate() {
        let end = strings_start + u64::from(end_offset);
        if end <= start {
            return Err(Error::InvalidStringOffset { index, end_offset });
        }

        // Last byte of each span is the terminator
        let span = slice_at(data, start, end - start, "TBL string")?;
        let text = codec.decode(&span[..span.len() - 1]);
        translation.entries.push(TranslatableEntry::new(index as i32, text));

        start = end;
    }

    tracing::debug!("{relative_path}: {count} strings");

    Ok(translation)
}
