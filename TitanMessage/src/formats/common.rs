//! Bounds-checked reading shared by the container formats

use std::io;

use crate::error::{Error, Result};

/// Attach a read context to a byte-level read, so running out of data is
/// reported as [`Error::TruncatedInput`] instead of a bare IO error
pub(crate) trait ReadContext<T> {
    fn or_truncated(self, context: &'static str, offset: u64) -> Result<T>;
}

impl<T> ReadContext<T> for io::Result<T> {
    fn or_truncated(self, context: &'static str, offset: u64) -> Result<T> {
        self.map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::TruncatedInput { context, offset },
            _ => Error::Io(err),
        })
    }
}

/// Borrow `len` bytes at `offset`, or fail with [`Error::TruncatedInput`]
pub(crate) fn slice_at<'a>(data: &'a [u8], offset: u64, len: u64, context: &'static str) -> Result<&'a [u8]> {
    usize::try_from(offset)
        .ok()
        .zip(usize::try_from(len).ok())
        .and_then(|(start, len)| data.get(start..start.checked_add(len)?))
        .ok_or(Error::TruncatedInput { context, offset })
}
