//! Path utilities

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Normalize path separators to forward slashes (for translation records)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Get the directory of `file` relative to `root`, with forward slashes
///
/// Files directly inside `root` give an empty string.
pub fn relative_dir<P: AsRef<Path>, Q: AsRef<Path>>(file: P, root: Q) -> Option<String> {
    let parent = file.as_ref().parent()?;
    parent
        .strip_prefix(root.as_ref())
        .ok()
        .map(normalize_path)
}

/// Join a stored relative path (either separator) onto `root`
///
/// # Errors
/// Returns [`Error::InvalidPath`] if the relative path is absolute or climbs out of `root`.
pub fn join_relative<P: AsRef<Path>>(root: P, relative: &str) -> Result<PathBuf> {
    let normalized = relative.replace('\\', "/");
    let mut path = root.as_ref().to_path_buf();

    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return Err(Error::InvalidPath(relative.to_string())),
        }
    }

    Ok(path)
}

/// Combine a relative directory and a file name into a record path
pub fn record_path(relative_dir: &str, file_name: &str) -> String {
    let dir = relative_dir.trim_matches(|c| c == '/' || c == '\\');
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{file_name}", normalize_path(dir))
    }
}
