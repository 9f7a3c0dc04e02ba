//! Batch conversion of directory trees
//!
//! Walks a source root, converts every accepted file and mirrors the
//! directory layout under the target root. Files are processed one at a time
//! in sorted path order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::converter::{binary_destination, convert_binary_to_json, json_destination, write_binary};
use crate::error::{Error, Result};
use crate::formats::text::TextCodec;
use crate::formats::translation::{TranslationKind, read_translation};
use crate::utils::path::relative_dir;

/// Which binaries a binary→JSON batch picks up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryFilter {
    /// Only accept string tables named in `string_table_suffixes` / `string_table_names`
    pub restrict_string_tables: bool,
    /// String tables whose file name ends with one of these
    pub string_table_suffixes: Vec<String>,
    /// String tables with exactly one of these file names
    pub string_table_names: Vec<String>,
    /// Skip files whose directory path contains one of these
    pub excluded_dirs: Vec<String>,
    /// Skip files whose name starts with one of these
    pub excluded_prefixes: Vec<String>,
}

impl Default for BinaryFilter {
    /// Etrian Odyssey IV rules: known text tables only, no test data or
    /// leftover seafaring files
    fn default() -> Self {
        Self {
            restrict_string_tables: true,
            string_table_suffixes: vec!["nametable.tbl".to_string()],
            string_table_names: vec!["skyitemname.tbl".to_string()],
            excluded_dirs: vec!["TestData".to_string()],
            excluded_prefixes: vec!["sea".to_string(), "FacilityEntranceText".to_string()],
        }
    }
}

impl BinaryFilter {
    /// Accept every `.mbm` and `.tbl` file
    #[must_use]
    pub fn all() -> Self {
        Self {
            restrict_string_tables: false,
            string_table_suffixes: Vec::new(),
            string_table_names: Vec::new(),
            excluded_dirs: Vec::new(),
            excluded_prefixes: Vec::new(),
        }
    }

    /// Whether `path` should be converted
    ///
    /// Excluded directories are matched against the part of the path below `root`.
    pub fn accepts(&self, path: &Path, root: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        let kind_ok = match TranslationKind::from_path(path) {
            Ok(TranslationKind::MessageBinary) => true,
            Ok(TranslationKind::StringTable) => {
                !self.restrict_string_tables
                    || self.string_table_suffixes.iter().any(|s| name.ends_with(s.as_str()))
                    || self.string_table_names.iter().any(|n| n == name)
            }
            Err(_) => false,
        };
        if !kind_ok {
            return false;
        }

        if self.excluded_prefixes.iter().any(|p| name.starts_with(p.as_str())) {
            return false;
        }

        let dir = relative_dir(path, root).unwrap_or_default();
        !self.excluded_dirs.iter().any(|d| dir.contains(d.as_str()))
    }
}

/// What to do when a single file fails to convert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the batch and return the error
    #[default]
    Abort,
    /// Record the failure and carry on with the next file
    Skip,
}

/// Options for a batch conversion
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Replace existing output files instead of skipping them
    pub overwrite: bool,
    pub error_policy: ErrorPolicy,
    /// Binaries picked up by [`batch_binary_to_json`]
    pub filter: BinaryFilter,
}

/// Summary of a batch conversion
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Files converted
    pub converted: usize,
    /// Files left alone because the output already existed
    pub skipped: usize,
    /// Files that failed (only with [`ErrorPolicy::Skip`])
    pub failed: usize,
    /// Messages for each file processed
    pub results: Vec<String>,
}

enum Outcome {
    Converted,
    Skipped,
}

impl BatchResult {
    fn record(&mut self, name: &str, outcome: Result<Outcome>, policy: ErrorPolicy) -> Result<()> {
        match outcome {
            Ok(Outcome::Converted) => {
                self.converted += 1;
                self.results.push(format!("Converted: {name}"));
            }
            Ok(Outcome::Skipped) => {
                self.skipped += 1;
                self.results.push(format!("File {name} already exists, skipping"));
            }
            Err(e) => {
                if policy == ErrorPolicy::Abort {
                    return Err(e);
                }
                tracing::warn!("Failed {name}: {e}");
                self.failed += 1;
                self.results.push(format!("Failed {name}: {e}"));
            }
        }
        Ok(())
    }
}

fn find_files<F>(dir: &Path, mut accept: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path) -> bool,
{
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && accept(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Find all binaries under `dir` that pass `filter`, sorted by path
///
/// # Errors
/// Returns [`Error::WalkDirError`] if the directory tree cannot be read.
pub fn find_binary_files<P: AsRef<Path>>(dir: P, filter: &BinaryFilter) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    find_files(dir, |path| filter.accepts(path, dir))
}

/// Find all `.json` files under `dir`, sorted by path
///
/// # Errors
/// Returns [`Error::WalkDirError`] if the directory tree cannot be read.
pub fn find_json_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    find_files(dir.as_ref(), |path| {
        path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    })
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().to_string()
}

fn binary_to_json(
    source: &Path,
    source_root: &Path,
    target_root: &Path,
    codec: &TextCodec,
    overwrite: bool,
) -> Result<Outcome> {
    let dir = relative_dir(source, source_root).ok_or_else(|| Error::InvalidPath(source.display().to_string()))?;
    let dest = json_destination(source, target_root, &dir)?;
    if dest.exists() && !overwrite {
        return Ok(Outcome::Skipped);
    }
    convert_binary_to_json(source, &dest, &dir, codec)?;
    Ok(Outcome::Converted)
}

fn json_to_binary(source: &Path, target_root: &Path, codec: &TextCodec, overwrite: bool) -> Result<Outcome> {
    let translation = read_translation(source)?;
    let dest = binary_destination(target_root, &translation)?;
    if dest.exists() && !overwrite {
        return Ok(Outcome::Skipped);
    }

    tracing::info!("Converting JSON→binary: {:?} → {:?}", source, dest);
    write_binary(&translation, target_root, codec)?;
    Ok(Outcome::Converted)
}

/// Convert every accepted binary under `source_root` to JSON under `target_root`
///
/// `progress` is called before each file with `(current, total, display path)`.
///
/// # Errors
/// Returns an error if the tree cannot be walked, or on the first failed file
/// under [`ErrorPolicy::Abort`].
pub fn batch_binary_to_json<F>(
    source_root: &Path,
    target_root: &Path,
    codec: &TextCodec,
    options: &BatchOptions,
    progress: F,
) -> Result<BatchResult>
where
    F: Fn(usize, usize, &str),
{
    let files = find_binary_files(source_root, &options.filter)?;
    let total = files.len();
    tracing::info!("Found {total} binaries under {:?}", source_root);

    let mut result = BatchResult::default();
    for (i, source) in files.iter().enumerate() {
        let name = display_path(source, source_root);
        progress(i + 1, total, &name);

        let outcome = binary_to_json(source, source_root, target_root, codec, options.overwrite);

        result.record(&name, outcome, options.error_policy)?;
    }

    Ok(result)
}

/// Convert every `.json` record under `source_root` back to binaries under `target_root`
///
/// Each binary is written at `target_root/<relative_path>` as stored in its record.
/// `progress` is called before each file with `(current, total, display path)`.
///
/// # Errors
/// Returns an error if the tree cannot be walked, or on the first failed file
/// under [`ErrorPolicy::Abort`].
pub fn batch_json_to_binary<F>(
    source_root: &Path,
    target_root: &Path,
    codec: &TextCodec,
    options: &BatchOptions,
    progress: F,
) -> Result<BatchResult>
where
    F: Fn(usize, usize, &str),
{
    let files = find_json_files(source_root)?;
    let total = files.len();
    tracing::info!("Found {total} translation files under {:?}", source_root);

    let mut result = BatchResult::default();
    for (i, source) in files.iter().enumerate() {
        let name = display_path(source, source_root);
        progress(i + 1, total, &name);

        let outcome = json_to_binary(source, target_root, codec, options.overwrite);

        result.record(&name, outcome, options.error_policy)?;
    }

    Ok(result)
}
