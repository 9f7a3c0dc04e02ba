//! CLI command for inspecting a single binary

use std::path::Path;

use super::convert::load_codec;
use crate::cli::progress::DOCUMENT;
use crate::converter::read_binary;
use crate::formats::translation::TranslationKind;
use crate::utils::path::normalize_path;

/// Print a summary of an .mbm or .tbl file
pub fn execute(path: &Path, charmap: Option<&Path>, show_entries: bool) -> anyhow::Result<()> {
    let codec = load_codec(charmap)?;
    let translation = read_binary(path, &normalize_path(path), &codec)?;
    let kind = translation.kind;
    let size = std::fs::metadata(path)?.len();

    println!("{}{}", DOCUMENT, path.display());
    println!("  Kind: {kind}");
    println!("  Size: {size} bytes");
    println!("  Entries: {}", translation.len());
    if kind == TranslationKind::MessageBinary {
        println!("  Empty slots: {}", translation.placeholder_count());
    }

    if show_entries {
        println!();
        for entry in translation.entries.iter().filter(|e| !e.is_placeholder()) {
            println!("[{}] {}", entry.id, entry.original.replace('\n', "\n    "));
        }
    }

    Ok(())
}
