//! CLI commands for batch conversion

use std::path::Path;
use std::time::Instant;

use crate::batch::{
    BatchOptions, BatchResult, BinaryFilter, ErrorPolicy, batch_binary_to_json, batch_json_to_binary,
};
use crate::cli::progress::{GEAR, LOOKING_GLASS, print_done, print_step, simple_bar};
use crate::formats::text::{CharOverrides, TextCodec};

/// Flags shared by the `json` and `binary` commands
pub struct ConvertArgs<'a> {
    pub overwrite: bool,
    pub charmap: Option<&'a Path>,
    pub keep_going: bool,
    /// Disable the default binary filter (`json` only)
    pub all: bool,
}

impl ConvertArgs<'_> {
    fn options(&self) -> BatchOptions {
        BatchOptions {
            overwrite: self.overwrite,
            error_policy: if self.keep_going {
                ErrorPolicy::Skip
            } else {
                ErrorPolicy::Abort
            },
            filter: if self.all {
                BinaryFilter::all()
            } else {
                BinaryFilter::default()
            },
        }
    }
}

/// Build the text codec, loading the character map if one was given
pub fn load_codec(charmap: Option<&Path>) -> anyhow::Result<TextCodec> {
    match charmap {
        Some(path) => {
            let codec = TextCodec::new(CharOverrides::from_json_file(path)?);
            println!(
                "Loaded {} character overrides from {}",
                codec.overrides().len(),
                path.display()
            );
            Ok(codec)
        }
        None => Ok(TextCodec::default()),
    }
}

/// Convert a tree of binaries to JSON
pub fn binary_to_json(source: &Path, dest: &Path, args: &ConvertArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    print_step(1, 2, LOOKING_GLASS, &format!("Scanning {}...", source.display()));
    let codec = load_codec(args.charmap)?;

    print_step(2, 2, GEAR, "Converting binaries to JSON...");
    let pb = simple_bar(0, "Converting");
    let result = batch_binary_to_json(source, dest, &codec, &args.options(), |current, total, name| {
        pb.set_length(total as u64);
        pb.set_position(current as u64);
        pb.set_message(name.to_string());
    });
    pb.finish_and_clear();

    print_summary(&result?);
    print_done(start.elapsed());
    Ok(())
}

/// Convert a tree of JSON records back to binaries
pub fn json_to_binary(source: &Path, dest: &Path, args: &ConvertArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    print_step(1, 2, LOOKING_GLASS, &format!("Scanning {}...", source.display()));
    let codec = load_codec(args.charmap)?;

    print_step(2, 2, GEAR, "Converting JSON to binaries...");
    let pb = simple_bar(0, "Converting");
    let result = batch_json_to_binary(source, dest, &codec, &args.options(), |current, total, name| {
        pb.set_length(total as u64);
        pb.set_position(current as u64);
        pb.set_message(name.to_string());
    });
    pb.finish_and_clear();

    print_summary(&result?);
    print_done(start.elapsed());
    Ok(())
}

fn print_summary(result: &BatchResult) {
    println!();
    println!("Conversion complete:");
    println!("  Converted: {}", result.converted);
    println!("  Skipped: {}", result.skipped);
    println!("  Failed: {}", result.failed);

    if result.skipped > 0 {
        println!();
        for msg in result.results.iter().filter(|m| m.ends_with("skipping")) {
            println!("  {msg}");
        }
    }

    if result.failed > 0 {
        println!();
        println!("Failures:");
        for msg in result.results.iter().filter(|m| m.starts_with("Failed")) {
            println!("  {msg}");
        }
    }
}
