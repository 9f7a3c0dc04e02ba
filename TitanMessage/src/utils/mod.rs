//! Utility functions

pub mod path;

pub use path::{join_relative, normalize_path, record_path, relative_dir};
