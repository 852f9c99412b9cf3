//! The fragment-to-page merge pipeline.
//!
//! - **meta**: parse the leading `<!-- key: value -->` block of a fragment
//! - **template**: merge metadata and body into the shared template
//! - **pages**: discover fragments and run the per-page pipeline
//! - **assets**: copy static trees through to the output
//!
//! # Build Flow
//!
//! ```text
//! collect_pages() ──► extract() ──► Template::render() ──► write
//!                                                              │
//! collect_copy_jobs() ──► copy_file() ────────────────────────►┘
//!                                                         output tree
//! ```

pub mod assets;
pub mod meta;
pub mod pages;
pub mod template;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use pages::Page;
pub use template::Template;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively.
///
/// A non-existent root yields nothing.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}
