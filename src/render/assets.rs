//! Static asset passthrough.
//!
//! Two trees are copied byte-for-byte into the output: the assets
//! directory (landing under its own directory name, e.g. `src/assets` →
//! `dist/assets`) and the public directory (landing at the output root).
//! An absent source directory contributes nothing.

use super::collect_all_files;
use crate::config::SiteConfig;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// One file to copy from a source tree into the output tree.
#[derive(Debug, Clone)]
pub struct CopyJob {
    /// Source file path
    pub source: PathBuf,
    /// Destination file path in the output tree
    pub dest: PathBuf,
    /// Relative path inside its source tree (for logging)
    pub relative: String,
}

/// Collect the full passthrough copy list for a build.
///
/// Collected eagerly so the caller can size a progress bar before any file
/// is touched.
pub fn collect_copy_jobs(config: &SiteConfig) -> Vec<CopyJob> {
    let output = &config.build.output;

    // The assets tree keeps its directory name in the output
    let assets = &config.build.assets;
    let assets_dest = match assets.file_name() {
        Some(name) => output.join(name),
        None => output.clone(),
    };

    let mut jobs = Vec::new();
    collect_tree(assets, &assets_dest, &mut jobs);
    collect_tree(&config.build.public, output, &mut jobs);
    jobs
}

/// Queue every file under `source_root`, mirrored under `dest_root`.
fn collect_tree(source_root: &Path, dest_root: &Path, jobs: &mut Vec<CopyJob>) {
    for source in collect_all_files(source_root) {
        let Ok(relative) = source.strip_prefix(source_root) else {
            continue;
        };
        jobs.push(CopyJob {
            dest: dest_root.join(relative),
            relative: relative.to_string_lossy().into_owned(),
            source,
        });
    }
}

/// Copy one file, creating parent directories as needed.
///
/// An ancestor already created by a concurrent copy is not an error.
pub fn copy_file(job: &CopyJob) -> Result<()> {
    if let Some(parent) = job.dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&job.source, &job.dest)
        .with_context(|| format!("Failed to copy asset: {}", job.source.display()))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
