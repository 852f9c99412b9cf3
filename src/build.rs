//! Site building orchestration.
//!
//! Coordinates page rendering and asset passthrough.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output() ──► Clear/create the output directory
//!     │
//!     ├── Template::load() ──► Shared template, loaded once
//!     │
//!     └── rayon::join
//!             ├── render pages ──► extract + merge + write, in parallel
//!             └── copy assets  ──► assets/ and public/ passthrough
//! ```
//!
//! Pages are independent of each other: nothing mutable is shared between
//! page renders except the first-error latch, so the per-page work runs on
//! the rayon pool. The first error aborts the whole build; pages already
//! written stay on disk.

use crate::config::SiteConfig;
use crate::log;
use crate::logger::ProgressBars;
use crate::render::{
    Page, Template,
    assets::{self, CopyJob},
    pages,
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

/// Build the entire site, rendering pages and copying assets in parallel.
///
/// If `config.build.clean` is true, clears the output directory first.
/// On the first unrecoverable error the remaining work is aborted and the
/// error is surfaced to the caller; no partial-output cleanup is performed.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    prepare_output(output, config.build.clean)?;

    let template = Template::load(&config.build.template)?;

    let page_list = pages::collect_pages(&config.build.pages)
        .into_iter()
        .map(|path| Page::from_source(path, config))
        .collect::<Result<Vec<_>>>()?;
    let copy_jobs = assets::collect_copy_jobs(config);

    log!("pages"; "found {} pages", page_list.len());

    let progress = ProgressBars::new(&[
        ("pages", page_list.len()),
        ("assets", copy_jobs.len()),
    ]);
    let has_error = AtomicBool::new(false);

    let (pages_result, assets_result) = rayon::join(
        || render_pages(&page_list, &template, &has_error, &progress),
        || copy_assets(&copy_jobs, &has_error, &progress),
    );

    progress.finish();

    pages_result?;
    assets_result?;

    log!("build"; "site written to {}", output.display());

    Ok(())
}

/// Render all pages on the rayon pool, aborting on the first error.
fn render_pages(
    page_list: &[Page],
    template: &Template,
    has_error: &AtomicBool,
    progress: &ProgressBars,
) -> Result<()> {
    page_list.par_iter().try_for_each(|page| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        if let Err(e) = pages::render_page(page, template) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", page.relative, e);
            }
            return Err(anyhow!("Build failed"));
        }
        progress.inc("pages");
        Ok(())
    })
}

/// Copy all passthrough files on the rayon pool, aborting on the first error.
fn copy_assets(
    copy_jobs: &[CopyJob],
    has_error: &AtomicBool,
    progress: &ProgressBars,
) -> Result<()> {
    copy_jobs.par_iter().try_for_each(|job| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        if let Err(e) = assets::copy_file(job) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", job.relative, e);
            }
            return Err(anyhow!("Build failed"));
        }
        progress.inc("assets");
        Ok(())
    })
}

/// Clear and/or create the output directory.
///
/// With `clean`, any existing output is removed first. Creation treats an
/// already existing directory as success.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
