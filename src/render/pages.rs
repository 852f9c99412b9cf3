//! Page discovery and the per-page merge pipeline.
//!
//! A [`Page`] maps one fragment under the pages root to its mirrored output
//! path and carries the title derived from its file name, used when the
//! metadata block supplies none.

use super::collect_all_files;
use super::meta::extract;
use super::template::Template;
use crate::config::SiteConfig;
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A single page fragment scheduled for rendering.
#[derive(Debug, Clone)]
pub struct Page {
    /// Source fragment path
    pub source: PathBuf,
    /// Output file path, mirroring the path under the pages root
    pub dest: PathBuf,
    /// Relative path from the pages root (for logging)
    pub relative: String,
    /// Title derived from the file name, used when metadata has none
    pub fallback_title: String,
}

impl Page {
    /// Create a `Page` from a source path under the pages root.
    pub fn from_source(source: PathBuf, config: &SiteConfig) -> Result<Self> {
        let relative = source
            .strip_prefix(&config.build.pages)
            .map_err(|_| anyhow!("File is not in pages directory: {}", source.display()))?
            .to_str()
            .ok_or_else(|| anyhow!("Invalid path encoding"))?
            .to_owned();

        let dest = config.build.output.join(&relative);

        let stem = source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let fallback_title = title_from_stem(stem);

        Ok(Self {
            source,
            dest,
            relative,
            fallback_title,
        })
    }
}

/// Collect all `.html` fragments under the pages root.
pub fn collect_pages(dir: &Path) -> Vec<PathBuf> {
    collect_all_files(dir)
        .into_iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        .collect()
}

/// Render a single page: read, extract metadata, merge into the template,
/// write to the mirrored output path.
///
/// Parent directories are created per page; an ancestor already created by
/// a concurrent render is not an error.
pub fn render_page(page: &Page, template: &Template) -> Result<()> {
    let raw = fs::read_to_string(&page.source)
        .with_context(|| format!("Failed to read page: {}", page.source.display()))?;

    let (meta, content) = extract(&raw);
    let html = template.render(&meta, content, &page.fallback_title);

    if let Some(parent) = page.dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&page.dest, html)
        .with_context(|| format!("Failed to write page: {}", page.dest.display()))?;

    Ok(())
}

/// Derive a display title from a file stem.
///
/// `-` and `_` become spaces, then the first letter of each
/// whitespace-delimited word is uppercased (ASCII only).
pub fn title_from_stem(stem: &str) -> String {
    let mut title = String::with_capacity(stem.len());
    let mut word_start = true;

    for ch in stem.chars() {
        let ch = if matches!(ch, '-' | '_') { ' ' } else { ch };
        if ch.is_whitespace() {
            word_start = true;
            title.push(ch);
        } else if word_start {
            title.push(ch.to_ascii_uppercase());
            word_start = false;
        } else {
            title.push(ch);
        }
    }

    title
}

// ============================================================================
// Tests
// ============================================================================
