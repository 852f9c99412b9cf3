//! Shared page template and placeholder substitution.
//!
//! The template is loaded once per build and is read-only afterwards, so it
//! can be shared freely across parallel page renders.
//!
//! Substitution is a fixed enumerated set of string replacements, not a
//! template engine: no expressions, no escaping, no generic key lookup.
//! Unrecognized `{{...}}` tokens pass through untouched.

use super::meta::Metadata;
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Replaced everywhere with the resolved page title.
const TITLE: &str = "{{title}}";
/// Replaced everywhere with the `langSel` metadata value.
const LANG_SEL: &str = "{{langSel}}";
/// Replaced everywhere with the `homeHref` metadata value.
const HOME_HREF: &str = "{{homeHref}}";
/// Replaced once, at its first occurrence, with the page body.
const CONTENT: &str = "{{content}}";

/// The shared HTML template all pages are merged into.
#[derive(Debug, Clone)]
pub struct Template {
    html: String,
}

impl Template {
    pub fn new(html: String) -> Self {
        Self { html }
    }

    /// Load the template from disk. A read failure is fatal to the build.
    pub fn load(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template: {}", path.display()))?;
        Ok(Self::new(html))
    }

    /// Merge one page into the template.
    ///
    /// The title resolves to the `title` metadata value when present and
    /// non-empty, otherwise to `fallback_title`. Absent `langSel` and
    /// `homeHref` substitute as the empty string. `{{content}}` is replaced
    /// only at its first occurrence; later occurrences stay literal.
    ///
    /// Pure function of its inputs.
    pub fn render(&self, meta: &Metadata, content: &str, fallback_title: &str) -> String {
        let title = meta
            .get("title")
            .filter(|title| !title.is_empty())
            .unwrap_or(fallback_title);

        self.html
            .replace(TITLE, title)
            .replace(LANG_SEL, meta.get("langSel").unwrap_or_default())
            .replace(HOME_HREF, meta.get("homeHref").unwrap_or_default())
            .replacen(CONTENT, content, 1)
    }
}

// ============================================================================
// Tests
// ============================================================================
