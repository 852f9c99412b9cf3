//! `[build]` section configuration.
//!
//! Contains the source/output paths and the output-cleaning toggle.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in weft.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// pages = "src/pages"           # Page fragment directory
/// template = "src/template.html"
/// output = "dist"               # Output directory
/// clean = true                  # Wipe output before building
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(
        default = "defaults::build::root",
        skip_serializing_if = "Option::is_none"
    )]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory of HTML page fragments.
    #[serde(default = "defaults::build::pages")]
    #[educe(Default = defaults::build::pages())]
    pub pages: PathBuf,

    /// Shared HTML template file, loaded once per build.
    #[serde(default = "defaults::build::template")]
    #[educe(Default = defaults::build::template())]
    pub template: PathBuf,

    /// Static assets directory, copied to `<output>/<assets dir name>`.
    /// May be absent; an absent directory contributes nothing.
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Top-level passthrough directory, copied into the output root.
    /// May be absent; an absent directory contributes nothing.
    #[serde(default = "defaults::build::public")]
    #[educe(Default = defaults::build::public())]
    pub public: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Clear the output directory before each build.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub clean: bool,
}
