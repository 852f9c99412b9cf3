//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating `weft.toml`.
///
/// Validation covers the two required build inputs; the optional
/// `assets`/`public` directories are checked nowhere.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file is not valid TOML")]
    Parse(#[from] toml::de::Error),

    #[error("[build.pages] directory not found: {0}")]
    PagesDirMissing(PathBuf),

    #[error("[build.template] file not found: {0}")]
    TemplateMissing(PathBuf),
}
