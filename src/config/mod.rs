//! Site configuration management for `weft.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[build]`   | Source/output paths and the output-clean toggle  |
//!
//! # Example
//!
//! ```toml
//! [build]
//! pages = "src/pages"
//! template = "src/template.html"
//! assets = "src/assets"
//! public = "public"
//! output = "dist"
//! clean = true
//! ```

mod build;
pub mod defaults;
mod error;

use build::BuildConfig;
use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing weft.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        // Determine the final root path based on command
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => {
                let base = cli
                    .root
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| self.get_root().to_owned());
                base.join(name)
            }
            _ => cli
                .root
                .as_ref()
                .cloned()
                .unwrap_or_else(|| self.get_root().to_owned()),
        };

        if let Commands::Build { build_args } = &cli.command {
            Self::update_option(&mut self.build.clean, build_args.clean.as_ref());
            if let Some(template) = &build_args.template {
                self.build.template = template.clone();
            }
        }

        self.set_root(&root);
        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.get_cli();

        // Apply CLI overrides first
        Self::update_option(&mut self.build.pages, cli.pages.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize all directory paths
        self.build.pages = Self::normalize_path(&root.join(&self.build.pages));
        self.build.template = Self::normalize_path(&root.join(&self.build.template));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.build.public = Self::normalize_path(&root.join(&self.build.public));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for a build.
    ///
    /// The pages directory and the template are required inputs; the assets
    /// and public directories are optional and checked nowhere.
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if !self.build.pages.is_dir() {
            bail!(ConfigError::PagesDirMissing(self.build.pages.clone()));
        }

        if !self.build.template.is_file() {
            bail!(ConfigError::TemplateMissing(self.build.template.clone()));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let config_str = r#"
            [build]
            pages = "fragments"
            output = "www"
        "#;
        let result = SiteConfig::from_str(config_str);

        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.build.pages, PathBuf::from("fragments"));
        assert_eq!(config.build.output, PathBuf::from("www"));
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let invalid_config = r#"
            [build
            output = "www"
        "#;
        let result = SiteConfig::from_str(invalid_config);

        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_empty() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.build.output, PathBuf::from("dist"));
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.build.pages, PathBuf::from("src/pages"));
        assert!(config.build.clean);
    }

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/already/absolute");
        assert_eq!(SiteConfig::normalize_path(path), PathBuf::from("/already/absolute"));
    }

    #[test]
    fn test_normalize_path_relative() {
        let normalized = SiteConfig::normalize_path(Path::new("some/relative/dir"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("some/relative/dir"));
    }

    #[test]
    fn test_validate_missing_pages_dir() {
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("weft.toml");
        fs::write(&config_path, "").unwrap();
        fs::write(dir.path().join("template.html"), "{{content}}").unwrap();

        let mut config = SiteConfig::default();
        config.config_path = config_path;
        config.build.pages = dir.path().join("missing-pages");
        config.build.template = dir.path().join("template.html");

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[build.pages]"));
    }

    #[test]
    fn test_validate_missing_template() {
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("weft.toml");
        fs::write(&config_path, "").unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();

        let mut config = SiteConfig::default();
        config.config_path = config_path;
        config.build.pages = dir.path().join("pages");
        config.build.template = dir.path().join("missing.html");

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[build.template]"));
    }

    #[test]
    fn test_validate_ok() {
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("weft.toml");
        fs::write(&config_path, "").unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("template.html"), "{{content}}").unwrap();

        let mut config = SiteConfig::default();
        config.config_path = config_path;
        config.build.pages = dir.path().join("pages");
        config.build.template = dir.path().join("template.html");

        assert!(config.validate().is_ok());
    }
}
