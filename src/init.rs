//! Site initialization module.
//!
//! Creates new site structure with default configuration.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Default config filename
const CONFIG_FILE: &str = "weft.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &[
    "src/pages",
    "src/assets/styles",
    "src/assets/images",
    "public",
];

const STARTER_TEMPLATE: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{{title}}</title>
    <link rel="stylesheet" href="/assets/styles/site.css">
  </head>
  <body>
    <header>
      <a href="{{homeHref}}">Home</a>
      {{langSel}}
    </header>
    <main>
      {{content}}
    </main>
  </body>
</html>
"#;

const STARTER_PAGE: &str = r#"<!--
title: Home
homeHref: /
-->
<h1>Hello from weft</h1>
<p>Edit src/pages/index.html to get started.</p>
"#;

const STARTER_STYLES: &str = "body {\n  max-width: 42rem;\n  margin: 0 auto;\n  font-family: sans-serif;\n}\n";

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `weft init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_starter_files(root)?;
    init_ignored_files(root)?;

    log!("init"; "site created at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `weft init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write the starter template, page and stylesheet
fn init_starter_files(root: &Path) -> Result<()> {
    fs::write(root.join("src/template.html"), STARTER_TEMPLATE)?;
    fs::write(root.join("src/pages/index.html"), STARTER_PAGE)?;
    fs::write(root.join("src/assets/styles/site.css"), STARTER_STYLES)?;
    Ok(())
}

/// Initialize .gitignore and .ignore files with the output directory
fn init_ignored_files(root: &Path) -> Result<()> {
    let content = format!("/{}\n", SiteConfig::default().build.output.display());

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
