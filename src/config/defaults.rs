//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn pages() -> PathBuf {
        "src/pages".into()
    }

    pub fn template() -> PathBuf {
        "src/template.html".into()
    }

    pub fn assets() -> PathBuf {
        "src/assets".into()
    }

    pub fn public() -> PathBuf {
        "public".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }
}
