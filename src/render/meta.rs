//! Page metadata extraction.
//!
//! A page fragment may begin with a single HTML comment block encoding
//! per-page properties:
//!
//! ```html
//! <!--
//! title: Getting Started
//! langSel: <a href="/de/">DE</a>
//! -->
//! <p>body markup...</p>
//! ```
//!
//! [`extract`] splits such a fragment into a [`Metadata`] mapping and the
//! remaining body. Files without a leading block (or with an unterminated
//! one) pass through untouched with an empty mapping.

use regex::Regex;
use std::sync::LazyLock;

/// Leading comment block: anchored at offset 0, non-greedy up to the first
/// `-->`, plus the whitespace run that follows it.
static BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<!--([\s\S]*?)-->\s*").unwrap());

/// A `key: value` line inside the block. Keys are case-sensitive
/// identifiers; the value may be empty.
static KEY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([a-zA-Z0-9_-]+)\s*:\s*(.*)$").unwrap());

// ============================================================================
// Metadata
// ============================================================================

/// Insertion-ordered string-to-string mapping parsed from a metadata block.
///
/// Keys are case-sensitive. [`insert`](Self::insert) overwrites the value of
/// an existing key in place, so within one block the last occurrence wins.
/// Equality compares entries including their order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Look up a key, returning its value if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert a key, overwriting the value of an existing entry.
    pub fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => self.entries.push((key.to_owned(), value.to_owned())),
        }
    }

    /// Append a continuation line to an existing key's value, separated by
    /// a newline. Missing keys are ignored.
    fn append_line(&mut self, key: &str, line: &str) {
        if let Some((_, v)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            v.push('\n');
            v.push_str(line);
        }
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Split a page fragment into its metadata block and body.
///
/// The block must start at the very beginning of `raw`; anything else (no
/// comment, comment preceded by content, unterminated comment) yields an
/// empty mapping and the input unchanged. On a match, the block and the
/// whitespace following it are stripped from the returned body.
///
/// Line handling inside the block:
/// - `key: value` starts a new entry and becomes the current key
/// - any other line is appended to the current key's value with a `\n`
///   separator, untrimmed
/// - lines before the first key are dropped
pub fn extract(raw: &str) -> (Metadata, &str) {
    let Some(caps) = BLOCK.captures(raw) else {
        return (Metadata::default(), raw);
    };

    let matched_len = caps.get(0).map_or(0, |m| m.end());
    let block = caps.get(1).map_or("", |m| m.as_str()).trim();

    let mut meta = Metadata::default();
    let mut current: Option<String> = None;

    for line in block.lines() {
        if let Some(kv) = KEY_LINE.captures(line) {
            meta.insert(&kv[1], &kv[2]);
            current = Some(kv[1].to_owned());
        } else if let Some(key) = current.as_deref() {
            meta.append_line(key, line);
        }
    }

    (meta, &raw[matched_len..])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected-value builder: insertion order matters for equality.
    fn metadata(pairs: &[(&str, &str)]) -> Metadata {
        let mut meta = Metadata::default();
        for (k, v) in pairs {
            meta.insert(k, v);
        }
        meta
    }

    // ------------------------------------------------------------------------
    // extract: block matching
    // ------------------------------------------------------------------------

    #[test]
    fn test_no_block_passes_through() {
        let raw = "<p>plain body</p>";
        let (meta, content) = extract(raw);

        assert_eq!(meta, Metadata::default());
        assert_eq!(content, raw);
    }

    #[test]
    fn test_comment_not_at_start_is_content() {
        let raw = " <!--\ntitle: X\n-->\nbody";
        let (meta, content) = extract(raw);

        assert_eq!(meta, Metadata::default());
        assert_eq!(content, raw);
    }

    #[test]
    fn test_unterminated_block_is_content() {
        let raw = "<!--\ntitle: X\nbody continues forever";
        let (meta, content) = extract(raw);

        assert_eq!(meta, Metadata::default());
        assert_eq!(content, raw);
    }

    #[test]
    fn test_empty_block() {
        let (meta, content) = extract("<!-- -->\n<p>Hi</p>");

        assert_eq!(meta, Metadata::default());
        assert_eq!(content, "<p>Hi</p>");
    }

    #[test]
    fn test_block_and_trailing_whitespace_stripped() {
        let (meta, content) = extract("<!--\ntitle: Home\n-->\n\n  \n<p>Hi</p>");

        assert_eq!(meta.get("title"), Some("Home"));
        assert_eq!(content, "<p>Hi</p>");
        assert!(!content.starts_with("<!--"));
    }

    #[test]
    fn test_non_greedy_close() {
        // The matcher stops at the first `-->`; a second comment stays in
        // the body
        let (meta, content) = extract("<!--\ntitle: A\n-->\n<!-- note -->rest");

        assert_eq!(meta.get("title"), Some("A"));
        assert_eq!(content, "<!-- note -->rest");
    }

    #[test]
    fn test_block_consumes_whole_file() {
        let (meta, content) = extract("<!--\ntitle: Only\n-->");

        assert_eq!(meta.get("title"), Some("Only"));
        assert_eq!(content, "");
    }

    // ------------------------------------------------------------------------
    // extract: line scanning
    // ------------------------------------------------------------------------

    #[test]
    fn test_key_value_lines() {
        let (meta, _) = extract("<!--\ntitle: Home\nhomeHref: /en/\n-->\nbody");

        assert_eq!(meta, metadata(&[("title", "Home"), ("homeHref", "/en/")]));
    }

    #[test]
    fn test_empty_value_is_present() {
        let (meta, _) = extract("<!--\nlangSel:\n-->\nbody");

        // An empty value is distinct from an absent key
        assert_eq!(meta.get("langSel"), Some(""));
        assert_eq!(meta.get("title"), None);
    }

    #[test]
    fn test_continuation_line_appends() {
        let (meta, _) = extract("<!--\nlangSel: <a>EN</a>\n<a>DE</a>\n-->\nbody");

        assert_eq!(meta.get("langSel"), Some("<a>EN</a>\n<a>DE</a>"));
    }

    #[test]
    fn test_continuation_preserves_leading_whitespace() {
        let (meta, _) = extract("<!--\nnote: first\n  indented second\n-->\n");

        assert_eq!(meta.get("note"), Some("first\n  indented second"));
    }

    #[test]
    fn test_line_before_first_key_dropped() {
        let (meta, _) = extract("<!--\nstray line without key\ntitle: Home\n-->\n");

        assert_eq!(meta, metadata(&[("title", "Home")]));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let (meta, _) = extract("<!--\ntitle: A\nlangSel: x\ntitle: B\n-->\n");

        // The overwritten entry keeps its original position
        assert_eq!(meta, metadata(&[("title", "B"), ("langSel", "x")]));
    }

    #[test]
    fn test_duplicate_key_then_continuation() {
        let (meta, _) = extract("<!--\ntitle: A\ntitle: B\nmore\n-->\n");

        assert_eq!(meta.get("title"), Some("B\nmore"));
    }

    #[test]
    fn test_value_may_contain_colon() {
        let (meta, _) = extract("<!--\nhomeHref: https://example.com/\n-->\n");

        assert_eq!(meta.get("homeHref"), Some("https://example.com/"));
    }

    #[test]
    fn test_key_with_space_is_continuation() {
        // "not a" cannot be a key, so the line continues `title`
        let (meta, _) = extract("<!--\ntitle: Home\nnot a: key line\n-->\n");

        assert_eq!(meta.get("title"), Some("Home\nnot a: key line"));
        assert_eq!(meta.get("not a"), None);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let (meta, _) = extract("<!--\nTitle: A\ntitle: B\n-->\n");

        assert_eq!(meta.get("Title"), Some("A"));
        assert_eq!(meta.get("title"), Some("B"));
    }

    #[test]
    fn test_crlf_lines() {
        let (meta, content) = extract("<!--\r\ntitle: Home\r\nextra\r\n-->\r\nbody");

        assert_eq!(meta.get("title"), Some("Home\nextra"));
        assert_eq!(content, "body");
    }

    #[test]
    fn test_key_with_surrounding_whitespace() {
        let (meta, _) = extract("<!--\n  title  :  spaced  \n-->\n");

        assert_eq!(meta.get("title"), Some("spaced  "));
    }

    // ------------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------------

    #[test]
    fn test_metadata_insert_overwrites_in_place() {
        let mut meta = Metadata::default();
        meta.insert("a", "1");
        meta.insert("b", "2");
        meta.insert("a", "3");

        assert_eq!(meta.get("a"), Some("3"));
        // Order is preserved from first insertion
        assert_eq!(meta, metadata(&[("a", "3"), ("b", "2")]));
    }

    #[test]
    fn test_extract_preserves_insertion_order() {
        let (meta, _) = extract("<!--\nz: 1\na: 2\nm: 3\n-->\n");

        assert_eq!(meta, metadata(&[("z", "1"), ("a", "2"), ("m", "3")]));
        assert_ne!(meta, metadata(&[("a", "2"), ("m", "3"), ("z", "1")]));
    }
}
