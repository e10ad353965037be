//! Document discovery, link extraction, and fragment indexing over raw markup.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::types::Document;

/// File extension of documents that take part in a run.
pub const DOCUMENT_EXTENSION: &str = "html";

/// `id=` / `name=` preceded by a word boundary, either quote style.
#[allow(clippy::expect_used, reason = "hardcoded pattern, checked by tests")]
static FRAGMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r#"(?i)\b(?:id|name)\s*=\s*['"]([^'"]+)['"]"#).expect("valid regex");
});

/// `href=` / `src=` with either quote style. No word boundary, so `data-src=`
/// is picked up as well.
#[allow(clippy::expect_used, reason = "hardcoded pattern, checked by tests")]
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r#"(?i)(?:href|src)\s*=\s*['"]([^'"]+)['"]"#).expect("valid regex");
});

/// Find every HTML document under `root`, recursively.
///
/// Entries are sorted by file name within each directory so the order is
/// stable across runs. Symlinked files count as documents; symlinked
/// directories are not descended into. Unreadable entries are skipped.
pub fn discover(root: &Path) -> Vec<PathBuf> {
    let documents: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| return e.path().is_file())
        .filter(|e| return is_document(e.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();

    tracing::info!(count = documents.len(), root = %root.display(), "discovered documents");
    return documents;
}

/// Whether a path carries the document extension.
pub fn is_document(path: &Path) -> bool {
    return path.extension().is_some_and(|ext| return ext == DOCUMENT_EXTENSION);
}

/// Read a document and index its fragments.
///
/// An unreadable file degrades to empty content rather than failing the run.
pub fn load_document(path: &Path) -> Document {
    let content = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable document, treating as empty");
            String::new()
        },
    };
    let fragments = extract_fragments(&content);
    tracing::trace!(path = %path.display(), fragments = fragments.len(), "indexed document");

    return Document {
        content,
        fragments,
        path: path.to_path_buf(),
    };
}

/// Identifiers declared through `id` or `name` attributes.
///
/// Values are taken verbatim; duplicates collapse.
///
/// # Panics
///
/// Panics if the hardcoded fragment regex is invalid (compile-time invariant).
pub fn extract_fragments(content: &str) -> HashSet<String> {
    return FRAGMENT_PATTERN
        .captures_iter(content)
        .filter_map(|cap| return cap.get(1))
        .map(|m| return m.as_str().to_string())
        .collect();
}

/// Raw `href`/`src` attribute values in the order they appear.
///
/// Unterminated or empty values are not matched.
///
/// # Panics
///
/// Panics if the hardcoded link regex is invalid (compile-time invariant).
pub fn extract_links(content: &str) -> Vec<&str> {
    return LINK_PATTERN
        .captures_iter(content)
        .filter_map(|cap| return cap.get(1))
        .map(|m| return m.as_str())
        .collect();
}
