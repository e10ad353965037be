//! Resolving local reference paths to locations on disk.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::scanner::DOCUMENT_EXTENSION;

/// Outcome of looking a candidate path up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path that exists. May carry an inferred `.html` suffix.
    Found(PathBuf),
    /// Nothing exists. Always the candidate as written, never the suffixed retry.
    Missing(PathBuf),
}

/// Compute where a decoded reference path points.
///
/// Paths starting with `/` are rooted at `root`; everything else is relative
/// to the directory containing `document`. The result is normalized
/// lexically, without touching the filesystem.
pub fn candidate(root: &Path, document: &Path, path: &str) -> PathBuf {
    let joined = if path.starts_with('/') {
        root.join(path.trim_start_matches('/'))
    } else {
        document.parent().unwrap_or(root).join(path)
    };
    return normalize_path(&joined);
}

/// Check a candidate for existence, retrying once with `.html` appended when
/// it has no extension of its own.
pub fn locate(candidate: &Path) -> Resolution {
    if candidate.exists() {
        return Resolution::Found(candidate.to_path_buf());
    }

    if candidate.extension().is_none() {
        let suffixed = with_document_suffix(candidate);
        if suffixed.exists() {
            tracing::debug!(
                from = %candidate.display(),
                to = %suffixed.display(),
                "resolved extensionless link"
            );
            return Resolution::Found(suffixed);
        }
    }

    return Resolution::Missing(candidate.to_path_buf());
}

/// `about` -> `about.html`. Appends rather than replaces, so dotted
/// directory names are left intact.
fn with_document_suffix(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(DOCUMENT_EXTENSION);
    return PathBuf::from(name);
}

/// Collapse `.` and `..` components in a path without touching the filesystem.
/// Never pops past the root; preserves leading `..` on relative paths.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        push_normalized_component(&mut components, component);
    }
    return components.iter().collect();
}

/// Handle a single path component during normalization.
fn push_normalized_component<'a>(components: &mut Vec<Component<'a>>, component: Component<'a>) {
    match component {
        Component::CurDir => {},
        Component::ParentDir => match components.last() {
            Some(Component::Normal(_)) => {
                components.pop();
            },
            Some(Component::RootDir | Component::Prefix(_)) => {},
            Some(Component::CurDir | Component::ParentDir) | None => components.push(component),
        },
        other => components.push(other),
    }
}
