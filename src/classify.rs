//! Sorting raw references into external, same-document, and local links.

use percent_encoding::percent_decode_str;

/// Prefixes of references that point outside the site and are never checked.
const EXTERNAL_PREFIXES: [&str; 4] = ["http://", "https://", "//", "mailto:"];

/// Parsed from a raw `href`/`src` value by [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Absolute URL, protocol-relative URL, or `mailto:`.
    External,
    /// A file reference relative to the document or the site root.
    Local {
        /// Fragment after `#`, if one was given and is non-empty.
        fragment: Option<&'a str>,
        /// Percent-decoded path with query string removed. Never empty.
        path: String,
    },
    /// A reference into the referencing document itself. An empty fragment
    /// always resolves.
    SameDocument {
        /// Identifier after `#`, possibly empty.
        fragment: &'a str,
    },
}

/// Classify a raw reference string.
///
/// Local references are split on the first `#`, the query string is dropped
/// from the path, and the path is percent-decoded. A reference whose path ends
/// up empty (`?page=2#top`) points at the document itself.
pub fn classify(raw: &str) -> LinkKind<'_> {
    if EXTERNAL_PREFIXES.iter().any(|prefix| return raw.starts_with(prefix)) {
        return LinkKind::External;
    }

    if let Some(fragment) = raw.strip_prefix('#') {
        return LinkKind::SameDocument { fragment };
    }

    let (path_and_query, fragment) = raw.split_once('#').unwrap_or((raw, ""));
    let raw_path = path_and_query
        .split_once('?')
        .map_or(path_and_query, |(path, _query)| return path);
    let path = percent_decode_str(raw_path).decode_utf8_lossy().into_owned();

    if path.is_empty() {
        return LinkKind::SameDocument { fragment };
    }

    return LinkKind::Local {
        fragment: Some(fragment).filter(|f| return !f.is_empty()),
        path,
    };
}
