//! Core domain types for sitelinks documents, findings, and reports.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// An HTML file discovered under the site root. Content and fragment set are
/// computed once per run and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw text of the file, lossy UTF-8. Empty if the file was unreadable.
    pub content: String,
    /// Identifiers declared via `id` or `name` attributes.
    pub fragments: HashSet<String>,
    /// Absolute path of the file.
    pub path: PathBuf,
}

/// One broken reference found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// The reference exactly as written in the markup.
    pub link: String,
    /// What is wrong with it.
    pub problem: Problem,
    /// Document containing the reference, relative to the site root.
    #[serde(serialize_with = "serialize_path_lossy")]
    pub source: PathBuf,
}

/// Verdict of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No findings.
    Clean,
    /// At least one missing file or missing fragment.
    IssuesFound,
}

impl Outcome {
    /// Process exit status for this verdict.
    pub const fn exit_code(self) -> u8 {
        return match self {
            Outcome::Clean => 0,
            Outcome::IssuesFound => 1,
        };
    }
}

/// Why a reference failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Problem {
    /// The target file does not exist, even with `.html` appended.
    MissingFile {
        /// Unsuffixed candidate path that was looked up.
        #[serde(serialize_with = "serialize_path_lossy")]
        target: PathBuf,
    },
    /// The target exists but declares no matching `id`/`name`.
    MissingFragment {
        /// Fragment identifier without the leading `#`.
        fragment: String,
        /// Target document, or `None` for a same-document reference.
        #[serde(serialize_with = "serialize_optional_path_lossy")]
        target: Option<PathBuf>,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Problem::MissingFile { target } => write!(f, "missing target {}", target.display()),
            Problem::MissingFragment { fragment, target: None } => {
                write!(f, "missing id '{fragment}' in same file")
            },
            Problem::MissingFragment { fragment, target: Some(target) } => {
                write!(f, "fragment '{fragment}' not found in {}", target.display())
            },
        };
    }
}

/// Result of a whole run. Built once by the validator, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Number of HTML documents scanned, readable or not.
    pub documents_scanned: usize,
    /// Local and same-document references checked. Externals are excluded.
    pub links_checked: usize,
    /// Findings for targets that do not exist, in discovery then document order.
    pub missing_files: Vec<Finding>,
    /// Findings for fragments that are not declared, in the same order.
    pub missing_fragments: Vec<Finding>,
    /// Site root the run was performed against.
    #[serde(serialize_with = "serialize_path_lossy")]
    pub root: PathBuf,
}

impl Report {
    /// Whether the run found no problems at all.
    pub fn is_clean(&self) -> bool {
        return self.missing_files.is_empty() && self.missing_fragments.is_empty();
    }

    /// Total number of findings across both sections.
    pub fn issue_count(&self) -> usize {
        return self.missing_files.len().saturating_add(self.missing_fragments.len());
    }

    /// Pass/fail verdict, a pure function of the findings.
    pub fn outcome(&self) -> Outcome {
        if self.is_clean() {
            return Outcome::Clean;
        }
        return Outcome::IssuesFound;
    }
}

/// Serialize a path as a string, replacing invalid UTF-8 instead of failing.
/// Site trees can contain any file name; the report must still serialize.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    return serializer.serialize_str(&path.to_string_lossy());
}

/// Optional variant of [`serialize_path_lossy`]; `None` becomes `null`.
#[allow(clippy::ref_option, reason = "signature fixed by serde's serialize_with")]
fn serialize_optional_path_lossy<S: Serializer>(
    path: &Option<PathBuf>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    return match path {
        Some(path) => serializer.serialize_some(&path.to_string_lossy()),
        None => serializer.serialize_none(),
    };
}
