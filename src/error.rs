//! Crate-level error types for sitelinks diagnostics.

use std::path::PathBuf;

/// Failures that stop a run. Missing files and missing fragments are findings
/// in the report, not errors, so they never appear here.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of the report failed.
    #[error("json serialize: {0}")]
    Json(
        /// The wrapped serialization error.
        #[from]
        serde_json::Error,
    ),

    /// The site root exists but is a file, not a directory.
    #[error("site root is not a directory: {}", path.display())]
    SiteRootNotDirectory {
        /// Path given as the site root.
        path: PathBuf,
    },

    /// The site root does not exist on disk.
    #[error("site directory not found: {}", path.display())]
    SiteRootNotFound {
        /// Path given as the site root.
        path: PathBuf,
    },
}

impl Error {
    /// Process exit status for this error.
    /// Precondition failures exit 2; everything else is a runtime error (3).
    pub const fn exit_code(&self) -> u8 {
        return match self {
            Error::SiteRootNotDirectory { .. } | Error::SiteRootNotFound { .. } => 2,
            Error::Io(_) | Error::Json(_) => 3,
        };
    }
}
