//! The check command: index the site, validate, print the report.

use std::path::Path;
use std::process::ExitCode;

use crate::error;
use crate::report::{self, Format};
use crate::site::Site;
use crate::types::Report;
use crate::validator::Validator;

/// Run one full check of the site under `root` and print the report to stdout.
///
/// Exit code: 0 when clean, 1 when any finding exists.
///
/// # Errors
///
/// Returns precondition errors for an unusable site root, or `Error::Json`
/// if the report cannot be serialized.
pub fn check(root: &Path, format: Format) -> Result<ExitCode, error::Error> {
    let report = run(root)?;
    let rendered = report::render(&report, format)?;
    print!("{rendered}");

    return Ok(ExitCode::from(report.outcome().exit_code()));
}

/// Build the site context and validate every document.
/// Every fragment set is indexed before the first reference is checked.
///
/// # Errors
///
/// Returns `Error::SiteRootNotFound` or `Error::SiteRootNotDirectory` before
/// any scanning happens.
pub fn run(root: &Path) -> Result<Report, error::Error> {
    let site = Site::open(root)?;
    return Ok(Validator::new(&site).run());
}
