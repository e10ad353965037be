//! Markdown rendering of fatal errors on stderr.

use std::path::Path;

use crate::error::Error;

/// ANSI bold, applied to markdown headings.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Directory to suggest as `--root` when the user pointed at a file.
/// A bare file name has an empty parent, which means the current directory.
fn enclosing_directory(path: &Path) -> &Path {
    return path
        .parent()
        .filter(|parent| return !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
}

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened and,
/// where there is one, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::Io(err) => format!("\
# Error: I/O

{err}
"),
        Error::Json(err) => format!("\
# Error: JSON Serialization

{err}
"),
        Error::SiteRootNotDirectory { path } => render_site_root_not_directory(path),
        Error::SiteRootNotFound { path } => render_site_root_not_found(path),
    };
}

/// Diagnostic for a site root that is a file.
fn render_site_root_not_directory(path: &Path) -> String {
    return format!("\
# Error: Site Root Is Not A Directory

`{}` is a file. The site root must be the directory containing the HTML tree.

## Fix

    sitelinks --root {}
", path.display(), enclosing_directory(path).display());
}

/// Diagnostic for a site root that does not exist.
fn render_site_root_not_found(path: &Path) -> String {
    return format!("\
# Error: Site Root Not Found

`{}` does not exist.

## Fix

Run from the site directory, or point at it explicitly:

    sitelinks --root path/to/site
", path.display());
}
