//! Rendering a finished report as text or JSON.

use std::fmt::Write as _;

use crate::error::Error;
use crate::types::{Finding, Report};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Serialized report, pretty-printed.
    Json,
    /// Human-readable sections.
    Text,
}

/// Render a report in the requested format.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
pub fn render(report: &Report, format: Format) -> Result<String, Error> {
    return match format {
        Format::Json => render_json(report),
        Format::Text => Ok(render_text(report)),
    };
}

/// Serialize the report as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
pub fn render_json(report: &Report) -> Result<String, Error> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    return Ok(out);
}

/// Plain-text report: header, missing files, missing fragments, summary.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Link check report for: {}", report.root.display());
    let _ = writeln!(
        out,
        "Checked {} HTML files, {} local links (skipped externals).",
        report.documents_scanned, report.links_checked
    );
    out.push('\n');

    if report.missing_files.is_empty() {
        out.push_str("No missing file targets found.\n");
    } else {
        out.push_str("Missing file targets:\n");
        write_findings(&mut out, &report.missing_files);
    }

    out.push('\n');
    if report.missing_fragments.is_empty() {
        out.push_str("No missing fragments found.\n");
    } else {
        out.push_str("Missing fragment targets (ids):\n");
        write_findings(&mut out, &report.missing_fragments);
    }

    out.push('\n');
    if report.is_clean() {
        out.push_str("Summary: no issues found.\n");
    } else {
        out.push_str("Summary: issues found.\n");
    }
    return out;
}

/// Append one `- In <source>: ...` line per finding.
fn write_findings(out: &mut String, findings: &[Finding]) {
    for finding in findings {
        let _ = writeln!(
            out,
            "- In {}: link '{}' -> {}",
            finding.source.display(),
            finding.link,
            finding.problem
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::types::Problem;

    fn report() -> Report {
        return Report {
            documents_scanned: 2,
            links_checked: 3,
            missing_files: Vec::new(),
            missing_fragments: Vec::new(),
            root: PathBuf::from("/srv/site"),
        };
    }

    #[test]
    fn clean_report_text() {
        let text = render_text(&report());
        assert_eq!(
            text,
            "\
Link check report for: /srv/site
Checked 2 HTML files, 3 local links (skipped externals).

No missing file targets found.

No missing fragments found.

Summary: no issues found.
"
        );
    }

    #[test]
    fn findings_are_listed_per_section() {
        let mut report = report();
        report.missing_files.push(Finding {
            link: "missing".to_string(),
            problem: Problem::MissingFile { target: PathBuf::from("missing") },
            source: PathBuf::from("index.html"),
        });
        report.missing_fragments.push(Finding {
            link: "#nav".to_string(),
            problem: Problem::MissingFragment { fragment: "nav".to_string(), target: None },
            source: PathBuf::from("blog/post.html"),
        });

        let text = render_text(&report);
        assert!(text.contains("Missing file targets:\n- In index.html: link 'missing' -> missing target missing\n"));
        assert!(text.contains(
            "Missing fragment targets (ids):\n- In blog/post.html: link '#nav' -> missing id 'nav' in same file\n"
        ));
        assert!(text.ends_with("Summary: issues found.\n"));
    }

    #[test]
    fn json_carries_counts_and_findings() {
        let out = render(&report(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["documents_scanned"], 2);
        assert_eq!(value["links_checked"], 3);
        assert_eq!(value["missing_files"].as_array().map(Vec::len), Some(0));
    }
}
