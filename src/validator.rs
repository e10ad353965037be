//! Validation pass: check every reference of every document against the site.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::classify::{LinkKind, classify};
use crate::resolver::{self, Resolution};
use crate::scanner;
use crate::site::Site;
use crate::types::{Document, Finding, Problem, Report};

/// Result of checking one reference.
#[derive(Debug, PartialEq, Eq)]
enum LinkCheck {
    /// The reference is broken.
    Failed(Problem),
    /// The reference was checked and resolves.
    Passed,
    /// External or empty; not checked and not counted.
    Skipped,
}

/// Walks a fully indexed [`Site`] and accumulates a [`Report`].
///
/// Only accepts a `Site`, which has already indexed every document, so
/// references to documents later in the walk order see their fragments.
pub struct Validator<'s> {
    /// Fragment sets for `.html` targets outside the scanned set, filled on
    /// demand. The site's own index is never touched.
    overflow: HashMap<PathBuf, HashSet<String>>,
    /// Indexed site being validated.
    site: &'s Site,
}

impl<'s> Validator<'s> {
    /// Validator over an opened site with an empty overflow cache.
    pub fn new(site: &'s Site) -> Self {
        return Self {
            overflow: HashMap::new(),
            site,
        };
    }

    /// Check all documents in discovery order and build the report.
    pub fn run(mut self) -> Report {
        let site = self.site;
        let mut report = Report {
            documents_scanned: site.documents().len(),
            links_checked: 0,
            missing_files: Vec::new(),
            missing_fragments: Vec::new(),
            root: site.root().to_path_buf(),
        };

        for doc in site.documents() {
            self.check_document(doc, &mut report);
        }

        tracing::info!(
            documents = report.documents_scanned,
            links = report.links_checked,
            issues = report.issue_count(),
            "validation complete"
        );
        return report;
    }

    /// Check every reference in one document, counting checked links and
    /// filing each failure under its report section.
    fn check_document(&mut self, doc: &Document, report: &mut Report) {
        let links = scanner::extract_links(&doc.content);
        tracing::debug!(path = %doc.path.display(), links = links.len(), "checking document");

        for raw in links {
            let problem = match self.check_link(doc, raw) {
                LinkCheck::Skipped => continue,
                LinkCheck::Passed => None,
                LinkCheck::Failed(problem) => Some(problem),
            };
            report.links_checked = report.links_checked.saturating_add(1);

            let Some(problem) = problem else {
                continue;
            };
            let is_missing_file = matches!(problem, Problem::MissingFile { .. });
            let finding = Finding {
                link: raw.to_string(),
                problem,
                source: self.site.display_path(&doc.path),
            };
            if is_missing_file {
                report.missing_files.push(finding);
            } else {
                report.missing_fragments.push(finding);
            }
        }
    }

    /// Classify one raw reference and check it if it is local.
    fn check_link(&mut self, doc: &Document, raw: &str) -> LinkCheck {
        if raw.is_empty() {
            return LinkCheck::Skipped;
        }

        return match classify(raw) {
            LinkKind::External => LinkCheck::Skipped,
            LinkKind::SameDocument { fragment } => check_fragment(&doc.fragments, fragment, None),
            LinkKind::Local { fragment, path } => self.check_local(doc, &path, fragment),
        };
    }

    /// Resolve a local path against the document, then check its fragment.
    fn check_local(&mut self, doc: &Document, path: &str, fragment: Option<&str>) -> LinkCheck {
        let site = self.site;
        let candidate = resolver::candidate(site.root(), &doc.path, path);

        let target = match resolver::locate(&candidate) {
            Resolution::Found(target) => target,
            Resolution::Missing(missing) => {
                return LinkCheck::Failed(Problem::MissingFile {
                    target: site.display_path(&missing),
                });
            },
        };

        let Some(fragment) = fragment else {
            return LinkCheck::Passed;
        };
        let Some(fragments) = self.target_fragments(&target) else {
            tracing::debug!(path = %target.display(), fragment, "fragment unverifiable, skipping");
            return LinkCheck::Passed;
        };
        return check_fragment(fragments, fragment, Some(site.display_path(&target)));
    }

    /// Fragment set of a resolved target. Scanned documents come from the
    /// site index; other `.html` files are indexed once on demand. Anything
    /// else cannot carry fragments we understand.
    fn target_fragments(&mut self, target: &Path) -> Option<&HashSet<String>> {
        let site = self.site;
        if let Some(fragments) = site.fragments_of(target) {
            return Some(fragments);
        }

        if !target.is_file() || !scanner::is_document(target) {
            return None;
        }

        let fragments = self
            .overflow
            .entry(target.to_path_buf())
            .or_insert_with(|| return scanner::load_document(target).fragments);
        return Some(fragments);
    }
}

/// An empty fragment always resolves.
fn check_fragment(fragments: &HashSet<String>, fragment: &str, target: Option<PathBuf>) -> LinkCheck {
    if fragment.is_empty() || fragments.contains(fragment) {
        return LinkCheck::Passed;
    }
    return LinkCheck::Failed(Problem::MissingFragment {
        fragment: fragment.to_string(),
        target,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn site_with(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }
        return dir;
    }

    fn check(root: &Path) -> Report {
        let site = Site::open(root).unwrap();
        return Validator::new(&site).run();
    }

    #[test]
    fn declared_same_document_fragments_pass() {
        let dir = site_with(&[(
            "index.html",
            r##"<h1 id="top">x</h1><a name="old"></a><a href="#top"></a><a href="#old"></a><a href="#"></a>"##,
        )]);
        let report = check(dir.path());
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.links_checked, 3);
    }

    #[test]
    fn undeclared_same_document_fragment_is_one_finding() {
        let dir = site_with(&[("index.html", r##"<a href="#nowhere">x</a>"##)]);
        let report = check(dir.path());
        assert!(report.missing_files.is_empty());
        assert_eq!(report.missing_fragments.len(), 1);

        let finding = &report.missing_fragments[0];
        assert_eq!(finding.source, PathBuf::from("index.html"));
        assert_eq!(finding.link, "#nowhere");
        assert_eq!(
            finding.problem,
            Problem::MissingFragment { fragment: "nowhere".to_string(), target: None }
        );
    }

    #[test]
    fn externals_are_neither_checked_nor_counted() {
        let dir = site_with(&[(
            "index.html",
            r#"<a href="http://a.example/x"></a><a href="https://b.example"></a>
               <script src="//cdn.example/lib.js"></script><a href="mailto:me@example.com"></a>"#,
        )]);
        let report = check(dir.path());
        assert!(report.is_clean());
        assert_eq!(report.links_checked, 0);
        assert_eq!(report.documents_scanned, 1);
    }

    #[test]
    fn cross_document_fragment_scenario() {
        let dir = site_with(&[
            ("index.html", r#"<a href="about.html#team">About</a>"#),
            ("about.html", r#"<h2 id="team">Team</h2>"#),
        ]);
        let report = check(dir.path());
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.links_checked, 1);

        std::fs::write(dir.path().join("about.html"), r#"<h2 id="crew">Crew</h2>"#).unwrap();
        let report = check(dir.path());
        assert!(report.missing_files.is_empty());
        assert_eq!(report.missing_fragments.len(), 1);
        assert_eq!(report.missing_fragments[0].link, "about.html#team");
        assert_eq!(
            report.missing_fragments[0].problem,
            Problem::MissingFragment {
                fragment: "team".to_string(),
                target: Some(PathBuf::from("about.html")),
            }
        );

        std::fs::remove_file(dir.path().join("about.html")).unwrap();
        let report = check(dir.path());
        assert!(report.missing_fragments.is_empty());
        assert_eq!(report.missing_files.len(), 1);
        assert_eq!(
            report.missing_files[0].problem,
            Problem::MissingFile { target: PathBuf::from("about.html") }
        );
    }

    #[test]
    fn forward_references_see_later_documents() {
        // `a/` sorts before `z.html`, so the link is checked before its target is visited.
        let dir = site_with(&[
            ("a/first.html", r#"<a href="../z.html#end">z</a>"#),
            ("z.html", r#"<footer id="end"></footer>"#),
        ]);
        assert!(check(dir.path()).is_clean());
    }

    #[test]
    fn clean_urls_fall_back_to_html() {
        let dir = site_with(&[
            ("index.html", r#"<a href="about">About</a><a href="missing">Gone</a>"#),
            ("about.html", ""),
        ]);
        let report = check(dir.path());
        assert!(report.missing_fragments.is_empty());
        assert_eq!(report.missing_files.len(), 1);
        assert_eq!(report.missing_files[0].link, "missing");
        assert_eq!(
            report.missing_files[0].problem,
            Problem::MissingFile { target: PathBuf::from("missing") }
        );
    }

    #[test]
    fn clean_url_fragments_check_the_suffixed_document() {
        let dir = site_with(&[
            ("index.html", r#"<a href="about#team"></a><a href="about#crew"></a>"#),
            ("about.html", r#"<h2 id="team"></h2>"#),
        ]);
        let report = check(dir.path());
        assert_eq!(report.missing_fragments.len(), 1);
        assert_eq!(report.missing_fragments[0].link, "about#crew");
    }

    #[test]
    fn root_relative_links_resolve_from_site_root() {
        let dir = site_with(&[
            ("blog/post.html", r#"<img src="/assets/logo.png"><img src="assets/logo.png">"#),
            ("assets/logo.png", "png"),
        ]);
        let report = check(dir.path());
        assert_eq!(report.missing_files.len(), 1);
        assert_eq!(report.missing_files[0].link, "assets/logo.png");
        assert_eq!(
            report.missing_files[0].problem,
            Problem::MissingFile { target: PathBuf::from("blog/assets/logo.png") }
        );
    }

    #[test]
    fn fragments_in_non_html_targets_are_unverifiable() {
        let dir = site_with(&[
            ("index.html", r#"<a href="guide.pdf#page=4"></a><a href="blog/#latest"></a>"#),
            ("guide.pdf", "%PDF"),
            ("blog/post.html", ""),
        ]);
        assert!(check(dir.path()).is_clean());
    }

    #[test]
    fn html_targets_outside_the_root_are_indexed_on_demand() {
        let outer = site_with(&[
            ("site/index.html", r#"<a href="../shared.html#ok"></a><a href="../shared.html#bad"></a>"#),
            ("shared.html", r#"<div id="ok"></div>"#),
        ]);
        let report = check(&outer.path().join("site"));
        assert_eq!(report.missing_fragments.len(), 1);
        assert_eq!(report.missing_fragments[0].link, "../shared.html#bad");
    }

    #[test]
    fn query_strings_and_encoding_are_handled() {
        let dir = site_with(&[
            ("index.html", r#"<a href="my%20page.html?ref=nav#intro"></a><a href="?page=2"></a>"#),
            ("my page.html", r#"<p id="intro"></p>"#),
        ]);
        let report = check(dir.path());
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.links_checked, 2);
    }

    #[test]
    fn unreadable_documents_still_count_as_scanned() {
        let dir = site_with(&[("index.html", r#"<a href="a.html"></a>"#)]);
        let root = dir.path().canonicalize().unwrap();
        let documents = vec![
            scanner::load_document(&root.join("index.html")),
            scanner::load_document(&root.join("vanished.html")),
        ];
        let site = Site::from_documents(root, documents);
        let report = Validator::new(&site).run();
        assert_eq!(report.documents_scanned, 2);
        assert_eq!(report.missing_files.len(), 1);
    }

    #[test]
    fn reruns_produce_identical_reports() {
        let dir = site_with(&[
            ("index.html", r##"<a href="x.html"></a><a href="#y"></a><a href="/z"></a>"##),
            ("blog/post.html", r#"<a href="../index.html#q"></a>"#),
        ]);
        assert_eq!(check(dir.path()), check(dir.path()));
    }
}
