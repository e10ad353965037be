//! The per-run context: site root plus every document, loaded up front.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::scanner;
use crate::types::Document;

/// Every HTML document under a site root with its content and fragment set.
///
/// Construction reads and indexes all documents before returning, so a
/// `Site` in hand means the fragment pre-pass is complete. Nothing is
/// recomputed or mutated afterwards.
#[derive(Debug)]
pub struct Site {
    /// Documents in discovery order.
    documents: Vec<Document>,
    /// Document path -> position in `documents`.
    index: HashMap<PathBuf, usize>,
    /// Canonical site root.
    root: PathBuf,
}

impl Site {
    /// Check the site root, discover its documents, and index them all.
    ///
    /// # Errors
    ///
    /// Returns `Error::SiteRootNotFound` or `Error::SiteRootNotDirectory` when
    /// the root is unusable, or `Error::Io` if it cannot be canonicalized.
    pub fn open(root: &Path) -> Result<Self, Error> {
        if !root.exists() {
            return Err(Error::SiteRootNotFound { path: root.to_path_buf() });
        }
        if !root.is_dir() {
            return Err(Error::SiteRootNotDirectory { path: root.to_path_buf() });
        }

        let root = root.canonicalize()?;
        let documents = scanner::discover(&root)
            .iter()
            .map(PathBuf::as_path)
            .map(scanner::load_document)
            .collect();

        return Ok(Self::from_documents(root, documents));
    }

    /// Build a context from documents that are already loaded.
    pub fn from_documents(root: PathBuf, documents: Vec<Document>) -> Self {
        let index = documents
            .iter()
            .enumerate()
            .map(|(position, doc)| return (doc.path.clone(), position))
            .collect();

        return Self { documents, index, root };
    }

    /// Path shown in reports: relative to the site root when inside it.
    pub fn display_path(&self, path: &Path) -> PathBuf {
        return path
            .strip_prefix(&self.root)
            .map_or_else(|_outside| return path.to_path_buf(), Path::to_path_buf);
    }

    /// Documents in discovery order.
    pub fn documents(&self) -> &[Document] {
        return &self.documents;
    }

    /// Fragment set of a scanned document, or `None` if `path` is not one.
    pub fn fragments_of(&self, path: &Path) -> Option<&HashSet<String>> {
        let position = *self.index.get(path)?;
        return self.documents.get(position).map(|doc| return &doc.fragments);
    }

    /// Canonical site root every run-relative path is shown against.
    pub fn root(&self) -> &Path {
        return &self.root;
    }
}
