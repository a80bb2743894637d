// src/source.rs
//! Where listing documents come from.
//!
//! The pipeline only sees `DocumentSource`. `DirSource` reads one JSON file per
//! listing from a directory; `MemorySource` holds documents built in code.

use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::consts::{LISTING_KINDS, PUBLISHED_STATUS};
use crate::data::SourceDocument;
use crate::error::{FeedError, Result};

pub trait DocumentSource {
    /// Published listing documents, in a stable order.
    fn list_documents(&self) -> Result<Vec<SourceDocument>>;

    /// Image URLs attached to document `id` outside its body.
    fn attached_images(&self, id: u64) -> Result<Vec<String>>;
}

/* ---------------- Directory of JSON files ---------------- */

/// On-disk shape of one listing file.
///
/// ```json
/// { "id": 12, "title": "2017 Chevrolet Equinox LT", "content": "<p>…</p>",
///   "status": "publish", "kind": "listing", "attachments": ["https://…/1.jpg"] }
/// ```
#[derive(Debug, Deserialize)]
struct DocumentFile {
    #[serde(flatten)]
    doc: SourceDocument,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default = "default_kind")]
    kind: String,
    #[serde(default)]
    attachments: Vec<String>,
}

fn default_status() -> String { s!(PUBLISHED_STATUS) }
fn default_kind() -> String { s!(LISTING_KINDS[0]) }

impl DocumentFile {
    fn is_eligible(&self) -> bool {
        self.status == PUBLISHED_STATUS && LISTING_KINDS.contains(&self.kind.as_str())
    }
}

pub struct DirSource {
    dir: PathBuf,
    attachments: RefCell<HashMap<u64, Vec<String>>>,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), attachments: RefCell::new(HashMap::new()) }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `*.json` files directly under the directory, sorted by file name.
    fn json_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| FeedError::io(&self.dir, e))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
            .collect();
        files.sort();
        Ok(files)
    }

    fn read_file(path: &Path) -> Result<DocumentFile> {
        let text = fs::read_to_string(path).map_err(|e| FeedError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| FeedError::Document { path: path.to_path_buf(), source })
    }
}

impl DocumentSource for DirSource {
    fn list_documents(&self) -> Result<Vec<SourceDocument>> {
        let mut docs = Vec::new();
        let mut attachments = self.attachments.borrow_mut();
        attachments.clear();

        for path in self.json_files()? {
            let file = match Self::read_file(&path) {
                Ok(f) => f,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable document");
                    continue;
                }
            };
            if !file.is_eligible() {
                debug!(path = %path.display(), status = %file.status, kind = %file.kind, "not published, skipped");
                continue;
            }
            attachments.insert(file.doc.id, file.attachments);
            docs.push(file.doc);
        }

        debug!(dir = %self.dir.display(), count = docs.len(), "documents listed");
        Ok(docs)
    }

    fn attached_images(&self, id: u64) -> Result<Vec<String>> {
        self.attachments
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| FeedError::Source(format!("no document with id {id} in {}", self.dir.display())))
    }
}

/* ---------------- In memory ---------------- */

#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    pub documents: Vec<SourceDocument>,
    pub attachments: HashMap<u64, Vec<String>>,
}

impl MemorySource {
    pub fn new(documents: Vec<SourceDocument>) -> Self {
        Self { documents, attachments: HashMap::new() }
    }

    pub fn with_attachments(mut self, id: u64, urls: Vec<String>) -> Self {
        self.attachments.insert(id, urls);
        self
    }
}

impl DocumentSource for MemorySource {
    fn list_documents(&self) -> Result<Vec<SourceDocument>> {
        Ok(self.documents.clone())
    }

    fn attached_images(&self, id: u64) -> Result<Vec<String>> {
        Ok(self.attachments.get(&id).cloned().unwrap_or_default())
    }
}
