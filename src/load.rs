//! Article and manifest loading.
//!
//! Stage 1 of the build: read every article JSON file, the `index.json` home
//! manifest, and the `archive.json` archive manifest into memory.
//!
//! ## Data Directory Structure
//!
//! ```text
//! data/
//! ├── site.toml                # Optional site config
//! ├── archive.json             # Archive manifest (ids or entry objects)
//! └── articles/
//!     ├── index.json           # Home manifest (ordered ids)
//!     ├── 2025-11-01-1.json    # One article per file
//!     └── 2025-10-30-1.json
//! ```
//!
//! ## Failure Severity
//!
//! The home manifest is load-bearing: missing or malformed `index.json`
//! aborts the build. Everything else degrades: a malformed article file, an
//! article without an id, a manifest id with no matching article, or a
//! broken `archive.json` each produce a warning and the offending item is
//! dropped while the rest of the build proceeds.

use crate::types::{normalize_image, ArchiveEntry, ArchiveManifest, Article, RawArchiveEntry};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Reading home manifest '{path}': {err}")]
    IndexRead {
        path: PathBuf,
        err: std::io::Error,
    },
    #[error("Parsing home manifest '{path}': {err}")]
    IndexParse {
        path: PathBuf,
        err: serde_json::Error,
    },
}

/// The loaded article set: id → article, plus warnings for skipped files.
#[derive(Debug, Default)]
pub struct ArticleSet {
    pub by_id: BTreeMap<String, Article>,
    pub warnings: Vec<String>,
}

/// Load every `*.json` article in `articles_dir` except `index.json`.
///
/// Files that fail to parse or lack an id are skipped with a warning.
/// Image fields are normalized on the way in.
pub fn load_articles(articles_dir: &Path) -> Result<ArticleSet, LoadError> {
    let mut files: Vec<PathBuf> = fs::read_dir(articles_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension().map(|e| e == "json").unwrap_or(false)
                && p.file_name().map(|n| n != "index.json").unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut set = ArticleSet::default();
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                set.warnings.push(format!("skipped {name}: {err}"));
                continue;
            }
        };
        let mut article: Article = match serde_json::from_str(&raw) {
            Ok(article) => article,
            Err(err) => {
                set.warnings
                    .push(format!("skipped {name}: invalid or missing id ({err})"));
                continue;
            }
        };
        if article.id.trim().is_empty() {
            set.warnings.push(format!("skipped {name}: missing id"));
            continue;
        }
        article.image = normalize_image(article.image.take());
        set.by_id.insert(article.id.clone(), article);
    }

    Ok(set)
}

/// Load the home manifest. This one is fatal: without it there is no home
/// page to build.
pub fn load_index(path: &Path) -> Result<Vec<String>, LoadError> {
    let raw = fs::read_to_string(path).map_err(|err| LoadError::IndexRead {
        path: path.to_path_buf(),
        err,
    })?;
    serde_json::from_str(&raw).map_err(|err| LoadError::IndexParse {
        path: path.to_path_buf(),
        err,
    })
}

/// Select home-page articles in manifest order. Unknown ids are warned and
/// skipped, never fatal.
pub fn select_for_home(
    index: &[String],
    articles: &BTreeMap<String, Article>,
) -> (Vec<Article>, Vec<String>) {
    let mut selected = Vec::new();
    let mut warnings = Vec::new();
    for id in index {
        match articles.get(id) {
            Some(article) => selected.push(article.clone()),
            None => warnings.push(format!("home manifest references unknown article '{id}'")),
        }
    }
    (selected, warnings)
}

/// Load and resolve the archive manifest.
///
/// Accepts a bare array or `{"articles": [...]}`; elements are bare ids or
/// `{id, title?, created_at?}` objects, with missing fields backfilled from
/// the loaded articles. A missing or malformed manifest degrades to an empty
/// archive with a warning.
pub fn load_archive_entries(
    path: &Path,
    articles: &BTreeMap<String, Article>,
) -> (Vec<ArchiveEntry>, Vec<String>) {
    let mut warnings = Vec::new();

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warnings.push(format!("could not read archive manifest: {err}"));
            return (Vec::new(), warnings);
        }
    };
    let manifest: ArchiveManifest = match serde_json::from_str(&raw) {
        Ok(manifest) => manifest,
        Err(err) => {
            warnings.push(format!("could not parse archive manifest: {err}"));
            return (Vec::new(), warnings);
        }
    };

    let mut entries = Vec::new();
    for raw_entry in manifest.into_entries() {
        match raw_entry {
            RawArchiveEntry::Id(id) => {
                let article = articles.get(&id);
                if article.is_none() {
                    warnings.push(format!("archive entry '{id}' has no matching article"));
                }
                entries.push(ArchiveEntry {
                    title: article.map(|a| a.title.clone()),
                    created_at: article.and_then(|a| a.created_at.clone()),
                    url: Some(format!("./articles/{id}/index.html")),
                    id,
                });
            }
            RawArchiveEntry::Entry {
                id: Some(id),
                title,
                created_at,
            } => {
                let article = articles.get(&id);
                entries.push(ArchiveEntry {
                    title: title.or_else(|| article.map(|a| a.title.clone())),
                    created_at: created_at.or_else(|| article.and_then(|a| a.created_at.clone())),
                    url: Some(format!("./articles/{id}/index.html")),
                    id,
                });
            }
            RawArchiveEntry::Entry { id: None, .. } => {
                warnings.push("archive entry without id dropped".to_string());
            }
        }
    }

    (entries, warnings)
}
