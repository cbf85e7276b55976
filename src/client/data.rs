//! Two-tier client data access: try the network, fall back to an embedded
//! sample dataset.
//!
//! Pages opened straight from the filesystem (no server) cannot fetch the
//! JSON data files, which would leave the demo pages blank. A [`DataSource`]
//! built for local viewing therefore answers a failed fetch from the
//! embedded dataset — but only for the three resource shapes it knows (home
//! manifest, archive manifest, a specific article). Any other failure
//! propagates as the original typed error.
//!
//! The network itself sits behind the [`Fetch`] trait so the whole data
//! layer is testable with scripted fetchers.

use crate::dates::sort_newest_first;
use crate::types::{normalize_image, ArchiveEntry, ArchiveManifest, Article, RawArchiveEntry};
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

/// Resource paths, relative to the page, as the generated site lays them out.
pub const INDEX_PATH: &str = "./data/articles/index.json";
pub const ARCHIVE_PATH: &str = "./data/archive.json";

pub fn article_path(id: &str) -> String {
    format!("./data/articles/{id}.json")
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Http(u16),
    #[error("network unavailable: {0}")]
    Network(String),
    #[error("invalid JSON payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The network seam: path in, parsed JSON out.
pub trait Fetch {
    fn fetch_json(&self, path: &str) -> Result<Value, FetchError>;
}

fn fallback_data() -> &'static Value {
    static FALLBACK: OnceLock<Value> = OnceLock::new();
    FALLBACK.get_or_init(|| {
        serde_json::from_str(include_str!("fallback.json")).expect("embedded fallback parses")
    })
}

/// Fallback payload for a known resource shape, if the path matches one.
fn fallback_for(path: &str) -> Option<Value> {
    let data = fallback_data();
    if path.ends_with("index.json") {
        return Some(data["index"].clone());
    }
    if path.ends_with("archive.json") {
        return Some(data["archive"].clone());
    }
    if path.contains("/data/articles/") {
        let id = path.rsplit('/').next()?.trim_end_matches(".json");
        return data["articles"].get(id).cloned();
    }
    None
}

/// Two-tier data source: remote first, embedded fallback second.
pub struct DataSource<F> {
    fetcher: F,
    /// True when the page is being viewed without a server (`file://`);
    /// only then does the fallback dataset engage.
    local: bool,
}

impl<F: Fetch> DataSource<F> {
    pub fn new(fetcher: F, local: bool) -> Self {
        DataSource { fetcher, local }
    }

    fn fetch(&self, path: &str) -> Result<Value, FetchError> {
        match self.fetcher.fetch_json(path) {
            Ok(value) => Ok(value),
            Err(err) => {
                if self.local
                    && let Some(value) = fallback_for(path)
                {
                    return Ok(value);
                }
                Err(err)
            }
        }
    }

    /// The home manifest: ordered article ids.
    pub fn index(&self) -> Result<Vec<String>, FetchError> {
        Ok(serde_json::from_value(self.fetch(INDEX_PATH)?)?)
    }

    /// The raw archive manifest entries (both accepted shapes).
    pub fn archive(&self) -> Result<Vec<RawArchiveEntry>, FetchError> {
        let manifest: ArchiveManifest = serde_json::from_value(self.fetch(ARCHIVE_PATH)?)?;
        Ok(manifest.into_entries())
    }

    /// One article by id, with its image field normalized.
    pub fn article(&self, id: &str) -> Result<Article, FetchError> {
        let mut article: Article = serde_json::from_value(self.fetch(&article_path(id))?)?;
        article.image = normalize_image(article.image.take());
        Ok(article)
    }

    /// Load the home listing: every article from the manifest, newest first.
    /// Individual article failures are skipped, not fatal — only a missing
    /// manifest fails the whole listing.
    pub fn home_articles(&self) -> Result<Vec<Article>, FetchError> {
        let ids = self.index()?;
        let mut articles: Vec<Article> = ids
            .iter()
            .filter_map(|id| self.article(id).ok())
            .collect();
        sort_newest_first(&mut articles);
        Ok(articles)
    }
}

/// Resolve the archive manifest for display, newest first.
///
/// Bare id entries fetch their article for title and date, degrading to an
/// id-only placeholder when that fetch fails; object entries pass through
/// as-is; entries with no id are dropped.
pub fn resolve_archive_entries<F: Fetch>(
    source: &DataSource<F>,
) -> Result<Vec<ArchiveEntry>, FetchError> {
    let raw = source.archive()?;
    let mut entries = Vec::new();
    for entry in raw {
        match entry {
            RawArchiveEntry::Id(id) => {
                let (title, created_at) = match source.article(&id) {
                    Ok(article) => (Some(article.title), article.created_at),
                    Err(_) => (None, None),
                };
                entries.push(ArchiveEntry {
                    id,
                    title,
                    created_at,
                    url: None,
                });
            }
            RawArchiveEntry::Entry {
                id: Some(id),
                title,
                created_at,
            } => entries.push(ArchiveEntry {
                id,
                title,
                created_at,
                url: None,
            }),
            RawArchiveEntry::Entry { id: None, .. } => {}
        }
    }
    sort_newest_first(&mut entries);
    Ok(entries)
}
