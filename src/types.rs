//! Shared record types used across the build pipeline and the client logic.
//!
//! These types mirror the JSON files the site is built from (one file per
//! article, plus the `index.json` and `archive.json` manifests) and the JSON
//! payloads embedded into the generated pages, so field names must stay
//! exactly as they appear on disk.

use serde::{Deserialize, Serialize};

/// One blog post record: metadata plus a trusted HTML body.
///
/// Every field except `id` is optional in the source files; absent strings
/// deserialize as empty. Articles without an `id` are rejected by the loader
/// (the id doubles as the URL slug and the sort tie-break).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub subtheme: String,
    /// Normalized by the loader: empty or `"n/a"` become `None`.
    #[serde(default)]
    pub image: Option<String>,
    /// Trusted HTML body — rendered into pages without escaping.
    #[serde(default)]
    pub content: String,
    /// ISO datetime. Missing or unparsable values sort as the epoch.
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    /// Only used by the structured-data block; falls back to `created_at`.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Article {
    /// The listing payload for this article, with its static page URL.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            theme: self.theme.clone(),
            subtheme: self.subtheme.clone(),
            image: self.image.clone(),
            created_at: self.created_at.clone(),
            url: format!("./articles/{}/index.html", self.id),
        }
    }
}

/// The slice of an article embedded in the home page's JSON data script and
/// consumed by the client-side filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub subtheme: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub url: String,
}

/// A resolved archive listing entry.
///
/// `title` and `created_at` are backfilled from the matching [`Article`] when
/// the manifest only carries an id; both stay `None` (serialized as `null`,
/// as the original payload does) when nothing resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub id: String,
    pub title: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The `archive.json` manifest: either a bare array or `{"articles": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ArchiveManifest {
    List(Vec<RawArchiveEntry>),
    Object {
        #[serde(default)]
        articles: Vec<RawArchiveEntry>,
    },
}

impl ArchiveManifest {
    pub fn into_entries(self) -> Vec<RawArchiveEntry> {
        match self {
            ArchiveManifest::List(entries) => entries,
            ArchiveManifest::Object { articles } => articles,
        }
    }
}

/// One unresolved element of the archive manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawArchiveEntry {
    Id(String),
    Entry {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        created_at: Option<String>,
    },
}

/// Normalize an image reference: trims whitespace and maps empty strings and
/// the `"n/a"` placeholder (any case) to "no image".
pub fn normalize_image(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        None
    } else {
        Some(trimmed.to_string())
    }
}
