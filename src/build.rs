//! Page building and build orchestration.
//!
//! Stage 2 of the pipeline: take the loaded articles and manifests and write
//! the static site.
//!
//! ## Output Structure
//!
//! ```text
//! out/
//! ├── index.html               # Home page (cards + embedded JSON payload)
//! ├── archive.html             # Archive listing
//! ├── sitemap.xml
//! └── articles/
//!     ├── 2025-11-01-1/
//!     │   └── index.html       # One directory per article id
//!     └── 2025-10-30-1/
//!         └── index.html
//! ```
//!
//! The `articles/` directory is removed and recreated on every run, so stale
//! pages from deleted articles cannot linger and rebuilding unchanged input
//! reproduces identical output.
//!
//! ## Concurrency
//!
//! Article pages are written in parallel with rayon: each page renders from
//! immutable shared data and writes to a distinct path, so there is no
//! shared mutable state to coordinate. The sitemap is written strictly after
//! the fan-in, once the final sorted article list is known. Any template
//! load, manifest, or write failure is fatal; per-article and per-archive
//! lookup failures are collected as warnings and the item is skipped.

use crate::config::SiteConfig;
use crate::dates::{date_stamp, format_date_fr, sort_newest_first};
use crate::load::{self, LoadError};
use crate::render::{archive_item, article_card, ImageLoading, LinkStyle};
use crate::seo;
use crate::sitemap::build_sitemap;
use crate::template::{html_escape, safe_json, Template};
use crate::types::{ArchiveEntry, Article, ArticleSummary};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Loading template '{path}': {err}")]
    Template {
        path: PathBuf,
        err: std::io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Writing '{path}': {err}")]
    Write {
        path: PathBuf,
        err: std::io::Error,
    },
}

/// Input and output locations for one build run.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    /// Data root: `articles/`, `archive.json`, optional `site.toml`.
    pub data_dir: PathBuf,
    /// Directory holding `home.html`, `archive.html`, `article-page.html`.
    pub templates_dir: PathBuf,
    /// Site output root.
    pub output_dir: PathBuf,
}

impl BuildPaths {
    pub fn articles_data_dir(&self) -> PathBuf {
        self.data_dir.join("articles")
    }
    pub fn index_manifest(&self) -> PathBuf {
        self.articles_data_dir().join("index.json")
    }
    pub fn archive_manifest(&self) -> PathBuf {
        self.data_dir.join("archive.json")
    }
}

/// What one build run produced.
#[derive(Debug)]
pub struct BuildSummary {
    pub home_count: usize,
    pub archive_count: usize,
    pub article_count: usize,
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
struct HomePayload<'a> {
    articles: &'a [ArticleSummary],
}

#[derive(Serialize)]
struct ArchivePayload<'a> {
    entries: &'a [ArchiveEntry],
}

#[derive(Serialize)]
struct ArticlePayload<'a> {
    id: &'a str,
    title: &'a str,
    theme: &'a str,
    subtheme: &'a str,
    created_at: Option<&'a str>,
    image: Option<&'a str>,
    content: &'a str,
    excerpt: &'a str,
    url: String,
}

fn load_template(dir: &Path, name: &str) -> Result<Template, BuildError> {
    let path = dir.join(name);
    let source = fs::read_to_string(&path).map_err(|err| BuildError::Template {
        path: path.clone(),
        err,
    })?;
    Ok(Template::new(source))
}

fn write_page(path: &Path, contents: &str) -> Result<(), BuildError> {
    fs::write(path, contents).map_err(|err| BuildError::Write {
        path: path.to_path_buf(),
        err,
    })
}

/// Build the whole site: home, archive, per-article pages, sitemap.
pub fn build_site(config: &SiteConfig, paths: &BuildPaths) -> Result<BuildSummary, BuildError> {
    let home_template = load_template(&paths.templates_dir, "home.html")?;
    let archive_template = load_template(&paths.templates_dir, "archive.html")?;
    let article_template = load_template(&paths.templates_dir, "article-page.html")?;

    let mut set = load::load_articles(&paths.articles_data_dir())?;
    let mut warnings = std::mem::take(&mut set.warnings);

    let index = load::load_index(&paths.index_manifest())?;
    let (mut home_articles, home_warnings) = load::select_for_home(&index, &set.by_id);
    warnings.extend(home_warnings);
    sort_newest_first(&mut home_articles);

    let (mut archive_entries, archive_warnings) =
        load::load_archive_entries(&paths.archive_manifest(), &set.by_id);
    warnings.extend(archive_warnings);
    sort_newest_first(&mut archive_entries);

    let mut all_articles: Vec<Article> = set.by_id.into_values().collect();
    sort_newest_first(&mut all_articles);

    fs::create_dir_all(&paths.output_dir)?;

    build_home(&home_template, &home_articles, &paths.output_dir)?;
    build_archive(&archive_template, &archive_entries, &paths.output_dir)?;
    build_article_pages(config, &article_template, &all_articles, &paths.output_dir)?;

    // Fan-in point: every article page is on disk before the sitemap, which
    // depends on the final sorted list.
    let home_newest = home_articles
        .first()
        .and_then(|a| date_stamp(a.created_at.as_deref()));
    let archive_newest = archive_entries
        .first()
        .and_then(|e| date_stamp(e.created_at.as_deref()));
    let xml = build_sitemap(config, &all_articles, home_newest, archive_newest);
    write_page(&paths.output_dir.join("sitemap.xml"), &xml)?;

    Ok(BuildSummary {
        home_count: home_articles.len(),
        archive_count: archive_entries.len(),
        article_count: all_articles.len(),
        warnings,
    })
}

fn build_home(
    template: &Template,
    articles: &[Article],
    output_dir: &Path,
) -> Result<(), BuildError> {
    let summaries: Vec<ArticleSummary> = articles.iter().map(Article::summary).collect();
    let cards = summaries
        .iter()
        .enumerate()
        .map(|(i, s)| article_card(s, i, LinkStyle::StaticPage, ImageLoading::Eager))
        .collect::<Vec<_>>()
        .join("\n");

    let payload = safe_json(&HomePayload {
        articles: &summaries,
    })?;
    let mut values = BTreeMap::new();
    values.insert("HOME_ARTICLE_LIST", cards);
    values.insert(
        "HOME_EMPTY_STATE_ATTR",
        if articles.is_empty() { "" } else { "hidden" }.to_string(),
    );
    values.insert(
        "HOME_DATA_SCRIPT",
        format!(r#"<script id="zr-home-data" type="application/json">{payload}</script>"#),
    );

    write_page(&output_dir.join("index.html"), &template.render(&values))
}

fn build_archive(
    template: &Template,
    entries: &[ArchiveEntry],
    output_dir: &Path,
) -> Result<(), BuildError> {
    let items = entries
        .iter()
        .map(|e| archive_item(e, LinkStyle::StaticPage))
        .collect::<Vec<_>>()
        .join("\n");

    let payload = safe_json(&ArchivePayload { entries })?;
    let mut values = BTreeMap::new();
    values.insert("ARCHIVE_LIST", items);
    values.insert(
        "ARCHIVE_EMPTY_STATE_ATTR",
        if entries.is_empty() { "" } else { "hidden" }.to_string(),
    );
    values.insert(
        "ARCHIVE_DATA_SCRIPT",
        format!(r#"<script id="zr-archive-data" type="application/json">{payload}</script>"#),
    );

    write_page(&output_dir.join("archive.html"), &template.render(&values))
}

fn build_article_pages(
    config: &SiteConfig,
    template: &Template,
    articles: &[Article],
    output_dir: &Path,
) -> Result<(), BuildError> {
    let articles_dir = output_dir.join("articles");
    match fs::remove_dir_all(&articles_dir) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }
    fs::create_dir_all(&articles_dir)?;

    // Fan-out: each page renders from immutable data and writes to its own
    // directory, so completion order is irrelevant.
    articles
        .par_iter()
        .map(|article| {
            let dir = articles_dir.join(&article.id);
            fs::create_dir_all(&dir)?;
            let html = render_article_page(config, template, article)?;
            write_page(&dir.join("index.html"), &html)
        })
        .collect::<Result<Vec<()>, BuildError>>()?;

    Ok(())
}

fn render_article_page(
    config: &SiteConfig,
    template: &Template,
    article: &Article,
) -> Result<String, BuildError> {
    let canonical_path = seo::canonical_path(&article.id);
    let canonical = seo::canonical_url(config, &article.id);
    let description = seo::meta_description(&article.excerpt);

    let image_block = match article.image.as_deref() {
        Some(image) => format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            html_escape(image),
            html_escape(&article.title)
        ),
        None => String::new(),
    };

    let payload = safe_json(&ArticlePayload {
        id: &article.id,
        title: &article.title,
        theme: &article.theme,
        subtheme: &article.subtheme,
        created_at: article.created_at.as_deref(),
        image: article.image.as_deref(),
        content: &article.content,
        excerpt: &article.excerpt,
        url: canonical_path,
    })?;

    let mut values = BTreeMap::new();
    values.insert("ARTICLE_TITLE", html_escape(&article.title));
    values.insert("ARTICLE_DESCRIPTION", html_escape(&description));
    values.insert("ARTICLE_CANONICAL_URL", html_escape(&canonical));
    values.insert("ARTICLE_OG_IMAGE_TAGS", seo::og_image_tags(article));
    values.insert("ARTICLE_TWITTER_IMAGE_TAG", seo::twitter_image_tag(article));
    values.insert(
        "ARTICLE_STRUCTURED_DATA",
        seo::structured_data(config, article, &canonical, &description)?,
    );
    values.insert(
        "ARTICLE_PUBLISHED_ISO",
        html_escape(article.created_at.as_deref().unwrap_or("")),
    );
    values.insert(
        "ARTICLE_PUBLISHED_HUMAN",
        html_escape(&format_date_fr(article.created_at.as_deref())),
    );
    values.insert(
        "ARTICLE_THEME",
        html_escape(if article.theme.is_empty() {
            crate::render::DEFAULT_THEME
        } else {
            &article.theme
        }),
    );
    values.insert(
        "ARTICLE_SUBTHEME",
        html_escape(if article.subtheme.is_empty() {
            crate::render::DEFAULT_SUBTHEME
        } else {
            &article.subtheme
        }),
    );
    values.insert("ARTICLE_IMAGE_BLOCK", image_block);
    // Trusted HTML body: the one field that is deliberately not escaped.
    values.insert("ARTICLE_CONTENT", article.content.clone());
    values.insert(
        "ARTICLE_DATA_SCRIPT",
        format!(r#"<script id="zr-article-data" type="application/json">{payload}</script>"#),
    );

    Ok(template.render(&values))
}
