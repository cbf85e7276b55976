//! HTML fragment builders shared by the build pipeline and the client logic.
//!
//! The same card and archive-item markup appears in two places: prerendered
//! into the static pages at build time, and rebuilt by the client when the
//! filter state changes. Keeping one renderer for both means the prerendered
//! page and the first client render cannot drift apart.
//!
//! The two contexts differ only in link style (static pages link straight to
//! `articles/<id>/index.html`, the client viewer uses `article.html?id=`)
//! and in how images load (prerendered cards carry an eager `src` plus the
//! lazy `data-src`; client cards defer entirely to `data-src`, swapped onto
//! the element when it enters the viewport, or immediately when viewport
//! intersection detection is unavailable).

use crate::dates::{format_date_fr, parse_timestamp};
use crate::template::html_escape;
use crate::types::{ArchiveEntry, ArticleSummary};

/// Fallback labels for articles without classification.
pub const DEFAULT_THEME: &str = "Inspiration";
pub const DEFAULT_SUBTHEME: &str = "Découverte";

/// How a fragment links to an article page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkStyle {
    /// `./articles/<id>/index.html` — prerendered static pages.
    StaticPage,
    /// `./article.html?id=<id>` — the client-side article viewer.
    QueryParam,
}

impl LinkStyle {
    fn article_href(&self, id: &str) -> String {
        match self {
            LinkStyle::StaticPage => format!("./articles/{}/index.html", html_escape(id)),
            LinkStyle::QueryParam => format!("./article.html?id={}", html_escape(id)),
        }
    }
}

/// How a card image loads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageLoading {
    /// Real `src` plus `data-src`, for prerendered pages.
    Eager,
    /// `data-src` only; the client swaps it in on viewport entry. Without
    /// intersection detection the swap happens immediately.
    Deferred { observer_available: bool },
}

fn card_image(article: &ArticleSummary, loading: ImageLoading) -> String {
    let Some(image) = article.image.as_deref() else {
        return String::new();
    };
    let src = html_escape(image);
    let alt = html_escape(&article.title);
    match loading {
        ImageLoading::Eager => {
            format!(r#"<img src="{src}" data-src="{src}" alt="{alt}" loading="lazy">"#)
        }
        ImageLoading::Deferred {
            observer_available: true,
        } => format!(r#"<img data-src="{src}" alt="{alt}" loading="lazy">"#),
        ImageLoading::Deferred {
            observer_available: false,
        } => format!(r#"<img src="{src}" alt="{alt}" loading="lazy">"#),
    }
}

/// Render one article card.
///
/// `index` staggers the entry animation (0.06s per card position).
pub fn article_card(
    article: &ArticleSummary,
    index: usize,
    link: LinkStyle,
    loading: ImageLoading,
) -> String {
    let delay = format!("{:.2}", index as f64 * 0.06);
    let image_html = card_image(article, loading);
    let theme = if article.theme.is_empty() {
        DEFAULT_THEME
    } else {
        &article.theme
    };
    let subtheme = if article.subtheme.is_empty() {
        DEFAULT_SUBTHEME
    } else {
        &article.subtheme
    };
    let href = link.article_href(&article.id);
    format!(
        "<article class=\"card\" style=\"animation-delay: {delay}s\">\n\
         {image_html}\n\
         <div class=\"card-content\">\n\
         <div class=\"card-meta\"><span>{theme}</span><span>{subtheme}</span></div>\n\
         <h2 class=\"card-title\">{title}</h2>\n\
         <p class=\"card-excerpt\">{excerpt}</p>\n\
         <a href=\"{href}\">Lire la suite</a>\n\
         </div>\n\
         </article>",
        theme = html_escape(theme),
        subtheme = html_escape(subtheme),
        title = html_escape(&article.title),
        excerpt = html_escape(&article.excerpt),
    )
}

/// Render one archive list item. Entries with no resolvable title degrade to
/// `Article <id>`; the `<time>` block only appears for valid timestamps.
pub fn archive_item(entry: &ArchiveEntry, link: LinkStyle) -> String {
    let title = entry
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Article {}", entry.id));
    let time_block = match entry.created_at.as_deref() {
        Some(iso) if parse_timestamp(iso).is_some() => format!(
            r#"<time dateTime="{}">{}</time>"#,
            html_escape(iso),
            html_escape(&format_date_fr(Some(iso)))
        ),
        _ => String::new(),
    };
    let href = entry
        .url
        .clone()
        .unwrap_or_else(|| link.article_href(&entry.id));
    format!(
        "<li>\n\
           <div>{title}</div>\n\
           <div>\n\
             {time_block}\n\
             <a href=\"{href}\">Lire</a>\n\
           </div>\n\
         </li>",
        title = html_escape(&title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, title: &str, image: Option<&str>) -> ArticleSummary {
        ArticleSummary {
            id: id.to_string(),
            title: title.to_string(),
            excerpt: "Un extrait".to_string(),
            theme: "Cuisine".to_string(),
            subtheme: "Soupes".to_string(),
            image: image.map(String::from),
            created_at: Some("2025-11-01T08:00:00Z".to_string()),
            url: format!("./articles/{id}/index.html"),
        }
    }

    #[test]
    fn card_has_staggered_delay() {
        let card = article_card(
            &summary("a", "T", None),
            3,
            LinkStyle::StaticPage,
            ImageLoading::Eager,
        );
        assert!(card.contains("animation-delay: 0.18s"));
    }

    #[test]
    fn eager_card_image_has_src_and_data_src() {
        let card = article_card(
            &summary("a", "T", Some("https://img/x.jpg")),
            0,
            LinkStyle::StaticPage,
            ImageLoading::Eager,
        );
        assert!(card.contains(r#"src="https://img/x.jpg" data-src="https://img/x.jpg""#));
    }

    #[test]
    fn deferred_card_image_has_data_src_only() {
        let card = article_card(
            &summary("a", "T", Some("https://img/x.jpg")),
            0,
            LinkStyle::QueryParam,
            ImageLoading::Deferred {
                observer_available: true,
            },
        );
        assert!(card.contains(r#"<img data-src="https://img/x.jpg""#));
        assert!(!card.contains(r#"src="https://img/x.jpg" data-src"#));
    }

    #[test]
    fn deferred_without_observer_loads_immediately() {
        let card = article_card(
            &summary("a", "T", Some("https://img/x.jpg")),
            0,
            LinkStyle::QueryParam,
            ImageLoading::Deferred {
                observer_available: false,
            },
        );
        assert!(card.contains(r#"<img src="https://img/x.jpg" alt="T""#));
        assert!(!card.contains("data-src"));
    }

    #[test]
    fn card_without_image_has_no_img_tag() {
        let card = article_card(
            &summary("a", "T", None),
            0,
            LinkStyle::StaticPage,
            ImageLoading::Eager,
        );
        assert!(!card.contains("<img"));
    }

    #[test]
    fn empty_classification_falls_back_to_defaults() {
        let mut article = summary("a", "T", None);
        article.theme = String::new();
        article.subtheme = String::new();
        let card = article_card(&article, 0, LinkStyle::StaticPage, ImageLoading::Eager);
        assert!(card.contains("<span>Inspiration</span><span>Découverte</span>"));
    }

    #[test]
    fn card_escapes_title_and_excerpt() {
        let mut article = summary("a", "Velouté <script>", None);
        article.excerpt = "l'automne & l'hiver".to_string();
        let card = article_card(&article, 0, LinkStyle::StaticPage, ImageLoading::Eager);
        assert!(card.contains("Velouté &lt;script&gt;"));
        assert!(card.contains("l&#39;automne &amp; l&#39;hiver"));
    }

    #[test]
    fn link_styles_produce_distinct_hrefs() {
        let article = summary("a-1", "T", None);
        let page = article_card(&article, 0, LinkStyle::StaticPage, ImageLoading::Eager);
        assert!(page.contains(r#"href="./articles/a-1/index.html""#));
        let client = article_card(
            &article,
            0,
            LinkStyle::QueryParam,
            ImageLoading::Deferred {
                observer_available: true,
            },
        );
        assert!(client.contains(r#"href="./article.html?id=a-1""#));
    }

    #[test]
    fn archive_item_with_full_entry() {
        let entry = ArchiveEntry {
            id: "x".to_string(),
            title: Some("T".to_string()),
            created_at: Some("2025-01-01T00:00:00Z".to_string()),
            url: Some("./articles/x/index.html".to_string()),
        };
        let li = archive_item(&entry, LinkStyle::StaticPage);
        assert!(li.contains("<div>T</div>"));
        assert!(li.contains(r#"<time dateTime="2025-01-01T00:00:00Z">1 janvier 2025</time>"#));
        assert!(li.contains(r#"<a href="./articles/x/index.html">Lire</a>"#));
    }

    #[test]
    fn archive_item_degrades_to_id_placeholder() {
        let entry = ArchiveEntry {
            id: "ghost".to_string(),
            title: None,
            created_at: None,
            url: None,
        };
        let li = archive_item(&entry, LinkStyle::QueryParam);
        assert!(li.contains("<div>Article ghost</div>"));
        assert!(!li.contains("<time"));
        assert!(li.contains(r#"href="./article.html?id=ghost""#));
    }

    #[test]
    fn archive_item_skips_time_for_invalid_timestamp() {
        let entry = ArchiveEntry {
            id: "x".to_string(),
            title: Some("T".to_string()),
            created_at: Some("pas une date".to_string()),
            url: None,
        };
        let li = archive_item(&entry, LinkStyle::StaticPage);
        assert!(!li.contains("<time"));
    }
}
