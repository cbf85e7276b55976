//! Sitemap generation.
//!
//! One `<url>` entry for the home page, the archive page, and every article.
//! Pure function of the already-sorted article list — no additional reads.
//! Page types carry fixed change-frequency hints and priorities: home is
//! hourly/1.0, archive daily/0.9, articles weekly/0.8.

use crate::config::SiteConfig;
use crate::dates::{date_stamp, today_stamp};
use crate::template::html_escape;
use crate::types::Article;

struct SitemapUrl {
    loc: String,
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
}

impl SitemapUrl {
    fn to_xml(&self) -> String {
        format!(
            "<url>\n    \
             <loc>{}</loc>\n    \
             <lastmod>{}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    \
             <priority>{}</priority>\n  \
             </url>",
            html_escape(&self.loc),
            self.lastmod,
            self.changefreq,
            self.priority
        )
    }
}

/// Render `sitemap.xml`.
///
/// `home_newest` and `archive_newest` are the date stamps of the newest home
/// and archive entries; a missing stamp (empty listing, no usable timestamp)
/// falls back to today's date, as does an article without one.
pub fn build_sitemap(
    config: &SiteConfig,
    articles: &[Article],
    home_newest: Option<String>,
    archive_newest: Option<String>,
) -> String {
    let today = today_stamp();
    let mut urls = vec![
        SitemapUrl {
            loc: format!("{}/", config.base_url),
            lastmod: home_newest.unwrap_or_else(|| today.clone()),
            changefreq: "hourly",
            priority: "1.0",
        },
        SitemapUrl {
            loc: format!("{}/archive.html", config.base_url),
            lastmod: archive_newest.unwrap_or_else(|| today.clone()),
            changefreq: "daily",
            priority: "0.9",
        },
    ];

    for article in articles {
        urls.push(SitemapUrl {
            loc: format!("{}/articles/{}/", config.base_url, article.id),
            lastmod: date_stamp(article.created_at.as_deref()).unwrap_or_else(|| today.clone()),
            changefreq: "weekly",
            priority: "0.8",
        });
    }

    let entries = urls
        .iter()
        .map(SitemapUrl::to_xml)
        .collect::<Vec<_>>()
        .join("\n\n  ");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n  \
         {entries}\n\
         </urlset>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, created_at: Option<&str>) -> Article {
        serde_json::from_str(&format!(
            r#"{{"id": "{id}", "created_at": {}}}"#,
            match created_at {
                Some(ts) => format!(r#""{ts}""#),
                None => "null".to_string(),
            }
        ))
        .unwrap()
    }

    #[test]
    fn fixed_priorities_per_page_type() {
        let config = SiteConfig::default();
        let articles = vec![article("a", Some("2025-01-01T00:00:00Z"))];
        let xml = build_sitemap(&config, &articles, Some("2025-01-01".into()), None);

        let home_pos = xml.find("<priority>1.0</priority>").unwrap();
        let archive_pos = xml.find("<priority>0.9</priority>").unwrap();
        let article_pos = xml.find("<priority>0.8</priority>").unwrap();
        assert!(home_pos < archive_pos && archive_pos < article_pos);
    }

    #[test]
    fn article_locations_use_base_url() {
        let config = SiteConfig {
            base_url: "https://example.com".into(),
        };
        let articles = vec![article("a-1", Some("2025-03-05T10:00:00Z"))];
        let xml = build_sitemap(&config, &articles, None, None);
        assert!(xml.contains("<loc>https://example.com/articles/a-1/</loc>"));
        assert!(xml.contains("<lastmod>2025-03-05</lastmod>"));
    }

    #[test]
    fn missing_timestamps_fall_back_to_today() {
        let config = SiteConfig::default();
        let articles = vec![article("a", None)];
        let xml = build_sitemap(&config, &articles, None, None);
        assert!(xml.contains(&format!("<lastmod>{}</lastmod>", today_stamp())));
    }

    #[test]
    fn changefreq_hints() {
        let config = SiteConfig::default();
        let xml = build_sitemap(&config, &[], None, None);
        assert!(xml.contains("<changefreq>hourly</changefreq>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(!xml.contains("<changefreq>weekly</changefreq>"));
    }

    #[test]
    fn well_formed_envelope() {
        let config = SiteConfig::default();
        let xml = build_sitemap(&config, &[], None, None);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.ends_with("</urlset>\n"));
    }
}
