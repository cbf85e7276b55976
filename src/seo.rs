//! Per-article SEO metadata: meta description, canonical URL, Open Graph /
//! Twitter image tags, and the JSON-LD structured-data block.

use crate::config::SiteConfig;
use crate::template::{html_escape, safe_json};
use crate::types::Article;
use serde_json::json;

/// Fixed description used when an article has no usable excerpt.
pub const DEFAULT_DESCRIPTION: &str =
    "Zen Retraite partage des inspirations pour une retraite active et sereine.";

/// Meta descriptions collapse whitespace and hard-cut at 160 characters:
/// longer text keeps its first 157 characters (trimmed) plus an ellipsis;
/// blank input falls back to [`DEFAULT_DESCRIPTION`].
pub fn meta_description(text: &str) -> String {
    let sanitized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if sanitized.is_empty() {
        return DEFAULT_DESCRIPTION.to_string();
    }
    if sanitized.chars().count() <= 160 {
        return sanitized;
    }
    let cut: String = sanitized.chars().take(157).collect();
    format!("{}…", cut.trim_end())
}

/// Site-relative canonical path for an article (`/articles/<id>/`).
pub fn canonical_path(article_id: &str) -> String {
    format!("/articles/{article_id}/")
}

/// Absolute canonical URL for an article.
pub fn canonical_url(config: &SiteConfig, article_id: &str) -> String {
    format!("{}{}", config.base_url, canonical_path(article_id))
}

/// Open Graph image tags — empty when the article has no image.
pub fn og_image_tags(article: &Article) -> String {
    match article.image.as_deref() {
        Some(image) => format!(
            "<meta property=\"og:image\" content=\"{}\">\n\
             <meta property=\"og:image:alt\" content=\"{}\">",
            html_escape(image),
            html_escape(&article.title)
        ),
        None => String::new(),
    }
}

/// Twitter card image tag — empty when the article has no image.
pub fn twitter_image_tag(article: &Article) -> String {
    match article.image.as_deref() {
        Some(image) => format!(
            r#"<meta name="twitter:image" content="{}">"#,
            html_escape(image)
        ),
        None => String::new(),
    }
}

/// JSON-LD `BlogPosting` script block describing the article.
///
/// `dateModified` prefers `updated_at` and falls back to `created_at`; the
/// image array is only present when the article has one.
pub fn structured_data(
    config: &SiteConfig,
    article: &Article,
    canonical: &str,
    description: &str,
) -> serde_json::Result<String> {
    let mut payload = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": article.title,
        "description": description,
        "datePublished": article.created_at,
        "dateModified": article.updated_at.as_ref().or(article.created_at.as_ref()),
        "mainEntityOfPage": canonical,
        "author": { "@type": "Organization", "name": "Zen Retraite" },
        "publisher": {
            "@type": "Organization",
            "name": "Zen Retraite",
            "logo": {
                "@type": "ImageObject",
                "url": format!("{}/favicon.png", config.base_url),
            },
        },
    });
    if let Some(image) = &article.image {
        payload["image"] = json!([image]);
    }
    Ok(format!(
        r#"<script type="application/ld+json">{}</script>"#,
        safe_json(&payload)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(json: &str) -> Article {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn short_descriptions_pass_through() {
        assert_eq!(meta_description("Une recette simple."), "Une recette simple.");
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(meta_description("  Une \n recette\t simple  "), "Une recette simple");
    }

    #[test]
    fn blank_falls_back_to_default() {
        assert_eq!(meta_description(""), DEFAULT_DESCRIPTION);
        assert_eq!(meta_description("   \n\t "), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn exactly_160_chars_is_untouched() {
        let text = "x".repeat(160);
        assert_eq!(meta_description(&text), text);
    }

    #[test]
    fn long_descriptions_are_cut_at_157_plus_ellipsis() {
        let text = "y".repeat(200);
        let cut = meta_description(&text);
        assert_eq!(cut.chars().count(), 158);
        assert!(cut.ends_with('…'));
        assert!(cut.starts_with(&"y".repeat(157)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        // Multi-byte characters must not split; 200 'é' cut to 157 + ellipsis.
        let text = "é".repeat(200);
        let cut = meta_description(&text);
        assert_eq!(cut.chars().count(), 158);
    }

    #[test]
    fn canonical_urls_join_base_and_path() {
        let config = SiteConfig {
            base_url: "https://example.com".into(),
        };
        assert_eq!(canonical_path("a-1"), "/articles/a-1/");
        assert_eq!(canonical_url(&config, "a-1"), "https://example.com/articles/a-1/");
    }

    #[test]
    fn image_tags_only_when_image_exists() {
        let with = article(r#"{"id": "a", "title": "T", "image": "https://img/x.jpg"}"#);
        assert!(og_image_tags(&with).contains("og:image"));
        assert!(twitter_image_tag(&with).contains("twitter:image"));

        let without = article(r#"{"id": "a", "title": "T"}"#);
        assert_eq!(og_image_tags(&without), "");
        assert_eq!(twitter_image_tag(&without), "");
    }

    #[test]
    fn structured_data_describes_the_post() {
        let config = SiteConfig::default();
        let a = article(
            r#"{"id": "a", "title": "T", "image": "https://img/x.jpg",
                "created_at": "2025-01-01T00:00:00Z"}"#,
        );
        let block = structured_data(&config, &a, "https://example.com/articles/a/", "desc").unwrap();
        assert!(block.starts_with(r#"<script type="application/ld+json">"#));
        assert!(block.contains(r#""@type":"BlogPosting""#));
        assert!(block.contains(r#""headline":"T""#));
        assert!(block.contains(r#""datePublished":"2025-01-01T00:00:00Z""#));
        // No updated_at: dateModified falls back to created_at.
        assert!(block.contains(r#""dateModified":"2025-01-01T00:00:00Z""#));
        assert!(block.contains(r#""image":["https://img/x.jpg"]"#));
    }

    #[test]
    fn structured_data_without_image_has_no_image_array() {
        let config = SiteConfig::default();
        let a = article(r#"{"id": "a", "title": "T"}"#);
        let block = structured_data(&config, &a, "https://x/articles/a/", "d").unwrap();
        assert!(!block.contains(r#""image""#));
    }
}
