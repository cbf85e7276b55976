//! Client-side page logic, modeled as explicit state and pure functions.
//!
//! The generated pages embed their data as JSON and defer interactivity to a
//! small script. The behavior of that script lives here as plain Rust:
//! filter state and visible-set computation ([`filter`]), two-tier data
//! access with an embedded fallback dataset ([`data`]), and light/dark theme
//! resolution ([`theme`]). The browser glue (DOM nodes, event listeners,
//! viewport observation) stays outside; these modules only decide *what* to
//! render, never *how* to touch the document.

pub mod data;
pub mod filter;
pub mod theme;

/// User-visible message when a whole listing fails to load.
pub const HOME_LOAD_ERROR: &str =
    "Impossible de charger les articles. Merci de réessayer plus tard.";
/// User-visible message when a single article fails to load.
pub const ARTICLE_LOAD_ERROR: &str = "Impossible de charger cet article.";
/// User-visible message when the archive fails to load.
pub const ARCHIVE_LOAD_ERROR: &str = "Impossible de charger les archives.";

/// Which behavior a page gets, selected by the document's `data-page`
/// attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Article,
    Archive,
}

impl Page {
    /// Parse the `data-page` attribute value. Unknown or missing values get
    /// no page behavior at all.
    pub fn from_attr(value: &str) -> Option<Page> {
        match value {
            "home" => Some(Page::Home),
            "article" => Some(Page::Article),
            "archive" => Some(Page::Archive),
            _ => None,
        }
    }
}

/// Extract the `id` query parameter from a URL query string (with or
/// without the leading `?`). Used by the article page to pick which article
/// to display.
pub fn article_id_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == "id" && !value.is_empty() {
            return Some(percent_decode(value));
        }
    }
    None
}

/// Minimal percent-decoding for slug-shaped ids (`%XX` sequences and `+`).
/// Invalid sequences pass through unchanged.
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 3 <= bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                let hi = (bytes[i + 1] as char).to_digit(16).unwrap_or(0) as u8;
                let lo = (bytes[i + 2] as char).to_digit(16).unwrap_or(0) as u8;
                out.push(hi * 16 + lo);
                i += 3;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_dispatch_from_data_page_attr() {
        assert_eq!(Page::from_attr("home"), Some(Page::Home));
        assert_eq!(Page::from_attr("article"), Some(Page::Article));
        assert_eq!(Page::from_attr("archive"), Some(Page::Archive));
        assert_eq!(Page::from_attr(""), None);
        assert_eq!(Page::from_attr("contact"), None);
    }

    #[test]
    fn id_extracted_from_query() {
        assert_eq!(
            article_id_from_query("?id=2025-11-01-1"),
            Some("2025-11-01-1".to_string())
        );
        assert_eq!(
            article_id_from_query("utm=x&id=abc"),
            Some("abc".to_string())
        );
        assert_eq!(article_id_from_query("?id="), None);
        assert_eq!(article_id_from_query(""), None);
        assert_eq!(article_id_from_query("?other=1"), None);
    }

    #[test]
    fn id_is_percent_decoded() {
        assert_eq!(
            article_id_from_query("?id=a%2Db+c"),
            Some("a-b c".to_string())
        );
        // Broken escape passes through.
        assert_eq!(article_id_from_query("?id=a%2"), Some("a%2".to_string()));
    }
}
