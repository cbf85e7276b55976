//! `{{PLACEHOLDER}}` template rendering and output escaping.
//!
//! Templates are plain HTML files containing `{{NAME}}` tokens. Rendering is
//! a single pass over the template text: each token is replaced by its mapped
//! value, or by the empty string when no value is provided. Substituted
//! values are never re-scanned, so a value containing `{{...}}` passes
//! through literally — there is deliberately no recursive expansion.

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder regex"))
}

/// A parsed page template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Template {
            source: source.into(),
        }
    }

    /// Substitute every `{{NAME}}` token. Total: unknown tokens render as
    /// empty, and the literal token never survives into the output.
    pub fn render(&self, values: &BTreeMap<&str, String>) -> String {
        placeholder_regex()
            .replace_all(&self.source, |caps: &Captures| {
                values.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}

/// Escape a value for interpolation into HTML text or attributes.
pub fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Serialize a payload for embedding inside a `<script>` block. `<` is
/// escaped as `\u003C` so the payload can never close the surrounding tag.
pub fn safe_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003C"))
}
