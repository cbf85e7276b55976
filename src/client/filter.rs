//! Home-page filter state and visible-set computation.
//!
//! The visible card list is always recomputed from scratch: the full article
//! set filtered through the current state, then handed to the renderer which
//! replaces the whole grid. No incremental diffing — the lists are small and
//! full replacement keeps the logic trivially correct.

use crate::types::ArticleSummary;

/// The three active filters. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Free-text query, matched case-insensitively against title and excerpt.
    pub query: String,
    /// Exact theme selection.
    pub theme: String,
    /// Exact subtheme selection.
    pub subtheme: String,
}

impl FilterState {
    /// Update the free-text query (surrounding whitespace stripped, as the
    /// search input does).
    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
    }

    /// Select a theme. The available subtheme options change with the theme,
    /// so a subtheme selection that is no longer offered is cleared.
    pub fn select_theme(&mut self, articles: &[ArticleSummary], theme: &str) {
        self.theme = theme.to_string();
        if !subtheme_options(articles, &self.theme).contains(&self.subtheme) {
            self.subtheme.clear();
        }
    }

    pub fn select_subtheme(&mut self, subtheme: &str) {
        self.subtheme = subtheme.to_string();
    }

    /// Whether one article passes all three filters (conjunction).
    pub fn matches(&self, article: &ArticleSummary) -> bool {
        let by_theme = self.theme.is_empty() || article.theme == self.theme;
        let by_subtheme = self.subtheme.is_empty() || article.subtheme == self.subtheme;
        let query = self.query.to_lowercase();
        let by_text = query.is_empty()
            || article.title.to_lowercase().contains(&query)
            || article.excerpt.to_lowercase().contains(&query);
        by_theme && by_subtheme && by_text
    }
}

/// The visible article set for the current filter state, in listing order.
pub fn visible<'a>(articles: &'a [ArticleSummary], state: &FilterState) -> Vec<&'a ArticleSummary> {
    articles.iter().filter(|a| state.matches(a)).collect()
}

/// Distinct themes across all articles, sorted, for the theme select.
pub fn theme_options(articles: &[ArticleSummary]) -> Vec<String> {
    let mut themes: Vec<String> = articles.iter().map(|a| a.theme.clone()).collect();
    themes.sort();
    themes.dedup();
    themes
}

/// Distinct subthemes offered for a theme selection: subthemes of articles
/// in the selected theme, or of all articles when no theme is selected.
pub fn subtheme_options(articles: &[ArticleSummary], theme: &str) -> Vec<String> {
    let mut subthemes: Vec<String> = articles
        .iter()
        .filter(|a| theme.is_empty() || a.theme == theme)
        .map(|a| a.subtheme.clone())
        .collect();
    subthemes.sort();
    subthemes.dedup();
    subthemes
}
