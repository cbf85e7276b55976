//! CLI output formatting.
//!
//! Each surface has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes it out. Format functions
//! are pure — no I/O, no side effects. Warnings go to stderr so a piped
//! stdout stays clean.

use crate::build::BuildSummary;

/// Format the per-surface build report.
///
/// ```text
/// Home      3 articles → index.html
/// Archive   2 entries → archive.html
/// Articles  3 pages → articles/
/// Sitemap   5 locations → sitemap.xml
/// ```
pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    vec![
        format!("Home      {} articles → index.html", summary.home_count),
        format!("Archive   {} entries → archive.html", summary.archive_count),
        format!("Articles  {} pages → articles/", summary.article_count),
        format!(
            "Sitemap   {} locations → sitemap.xml",
            summary.article_count + 2
        ),
    ]
}

/// Format the check report: what a build would produce, without writing.
pub fn format_check_output(article_count: usize, home_count: usize, archive_count: usize) -> Vec<String> {
    vec![
        format!("Articles  {article_count} loaded"),
        format!("Home      {home_count} listed"),
        format!("Archive   {archive_count} entries"),
    ]
}

pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{line}");
    }
}

pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}
