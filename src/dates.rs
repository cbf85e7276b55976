//! Timestamp parsing, formatting, and listing order.
//!
//! Article timestamps are ISO datetimes, but the source files are hand-edited
//! so anything can be missing or malformed. Parsing is therefore total: an
//! unparsable timestamp behaves like a missing one (sorts as the epoch,
//! renders as nothing) rather than failing the build.
//!
//! Every listing surface (home, archive, article pages, sitemap) uses the
//! same order: newest first, ties broken by reverse lexical id. This is what
//! makes rebuilds byte-identical.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an ISO timestamp. Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`,
/// or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Millisecond sort key: missing or unparsable timestamps are the epoch,
/// so they sort to the very end of newest-first listings.
pub fn sort_millis(value: Option<&str>) -> i64 {
    value
        .and_then(parse_timestamp)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// ISO date portion (`YYYY-MM-DD`) of a timestamp, if it parses.
pub fn date_stamp(value: Option<&str>) -> Option<String> {
    value
        .and_then(parse_timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Today's UTC date as `YYYY-MM-DD` — the sitemap fallback when no
/// timestamp is available.
pub fn today_stamp() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Human-readable French date (`1 novembre 2025`), empty for missing or
/// unparsable input.
pub fn format_date_fr(value: Option<&str>) -> String {
    use chrono::Datelike;
    match value.and_then(parse_timestamp) {
        Some(dt) => format!(
            "{} {} {}",
            dt.day(),
            MONTHS_FR[dt.month0() as usize],
            dt.year()
        ),
        None => String::new(),
    }
}

/// Anything that can appear in a date-ordered listing.
pub trait Dated {
    fn created_at(&self) -> Option<&str>;
    fn id(&self) -> &str;
}

impl Dated for crate::types::Article {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
    fn id(&self) -> &str {
        &self.id
    }
}

impl Dated for crate::types::ArticleSummary {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
    fn id(&self) -> &str {
        &self.id
    }
}

impl Dated for crate::types::ArchiveEntry {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
    fn id(&self) -> &str {
        &self.id
    }
}

/// Sort newest first. Equal timestamps (including two missing ones) fall
/// back to reverse lexical id comparison.
pub fn sort_newest_first<T: Dated>(items: &mut [T]) {
    items.sort_by(|a, b| {
        sort_millis(b.created_at())
            .cmp(&sort_millis(a.created_at()))
            .then_with(|| b.id().cmp(a.id()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArchiveEntry;

    fn entry(id: &str, created_at: Option<&str>) -> ArchiveEntry {
        ArchiveEntry {
            id: id.to_string(),
            title: None,
            created_at: created_at.map(String::from),
            url: None,
        }
    }

    #[test]
    fn parses_rfc3339() {
        let dt = parse_timestamp("2025-11-01T08:00:00Z").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-11-01 08:00");
    }

    #[test]
    fn parses_naive_and_date_only() {
        assert!(parse_timestamp("2025-11-01T08:00:00").is_some());
        assert!(parse_timestamp("2025-11-01").is_some());
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_timestamp("pas une date").is_none());
        assert_eq!(sort_millis(Some("pas une date")), 0);
        assert_eq!(sort_millis(None), 0);
    }

    #[test]
    fn date_stamp_keeps_date_portion() {
        assert_eq!(
            date_stamp(Some("2025-11-01T08:00:00Z")).as_deref(),
            Some("2025-11-01")
        );
        assert_eq!(date_stamp(Some("n'importe quoi")), None);
    }

    #[test]
    fn french_dates() {
        assert_eq!(format_date_fr(Some("2025-11-01T08:00:00Z")), "1 novembre 2025");
        assert_eq!(format_date_fr(Some("2024-08-15T00:00:00Z")), "15 août 2024");
        assert_eq!(format_date_fr(None), "");
        assert_eq!(format_date_fr(Some("???")), "");
    }

    #[test]
    fn newest_first_with_reverse_id_ties() {
        let mut entries = vec![
            entry("a", Some("2025-01-01T00:00:00Z")),
            entry("b", Some("2025-06-01T00:00:00Z")),
            entry("c", Some("2025-01-01T00:00:00Z")),
            entry("d", None),
        ];
        sort_newest_first(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        // b is newest; a and c tie on date and order by reverse id; d has no
        // date and sorts last.
        assert_eq!(ids, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn missing_dates_tie_break_by_reverse_id() {
        let mut entries = vec![entry("x", None), entry("z", None), entry("y", None)];
        sort_newest_first(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "y", "x"]);
    }
}
