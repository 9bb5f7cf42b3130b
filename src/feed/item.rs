use super::source::Category;
use chrono::{DateTime, NaiveDateTime, Utc};

/// A feed entry reduced to the shape the aggregator operates on.
///
/// Created once by the fetcher and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedItem {
    pub title: String,
    pub link: String,
    /// `None` when the source timestamp could not be parsed. Such items sort
    /// after every item with a valid timestamp.
    pub published_at: Option<DateTime<Utc>>,
    pub source_name: String,
    pub category: Category,
    pub thumbnail: Option<String>,
}

/// Parses a publish timestamp as emitted by the feed converter.
///
/// Accepts RFC 3339, RFC 2822, and the converter's `YYYY-MM-DD HH:MM:SS`
/// form (taken as UTC). Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

const FALLBACK_SOURCE: &str = "Denver Sam";
const FALLBACK_LINK: &str = "https://www.youtube.com/@DenverSam";
const FALLBACK_TITLES: [&str; 3] = [
    "Exploring Colorado with Denver Sam",
    "Best Places to Visit in Denver",
    "Colorado Travel Guide",
];

/// The owner's own material, shown when every source failed or came back empty.
pub fn fallback_items(now: DateTime<Utc>) -> Vec<NormalizedItem> {
    FALLBACK_TITLES
        .iter()
        .map(|title| NormalizedItem {
            title: (*title).to_string(),
            link: FALLBACK_LINK.to_string(),
            published_at: Some(now),
            source_name: FALLBACK_SOURCE.to_string(),
            category: Category::Videos,
            thumbnail: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_converter_format() {
        let dt = parse_timestamp("2024-01-15 18:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-01-15T11:30:00-07:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc2822() {
        let dt = parse_timestamp("Mon, 15 Jan 2024 18:30:00 +0000").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_unparseable_timestamps() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday-ish").is_none());
        assert!(parse_timestamp("2024-13-45 99:00:00").is_none());
    }

    #[test]
    fn test_fallback_items_are_non_empty_and_stamped() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let items = fallback_items(now);
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.published_at == Some(now)));
        assert!(items.iter().all(|i| i.source_name == "Denver Sam"));
        assert_eq!(items[0].title, "Exploring Colorado with Denver Sam");
    }
}
