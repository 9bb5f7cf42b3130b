use serde::Deserialize;
use std::fmt;

/// Base URL of the RSS-to-JSON conversion service used by the built-in registry.
const CONVERTER_BASE: &str = "https://api.rss2json.com/v1/api.json?rss_url=";

/// Content category of a source.
///
/// Video sources get special treatment in the fetcher: their feed title
/// replaces the configured name, and thumbnails are synthesized from the
/// video identifier in each item's link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "video")]
    Videos,
    News,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Videos => "videos",
            Category::News => "news",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Category::Videos)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered feed: display name, converter endpoint, and category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedDescriptor {
    pub name: String,
    pub endpoint: String,
    pub category: Category,
}

impl FeedDescriptor {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            category,
        }
    }
}

/// The built-in ordered source registry.
///
/// Used whenever the configuration file does not declare its own `[[sources]]`.
pub fn default_sources() -> Vec<FeedDescriptor> {
    vec![
        FeedDescriptor::new(
            "YouTube",
            format!(
                "{CONVERTER_BASE}https://www.youtube.com/feeds/videos.xml?channel_id=UC72nbKQLSDyiSARhg0Ywj4w"
            ),
            Category::Videos,
        ),
        FeedDescriptor::new(
            "Denver7",
            format!("{CONVERTER_BASE}https://www.denver7.com/news/local-news.rss"),
            Category::News,
        ),
        FeedDescriptor::new(
            "FOX31",
            format!("{CONVERTER_BASE}https://kdvr.com/news/feed/"),
            Category::News,
        ),
    ]
}
