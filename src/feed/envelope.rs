//! Response shape of the feed conversion service.
//!
//! The converter is an opaque collaborator; only the fields the fetcher reads
//! are modeled and every one of them is optional. Blank strings are treated
//! as absent throughout, since the converter emits `""` for missing values.
use serde::Deserialize;
use serde_json::Value;

/// Top-level converter response: `{status, feed?: {title}, items}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub status: Option<String>,
    pub feed: Option<FeedMeta>,
    pub items: Option<Vec<RawFeedItem>>,
}

impl Envelope {
    /// True when the converter reported success.
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }

    /// The feed's own title, if it carries a non-blank one.
    pub fn feed_title(&self) -> Option<&str> {
        self.feed.as_ref().and_then(|f| non_blank(f.title.as_deref()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedMeta {
    pub title: Option<String>,
}

/// One item as returned by the converter. Read-only input to normalization.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RawFeedItem {
    pub title: Option<String>,
    pub link: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub thumbnail: Option<String>,
    /// Object with `link`/`url` keys, or an empty array when the feed has none.
    pub enclosure: Option<Value>,
    pub content: Option<String>,
    pub description: Option<String>,
}

impl RawFeedItem {
    pub fn link(&self) -> Option<&str> {
        non_blank(self.link.as_deref())
    }

    pub fn thumbnail(&self) -> Option<&str> {
        non_blank(self.thumbnail.as_deref())
    }

    pub fn enclosure_link(&self) -> Option<&str> {
        self.enclosure_field("link")
    }

    pub fn enclosure_url(&self) -> Option<&str> {
        self.enclosure_field("url")
    }

    fn enclosure_field(&self, key: &str) -> Option<&str> {
        non_blank(self.enclosure.as_ref()?.get(key)?.as_str())
    }
}

pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
