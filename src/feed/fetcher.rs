use super::envelope::{non_blank, Envelope, RawFeedItem};
use super::item::{parse_timestamp, NormalizedItem};
use super::source::FeedDescriptor;
use super::thumbnail::extract_thumbnail;
use crate::util::{parse_http_url, squash_whitespace, strip_control_chars};
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching one source.
///
/// Every variant except [`FetchError::Envelope`] is a transport failure: the
/// request never produced a usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// The source did not settle within the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the configured size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Body decoded but lacked an "ok" status or an items collection
    #[error("Unexpected response envelope: {0}")]
    Envelope(String),
}

impl FetchError {
    /// True for failures of the request itself, false for a malformed envelope.
    pub fn is_transport(&self) -> bool {
        !matches!(self, FetchError::Envelope(_))
    }
}

/// Per-source request limits.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Upper bound on request plus body read. Expiry drops the source.
    pub timeout: Duration,
    /// Items taken from the head of each source.
    pub per_source_limit: usize,
    pub max_response_bytes: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            per_source_limit: 3,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Fetches one source through the feed converter and normalizes its items.
///
/// Makes exactly one attempt. At most `per_source_limit` items are taken from
/// the head of the source; items without a usable http(s) link are then
/// skipped.
///
/// # Errors
///
/// - [`FetchError::Network`] / [`FetchError::HttpStatus`] - request did not succeed
/// - [`FetchError::Timeout`] - the source did not settle in time
/// - [`FetchError::ResponseTooLarge`] - body exceeded `max_response_bytes`
/// - [`FetchError::Envelope`] - body is not JSON, status is not "ok", or items are missing
pub async fn fetch_source(
    client: &reqwest::Client,
    source: &FeedDescriptor,
    settings: &FetchSettings,
) -> Result<Vec<NormalizedItem>, FetchError> {
    let bytes = tokio::time::timeout(settings.timeout, fetch_body(client, source, settings))
        .await
        .map_err(|_| FetchError::Timeout)??;

    let envelope: Envelope =
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Envelope(e.to_string()))?;

    if !envelope.is_ok() {
        return Err(FetchError::Envelope(format!(
            "status is {:?}, expected \"ok\"",
            envelope.status.as_deref().unwrap_or("missing")
        )));
    }

    // Video aggregator feeds carry a more informative title than the configured name
    let display_name = match envelope.feed_title() {
        Some(title) if source.category.is_video() => title.to_owned(),
        _ => source.name.clone(),
    };
    let display_name = squash_whitespace(&strip_control_chars(&display_name));

    let raw_items = envelope
        .items
        .ok_or_else(|| FetchError::Envelope("missing items".to_owned()))?;

    let taken = raw_items.len().min(settings.per_source_limit);
    let items: Vec<NormalizedItem> = raw_items
        .iter()
        .take(settings.per_source_limit)
        .filter_map(|raw| normalize(raw, source, &display_name))
        .collect();

    let skipped = taken - items.len();
    if skipped > 0 {
        tracing::warn!(
            source = %source.name,
            skipped = skipped,
            "Items without a usable link skipped"
        );
    }

    tracing::debug!(source = %source.name, items = items.len(), "Source fetched");
    Ok(items)
}

async fn fetch_body(
    client: &reqwest::Client,
    source: &FeedDescriptor,
    settings: &FetchSettings,
) -> Result<Vec<u8>, FetchError> {
    let response = client.get(&source.endpoint).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    read_limited_bytes(response, settings.max_response_bytes).await
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

fn normalize(raw: &RawFeedItem, source: &FeedDescriptor, display_name: &str) -> Option<NormalizedItem> {
    let link = parse_http_url(raw.link()?).ok()?;

    let title = non_blank(raw.title.as_deref())
        .map(|t| squash_whitespace(&strip_control_chars(t)))
        .unwrap_or_else(|| "Untitled".to_owned());

    let published_at = raw.pub_date.as_deref().and_then(parse_timestamp);
    if published_at.is_none() {
        tracing::debug!(
            source = %source.name,
            raw = ?raw.pub_date,
            "Unparseable publish date, item will sort last"
        );
    }

    Some(NormalizedItem {
        title,
        link: link.to_string(),
        published_at,
        source_name: display_name.to_owned(),
        category: source.category,
        thumbnail: extract_thumbnail(raw, source.category),
    })
}
