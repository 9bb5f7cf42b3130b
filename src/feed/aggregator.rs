use super::fetcher::{fetch_source, FetchSettings};
use super::item::{fallback_items, NormalizedItem};
use super::source::FeedDescriptor;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Limits applied by one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    pub fetch: FetchSettings,
    /// Maximum number of items retained after the merge.
    pub max_items: usize,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            max_items: 24,
        }
    }
}

/// The merged, sorted, capped item sequence of one aggregation run.
///
/// Immutable once built; pagination only reveals a prefix of it. Cloning is
/// cheap (`Arc` slice).
#[derive(Debug, Clone)]
pub struct AggregatedFeed {
    items: Arc<[NormalizedItem]>,
    fallback: bool,
}

impl AggregatedFeed {
    /// Wraps an already ordered sequence.
    pub fn new(items: Vec<NormalizedItem>) -> Self {
        Self {
            items: items.into(),
            fallback: false,
        }
    }

    fn fallback() -> Self {
        Self {
            items: fallback_items(Utc::now()).into(),
            fallback: true,
        }
    }

    pub fn items(&self) -> &[NormalizedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when every source failed or returned nothing and the owner's
    /// fallback set is shown instead.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Fetches every source concurrently and merges the results.
///
/// All fetches start together and the run waits for every one of them to
/// settle; a failing source is logged and dropped without affecting the
/// others. If nothing survives, the fallback set is returned, so the result
/// is never empty.
pub async fn aggregate(
    client: &reqwest::Client,
    sources: &[FeedDescriptor],
    settings: &AggregatorSettings,
) -> AggregatedFeed {
    let concurrency = sources.len().max(1);

    // `buffered` keeps input order so equal timestamps merge deterministically
    let results: Vec<Option<Vec<NormalizedItem>>> = stream::iter(sources)
        .map(|source| async move {
            match fetch_source(client, source, &settings.fetch).await {
                Ok(items) => Some(items),
                Err(e) => {
                    tracing::warn!(
                        source = %source.name,
                        transport = e.is_transport(),
                        error = %e,
                        "Source failed, excluding from aggregation"
                    );
                    None
                }
            }
        })
        .buffered(concurrency)
        .collect()
        .await;

    let succeeded = results.iter().filter(|r| r.is_some()).count();
    let merged = merge_sort_cap(results.into_iter().flatten(), settings.max_items);

    tracing::info!(
        sources = sources.len(),
        succeeded = succeeded,
        retained = merged.len(),
        "Aggregation complete"
    );

    if merged.is_empty() {
        tracing::info!("No items from any source, using fallback content");
        return AggregatedFeed::fallback();
    }

    AggregatedFeed::new(merged)
}

/// Flattens per-source lists, sorts newest first, and keeps the first `max_items`.
///
/// Items without a timestamp sort after every timestamped item. The sort is
/// stable, so ties keep source order and then per-source order.
pub fn merge_sort_cap<I>(per_source: I, max_items: usize) -> Vec<NormalizedItem>
where
    I: IntoIterator<Item = Vec<NormalizedItem>>,
{
    let mut merged: Vec<NormalizedItem> = per_source.into_iter().flatten().collect();
    // `None < Some(_)`, so a descending comparison puts undated items last
    merged.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    merged.truncate(max_items);
    merged
}
