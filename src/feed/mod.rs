//! Feed aggregation and pagination pipeline.
//!
//! Pulls items from several converter-backed sources at once, merges them
//! into one newest-first list, and reveals that list a page at a time:
//!
//! - [`source`] - the ordered source registry
//! - [`fetcher`] - one request per source, envelope validation, normalization
//! - [`thumbnail`] - best-effort thumbnail fallback chain
//! - [`aggregator`] - concurrent fan-out, merge, sort, cap, fallback content
//! - [`pagination`] - reveal cursor over the aggregated list
//!
//! # Example
//!
//! ```ignore
//! use gazette::feed::{aggregate, default_sources, AggregatorSettings, Pagination};
//!
//! let feed = aggregate(&client, &default_sources(), &AggregatorSettings::default()).await;
//! let mut pages = Pagination::new(feed, 6);
//! pages.reveal_more();
//! ```

pub mod aggregator;
pub mod envelope;
pub mod fetcher;
pub mod item;
pub mod pagination;
pub mod source;
pub mod thumbnail;

pub use aggregator::{aggregate, merge_sort_cap, AggregatedFeed, AggregatorSettings};
pub use envelope::{Envelope, RawFeedItem};
pub use fetcher::{fetch_source, FetchError, FetchSettings};
pub use item::{fallback_items, parse_timestamp, NormalizedItem};
pub use pagination::Pagination;
pub use source::{default_sources, Category, FeedDescriptor};
pub use thumbnail::extract_thumbnail;
