use super::aggregator::AggregatedFeed;
use super::item::NormalizedItem;

/// Reveal cursor over one [`AggregatedFeed`].
///
/// `revealed` only grows, one page per [`Pagination::reveal_more`], and is
/// reset only by [`Pagination::reset`] with a fresh aggregation. Revealing
/// never re-sorts or re-fetches; it exposes a longer prefix of the same
/// sequence.
#[derive(Debug, Clone)]
pub struct Pagination {
    feed: AggregatedFeed,
    page_size: usize,
    revealed: usize,
    focus: Option<usize>,
}

impl Pagination {
    /// Starts with the first page revealed. A zero page size is treated as one.
    pub fn new(feed: AggregatedFeed, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let revealed = page_size.min(feed.len());
        Self {
            feed,
            page_size,
            revealed,
            focus: None,
        }
    }

    /// Replaces the feed after a new aggregation run and rewinds to the first page.
    pub fn reset(&mut self, feed: AggregatedFeed) {
        *self = Self::new(feed, self.page_size);
    }

    /// Reveals the next page.
    ///
    /// Returns the index of the first newly revealed item, which the view
    /// should scroll into focus. Once everything is revealed this is a no-op
    /// returning `None`, and the focus from the previous reveal is kept.
    pub fn reveal_more(&mut self) -> Option<usize> {
        if !self.has_more() {
            return None;
        }
        let first_new = self.revealed;
        self.revealed = (self.revealed + self.page_size).min(self.feed.len());
        self.focus = Some(first_new);
        tracing::debug!(
            revealed = self.revealed,
            total = self.feed.len(),
            "Revealed next page"
        );
        Some(first_new)
    }

    pub fn has_more(&self) -> bool {
        self.revealed < self.feed.len()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the item the last reveal should bring into view.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// The revealed prefix `[0, revealed)`.
    pub fn visible(&self) -> &[NormalizedItem] {
        &self.feed.items()[..self.revealed]
    }

    pub fn feed(&self) -> &AggregatedFeed {
        &self.feed
    }
}
