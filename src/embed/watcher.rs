use super::placeholder::EmbedId;
use std::collections::BTreeSet;

/// Vertical extent of the visible area, in pixels from the document top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top: i64,
    pub height: i64,
}

/// Vertical extent of one placeholder node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub top: i64,
    pub height: i64,
}

impl Bounds {
    fn bottom(&self) -> i64 {
        self.top.saturating_add(self.height)
    }
}

/// Single shared visibility dispatcher for every observed placeholder.
///
/// The viewport is grown by `root_margin` on both edges, so nodes begin
/// activating slightly before they scroll into view.
#[derive(Debug, Clone)]
pub struct VisibilityWatcher {
    root_margin: i64,
    observed: BTreeSet<EmbedId>,
}

impl VisibilityWatcher {
    pub fn new(root_margin: i64) -> Self {
        Self {
            root_margin: root_margin.max(0),
            observed: BTreeSet::new(),
        }
    }

    pub fn root_margin(&self) -> i64 {
        self.root_margin
    }

    pub fn observe(&mut self, id: EmbedId) {
        self.observed.insert(id);
    }

    /// Stops watching `id`. Returns false if it was not being watched.
    pub fn unobserve(&mut self, id: EmbedId) -> bool {
        self.observed.remove(&id)
    }

    pub fn is_observed(&self, id: EmbedId) -> bool {
        self.observed.contains(&id)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Returns the observed nodes in `layout` that intersect the margin-grown
    /// viewport, in id order and without duplicates. Unobserved nodes are ignored.
    pub fn intersecting<I>(&self, viewport: Viewport, layout: I) -> Vec<EmbedId>
    where
        I: IntoIterator<Item = (EmbedId, Bounds)>,
    {
        let top = viewport.top.saturating_sub(self.root_margin);
        let bottom = viewport
            .top
            .saturating_add(viewport.height)
            .saturating_add(self.root_margin);

        let hits: BTreeSet<EmbedId> = layout
            .into_iter()
            .filter(|(id, bounds)| {
                self.observed.contains(id) && bounds.top < bottom && bounds.bottom() > top
            })
            .map(|(id, _)| id)
            .collect();

        hits.into_iter().collect()
    }
}
