use super::loader::{EmbedHost, ScriptLoader};
use super::placeholder::{extract_post_id, EmbedId, EmbedPlaceholder, EmbedState};
use super::watcher::{Bounds, Viewport, VisibilityWatcher};
use crate::util::html;

/// Attribute that marks an embed placeholder in page markup.
pub const PLACEHOLDER_ATTR: &str = "data-instagram-url";

/// Lazy embed controller.
///
/// Owns every discovered placeholder, the shared visibility watcher, and the
/// script loader. Without a watcher (no visibility capability) placeholders
/// activate as soon as they are discovered.
#[derive(Debug)]
pub struct EmbedController {
    placeholders: Vec<EmbedPlaceholder>,
    watcher: Option<VisibilityWatcher>,
    loader: ScriptLoader,
    show_notice: bool,
}

impl EmbedController {
    pub fn new(watcher: Option<VisibilityWatcher>, loader: ScriptLoader) -> Self {
        Self {
            placeholders: Vec::new(),
            watcher,
            loader,
            show_notice: true,
        }
    }

    /// Registers one placeholder per source URL and starts watching it.
    ///
    /// Blank URLs are skipped. Returns the ids of the new placeholders.
    pub fn discover<H, I, S>(&mut self, urls: I, host: &mut H) -> Vec<EmbedId>
    where
        H: EmbedHost + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = Vec::new();

        for url in urls {
            let url: String = url.into();
            let url = url.trim();
            if url.is_empty() {
                tracing::debug!("Skipping placeholder without a source URL");
                continue;
            }

            let id = EmbedId(self.placeholders.len());
            self.placeholders
                .push(EmbedPlaceholder::new(id, url.to_owned()));
            ids.push(id);

            match self.watcher.as_mut() {
                Some(watcher) => {
                    watcher.observe(id);
                    self.placeholders[id.0].observe();
                }
                None => {
                    self.activate(id, host);
                }
            }
        }

        tracing::debug!(
            discovered = ids.len(),
            lazy = self.watcher.is_some(),
            "Embed placeholders registered"
        );
        ids
    }

    /// Scans an HTML fragment for elements carrying [`PLACEHOLDER_ATTR`] and
    /// discovers each of them.
    pub fn discover_in_html<H: EmbedHost + ?Sized>(&mut self, markup: &str, host: &mut H) -> Vec<EmbedId> {
        let urls: Vec<String> = html::tags_with_attr(markup, PLACEHOLDER_ATTR)
            .map(str::to_owned)
            .collect();
        self.discover(urls, host)
    }

    /// Runtime entry point: clears the "no posts yet" notice and appends new
    /// placeholders, which then go through the normal discovery flow.
    pub fn add_posts<H, I, S>(&mut self, urls: I, host: &mut H) -> Vec<EmbedId>
    where
        H: EmbedHost + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.show_notice = false;
        self.discover(urls, host)
    }

    /// Dispatches one round of visibility information.
    ///
    /// Every observed placeholder intersecting the viewport is unobserved and
    /// activated. Returns the ids that were activated by this call.
    pub fn on_visibility<H, I>(&mut self, viewport: Viewport, layout: I, host: &mut H) -> Vec<EmbedId>
    where
        H: EmbedHost + ?Sized,
        I: IntoIterator<Item = (EmbedId, Bounds)>,
    {
        let hits = match self.watcher.as_ref() {
            Some(watcher) => watcher.intersecting(viewport, layout),
            None => return Vec::new(),
        };

        hits.into_iter()
            .filter(|id| self.activate(*id, host))
            .collect()
    }

    /// Forwards the external script's load completion to the loader.
    pub fn script_loaded<H: EmbedHost + ?Sized>(&mut self, host: &mut H) {
        self.loader.script_loaded(host);
    }

    /// Activates `id` once. Returns false if it was unknown or already active.
    fn activate<H: EmbedHost + ?Sized>(&mut self, id: EmbedId, host: &mut H) -> bool {
        let Some(placeholder) = self.placeholders.get_mut(id.0) else {
            return false;
        };
        if !placeholder.activate() {
            return false;
        }
        if let Some(watcher) = self.watcher.as_mut() {
            watcher.unobserve(id);
        }

        match extract_post_id(placeholder.source_url()) {
            Some(post) => {
                tracing::debug!(id = %id, post = %post.id, "Activating embed");
                placeholder.render(post);
                self.loader.ensure_ready(host);
            }
            None => {
                tracing::debug!(
                    id = %id,
                    url = %placeholder.source_url(),
                    "No post identifier in embed URL, leaving unrendered"
                );
            }
        }
        true
    }

    pub fn placeholders(&self) -> &[EmbedPlaceholder] {
        &self.placeholders
    }

    pub fn get(&self, id: EmbedId) -> Option<&EmbedPlaceholder> {
        self.placeholders.get(id.0)
    }

    pub fn state(&self, id: EmbedId) -> Option<EmbedState> {
        self.get(id).map(EmbedPlaceholder::state)
    }

    pub fn loader(&self) -> &ScriptLoader {
        &self.loader
    }

    pub fn watcher(&self) -> Option<&VisibilityWatcher> {
        self.watcher.as_ref()
    }

    /// Whether the static "no posts yet" notice is still shown.
    pub fn shows_notice(&self) -> bool {
        self.show_notice
    }
}
