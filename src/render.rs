//! Markup written into the page's containers.
//!
//! The page owns the container elements (`news-container`,
//! `instagram-container`); everything here produces their inner HTML. All
//! remote text is escaped, and URLs have already been restricted to http(s)
//! by the fetcher.
use crate::embed::{EmbedController, EmbedHost, EmbedMarkup, EmbedPlaceholder};
use crate::feed::{NormalizedItem, Pagination};
use crate::util::html::escape;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub const NEWS_CONTAINER_ID: &str = "news-container";
pub const EMBED_CONTAINER_ID: &str = "instagram-container";

/// Id given to the card a reveal should scroll into view.
pub const FOCUS_ANCHOR_ID: &str = "news-focus";

/// Page-level function the reveal button calls unless overridden.
pub const DEFAULT_REVEAL_HANDLER: &str = "showMoreNews";

const PLACEHOLDER_THUMB: &str =
    r#"<div class="placeholder-thumb"><span>No</span><span>Image</span></div>"#;

const EMBED_STYLE: &str = "background:#FFF; border:0; border-radius:3px; \
box-shadow:0 0 1px 0 rgba(0,0,0,0.5),0 1px 10px 0 rgba(0,0,0,0.15); margin: 1px; \
max-width:540px; min-width:326px; padding:0; width:calc(100% - 2px);";

/// Renders the paginated news list.
#[derive(Debug, Clone)]
pub struct NewsRenderer {
    timezone: Tz,
    reveal_handler: String,
}

impl NewsRenderer {
    /// Card dates are shown as local dates in `timezone`, daylight saving
    /// included.
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            reveal_handler: DEFAULT_REVEAL_HANDLER.to_string(),
        }
    }

    /// Names the page function the reveal button invokes.
    pub fn with_reveal_handler(mut self, handler: impl Into<String>) -> Self {
        self.reveal_handler = handler.into();
        self
    }

    /// Markup for the revealed prefix, plus the reveal affordance while more
    /// items remain. The card at the pagination focus carries
    /// [`FOCUS_ANCHOR_ID`] so the page can scroll it into view.
    ///
    /// The button only calls the reveal handler (by default
    /// [`DEFAULT_REVEAL_HANDLER`]); the host page must define that function
    /// and re-render after advancing its [`Pagination`].
    pub fn render(&self, pages: &Pagination) -> String {
        let focus = pages.focus();
        let mut html: String = pages
            .visible()
            .iter()
            .enumerate()
            .map(|(idx, item)| self.card(item, focus == Some(idx)))
            .collect();

        if pages.has_more() {
            html.push_str(&format!(
                r#"<div class="news-show-more-container"><button class="news-show-more-btn" onclick="{}()">Show More News</button></div>"#,
                escape(&self.reveal_handler)
            ));
        }
        html
    }

    /// Short date (`Oct 16, 2026`) in the display timezone.
    pub fn display_date(&self, dt: DateTime<Utc>) -> String {
        dt.with_timezone(&self.timezone).format("%b %-d, %Y").to_string()
    }

    pub fn card(&self, item: &NormalizedItem, focused: bool) -> String {
        let thumbnail = match &item.thumbnail {
            Some(src) => format!(
                r#"<div class="news-thumbnail"><img src="{}" alt="" loading="lazy" onerror="this.style.display='none';this.nextElementSibling.style.display='flex'"><div class="placeholder-thumb" style="display:none"><span>No</span><span>Image</span></div></div>"#,
                escape(src)
            ),
            None => format!(r#"<div class="news-thumbnail">{PLACEHOLDER_THUMB}</div>"#),
        };

        let date = item
            .published_at
            .map(|dt| format!(r#"<div class="news-date">{}</div>"#, self.display_date(dt)))
            .unwrap_or_default();

        let anchor = if focused {
            format!(r#" id="{FOCUS_ANCHOR_ID}""#)
        } else {
            String::new()
        };

        format!(
            r#"<article class="news-card has-thumbnail"{anchor}>{thumbnail}<div class="news-content"><div class="news-source">{source}</div><h3 class="news-title"><a href="{link}" target="_blank" rel="noopener noreferrer">{title}</a></h3>{date}</div></article>"#,
            source = escape(&item.source_name),
            link = escape(&item.link),
            title = escape(&item.title),
        )
    }
}

/// Inner markup of the embed container: the static notice (until posts are
/// added at runtime) followed by every placeholder in discovery order.
pub fn render_embeds(controller: &EmbedController) -> String {
    let mut html = String::new();
    if controller.shows_notice() {
        html.push_str(
            r#"<div class="instagram-placeholder"><p>Instagram posts coming soon.</p></div>"#,
        );
    }
    for placeholder in controller.placeholders() {
        html.push_str(&render_embed(placeholder));
    }
    html
}

fn render_embed(placeholder: &EmbedPlaceholder) -> String {
    let url = escape(placeholder.source_url());
    match placeholder.markup() {
        EmbedMarkup::Loading => format!(
            r#"<div class="instagram-embed loading" data-instagram-url="{url}"><span>Loading Instagram post...</span></div>"#
        ),
        EmbedMarkup::Rendered(_) => format!(
            r#"<div class="instagram-embed"><blockquote class="instagram-media" data-instgrm-permalink="{url}" data-instgrm-version="14" style="{EMBED_STYLE}"></blockquote></div>"#
        ),
    }
}

/// Embed host for a statically rendered page.
///
/// Injected scripts become `<script async>` tags at the end of the output.
/// The embed script processes the document by itself once the browser loads
/// it, so batch passes are only counted.
#[derive(Debug, Default)]
pub struct StaticPage {
    scripts: Vec<String>,
    passes: usize,
}

impl StaticPage {
    pub fn script_tags(&self) -> String {
        self.scripts
            .iter()
            .map(|src| format!(r#"<script async src="{}"></script>"#, escape(src)))
            .collect()
    }

    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl EmbedHost for StaticPage {
    fn inject_script(&mut self, src: &str) {
        self.scripts.push(src.to_owned());
    }

    fn process_embeds(&mut self) {
        self.passes += 1;
    }
}
