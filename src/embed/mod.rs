//! Lazy embed activation.
//!
//! Placeholders carrying a third-party post URL are registered with one
//! shared [`VisibilityWatcher`]. The first time a placeholder comes within the
//! watcher's margin of the viewport it is activated exactly once: its markup
//! is rewritten into the final embed and the [`ScriptLoader`] makes sure the
//! external embed script has been injected (once per page) and run.
//!
//! Each placeholder follows `Pending -> Observed -> Activated`; see
//! [`EmbedState`].

mod controller;
mod loader;
mod placeholder;
mod watcher;

pub use controller::{EmbedController, PLACEHOLDER_ATTR};
pub use loader::{EmbedHost, LoaderStatus, ScriptLoader, DEFAULT_SCRIPT_URL};
pub use placeholder::{
    extract_post_id, EmbedId, EmbedMarkup, EmbedPlaceholder, EmbedState, PostKind, PostRef,
};
pub use watcher::{Bounds, Viewport, VisibilityWatcher};
