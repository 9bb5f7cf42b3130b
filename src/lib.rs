//! News feed aggregation and lazy social-embed activation for a static
//! personal site.
//!
//! - [`feed`] fetches converter-backed sources concurrently, merges them
//!   newest first and reveals the result a page at a time
//! - [`embed`] activates third-party post embeds once they near the viewport
//! - [`render`] turns both into container markup
//! - [`config`] loads the optional TOML settings file

pub mod config;
pub mod embed;
pub mod feed;
pub mod render;
pub mod util;
