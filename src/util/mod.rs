//! Utility functions shared by the feed and embed pipelines.
//!
//! - **URL validation**: only absolute http(s) URLs reach rendered markup
//! - **HTML scanning**: attribute extraction without an HTML parser
//! - **Text processing**: control-character stripping and width-aware truncation

pub mod html;
mod text;
mod urls;

pub use self::text::{squash_whitespace, strip_control_chars, truncate_to_width};
pub use self::urls::{parse_http_url, query_param, UrlError};
