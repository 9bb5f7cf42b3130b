//! Configuration file parser for ~/.config/gazette/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted but logged, since they are usually typos.
use crate::embed::{ScriptLoader, VisibilityWatcher, DEFAULT_SCRIPT_URL};
use crate::feed::{default_sources, AggregatorSettings, FeedDescriptor, FetchSettings};
use crate::util::parse_http_url;
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of items kept after merging all sources.
    pub max_items: usize,

    /// Items revealed per page.
    pub page_size: usize,

    /// Items taken from the head of each source.
    pub per_source_limit: usize,

    /// Per-source timeout in seconds. A source that has not settled by then is dropped.
    pub fetch_timeout_secs: u64,

    /// Maximum accepted response body per source.
    pub max_response_bytes: usize,

    /// IANA timezone used when printing item dates.
    pub display_timezone: String,

    pub embed: EmbedConfig,

    /// Feed sources. Empty means the built-in registry.
    pub sources: Vec<FeedDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Lookahead margin in pixels around the viewport.
    pub root_margin_px: i64,
    pub script_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: 24,
            page_size: 6,
            per_source_limit: 3,
            fetch_timeout_secs: 10,
            max_response_bytes: 5 * 1024 * 1024,
            display_timezone: DEFAULT_TIMEZONE.to_string(),
            embed: EmbedConfig::default(),
            sources: Vec::new(),
        }
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            root_margin_px: 100,
            script_url: DEFAULT_SCRIPT_URL.to_string(),
        }
    }
}

const DEFAULT_TIMEZONE: &str = "America/Denver";

const KNOWN_KEYS: [&str; 8] = [
    "max_items",
    "page_size",
    "per_source_limit",
    "fetch_timeout_secs",
    "max_response_bytes",
    "display_timezone",
    "embed",
    "sources",
];

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Out-of-range values → `Err(ConfigError::Invalid)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            sources = config.sources().len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parses and validates TOML text. Blank text yields defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_items", self.max_items),
            ("page_size", self.page_size),
            ("per_source_limit", self.per_source_limit),
            ("max_response_bytes", self.max_response_bytes),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{key} must be at least 1")));
            }
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch_timeout_secs must be at least 1".to_string(),
            ));
        }

        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "source with endpoint {} has no name",
                    source.endpoint
                )));
            }
            parse_http_url(&source.endpoint).map_err(|e| {
                ConfigError::Invalid(format!("source {:?}: {e}", source.name))
            })?;
        }

        self.display_timezone
            .parse::<Tz>()
            .map_err(|e| ConfigError::Invalid(format!("display_timezone: {e}")))?;

        parse_http_url(&self.embed.script_url)
            .map_err(|e| ConfigError::Invalid(format!("embed.script_url: {e}")))?;

        Ok(())
    }

    /// Configured sources, or the built-in registry when none are declared.
    pub fn sources(&self) -> Vec<FeedDescriptor> {
        if self.sources.is_empty() {
            default_sources()
        } else {
            self.sources.clone()
        }
    }

    /// Display timezone. Values are validated on load, so the fallback only
    /// applies to hand-built configs.
    pub fn display_timezone(&self) -> Tz {
        self.display_timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %self.display_timezone, "Unknown timezone, using UTC");
            Tz::UTC
        })
    }

    pub fn aggregator_settings(&self) -> AggregatorSettings {
        AggregatorSettings {
            fetch: FetchSettings {
                timeout: Duration::from_secs(self.fetch_timeout_secs),
                per_source_limit: self.per_source_limit,
                max_response_bytes: self.max_response_bytes,
            },
            max_items: self.max_items,
        }
    }

    pub fn visibility_watcher(&self) -> VisibilityWatcher {
        VisibilityWatcher::new(self.embed.root_margin_px)
    }

    pub fn script_loader(&self) -> ScriptLoader {
        ScriptLoader::new(self.embed.script_url.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
