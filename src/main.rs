use anyhow::{Context, Result};
use clap::Parser;
use reqwest::redirect::Policy;
use std::path::PathBuf;
use std::time::Duration;

use gazette::config::Config;
use gazette::embed::EmbedController;
use gazette::feed::{aggregate, Pagination};
use gazette::render::{render_embeds, NewsRenderer, StaticPage, EMBED_CONTAINER_ID, NEWS_CONTAINER_ID};
use gazette::util::truncate_to_width;

/// Title column width for `--list`.
const LIST_TITLE_WIDTH: usize = 72;

#[derive(Parser, Debug)]
#[command(
    name = "gazette",
    about = "Aggregate news feeds and render the news and embed sections of a static page"
)]
struct Args {
    /// Config file (default: ~/.config/gazette/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of "show more" reveals to apply before rendering
    #[arg(long, value_name = "N", default_value_t = 0)]
    reveal: usize,

    /// Post URL to embed (repeatable)
    #[arg(long = "embed", value_name = "URL")]
    embeds: Vec<String>,

    /// Print a plain-text listing instead of markup
    #[arg(long)]
    list: bool,
}

/// Get the default config file path (~/.config/gazette/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("gazette")
        .join("config.toml"))
}

/// Follows at most 3 redirects and refuses loops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );
        attempt.follow()
    })
}

fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(create_redirect_policy())
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .user_agent(concat!("gazette/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let client = http_client()?;
    let feed = aggregate(&client, &config.sources(), &config.aggregator_settings()).await;
    if feed.is_fallback() {
        tracing::warn!("No source produced items, showing fallback content");
    }

    let mut pages = Pagination::new(feed, config.page_size);
    for _ in 0..args.reveal {
        if pages.reveal_more().is_none() {
            break;
        }
    }

    let renderer = NewsRenderer::new(config.display_timezone());

    if args.list {
        for item in pages.visible() {
            let date = item
                .published_at
                .map(|dt| renderer.display_date(dt))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{} | {} | {}",
                item.source_name,
                date,
                truncate_to_width(&item.title, LIST_TITLE_WIDTH)
            );
        }
        if pages.has_more() {
            println!(
                "({} of {} shown)",
                pages.revealed(),
                pages.feed().len()
            );
        }
        return Ok(());
    }

    // No viewport in a static render, so every embed activates on discovery
    let mut page = StaticPage::default();
    let mut embeds = EmbedController::new(None, config.script_loader());
    if !args.embeds.is_empty() {
        embeds.add_posts(args.embeds, &mut page);
    }

    println!(
        r#"<div id="{NEWS_CONTAINER_ID}">{}</div>"#,
        renderer.render(&pages)
    );
    println!(
        r#"<div id="{EMBED_CONTAINER_ID}">{}</div>"#,
        render_embeds(&embeds)
    );
    let scripts = page.script_tags();
    if !scripts.is_empty() {
        println!("{scripts}");
    }

    Ok(())
}
