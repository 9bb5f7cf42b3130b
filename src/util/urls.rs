use thiserror::Error;
use url::Url;

/// Errors that can occur when validating a URL destined for rendered markup
/// or an outgoing request.
#[derive(Error, Debug)]
pub enum UrlError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    Invalid(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Parses `raw` and accepts it only as an absolute http(s) URL with a host.
///
/// Protocol-relative URLs (`//cdn.example.com/a.jpg`) are upgraded to https.
/// Rejects `javascript:`, `data:`, `file:` and every other scheme, so values
/// coming from remote feeds can be written into `href`/`src` attributes.
///
/// # Examples
///
/// ```
/// use gazette::util::parse_http_url;
///
/// assert!(parse_http_url("https://example.com/a").is_ok());
/// assert!(parse_http_url("//cdn.example.com/a.jpg").is_ok());
/// assert!(parse_http_url("javascript:alert(1)").is_err());
/// ```
pub fn parse_http_url(raw: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();
    let url = if raw.starts_with("//") {
        Url::parse(&format!("https:{raw}"))?
    } else {
        Url::parse(raw)?
    };

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns the first value of query parameter `key`, if present and non-empty.
pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
