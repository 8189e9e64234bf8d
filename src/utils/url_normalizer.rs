//! URL validation and canonicalization.
//!
//! Every target is normalized before it is hashed, so two spellings of the same
//! address share one shortcode.

use url::{ParseError, Url};

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

impl UrlNormalizationError {
    /// Short identifier used in error details.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::UnsupportedScheme(_) => "unsupported_scheme",
            Self::MissingHost => "missing_host",
        }
    }
}

/// Normalizes user input into an absolute `http`/`https` URL.
///
/// # Rules
///
/// 1. Input without a scheme (`example.com/page`) is retried with `http://`
/// 2. Only `http` and `https` are accepted
/// 3. A non-empty host is required
/// 4. Host is lowercased and default ports are dropped by the parser
/// 5. Fragments are removed; path, query and percent-encoding are kept as parsed
///
/// The output is a fixed point: normalizing it again returns the same string.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidUrl`] for unparseable input,
/// [`UrlNormalizationError::UnsupportedScheme`] for any other scheme and
/// [`UrlNormalizationError::MissingHost`] when no host is present.
///
/// # Examples
///
/// ```
/// use shortlink::utils::url_normalizer::normalize_url;
///
/// assert_eq!(normalize_url("example.com/page").unwrap(), "http://example.com/page");
/// assert_eq!(
///     normalize_url("HTTPS://EXAMPLE.COM:443/Path#top").unwrap(),
///     "https://example.com/Path"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlNormalizationError::InvalidUrl("empty input".to_string()));
    }

    let mut url = match Url::parse(input) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{input}")).map_err(classify_parse_error)?
        }
        Err(e) => return Err(classify_parse_error(e)),
    };

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlNormalizationError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url.to_string())
}

fn classify_parse_error(e: ParseError) -> UrlNormalizationError {
    match e {
        ParseError::EmptyHost => UrlNormalizationError::MissingHost,
        other => UrlNormalizationError::InvalidUrl(other.to_string()),
    }
}
