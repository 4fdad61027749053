//! Target URL normalization and validation.
//!
//! Accepts user input such as `example.com/page` or `https://Example.com/page`
//! and produces a canonical absolute HTTP(S) URL.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Matches an explicit `scheme:` prefix.
static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Normalizes a target URL to a canonical absolute form.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Input without a scheme gets `https://` prepended (`example.com/a`,
///    `localhost:3000/a`)
/// 3. Only `http` and `https` are accepted, and a host is required
/// 4. Hostname is lowercased and default ports are dropped by the parser
/// 5. Path, query and fragment are preserved
///
/// # Errors
///
/// Returns [`UrlNormalizationError`] describing why the input was rejected.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("example.com/page").unwrap(),
///     "https://example.com/page"
/// );
/// assert!(normalize_url("javascript:alert(1)").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let candidate = if has_explicit_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url =
        Url::parse(&candidate).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    Ok(url.to_string())
}

/// `host:port` looks like a scheme to the parser, so a prefix followed by a
/// digit is treated as a port rather than a scheme.
fn has_explicit_scheme(input: &str) -> bool {
    let Some(m) = SCHEME_PREFIX.find(input) else {
        return false;
    };

    !input[m.end()..].starts_with(|c: char| c.is_ascii_digit())
}
