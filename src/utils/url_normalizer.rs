//! Target URL validation and canonicalization.
//!
//! Target URLs are stored in the serialization produced by the `url` crate, so
//! every stored value is a valid `Location` header.

use url::Url;

/// Errors that can occur while checking a target URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Parses `input` as an absolute `http://` or `https://` URL with a host and
/// returns its canonical serialization.
///
/// Canonicalization is whatever the WHATWG parser does: scheme and host are
/// lowercased, an empty path becomes `/`, non-ASCII characters are
/// percent-encoded or punycoded. Fragments, queries and default ports are
/// left as the parser leaves them.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed input,
/// [`UrlNormalizationError::UnsupportedProtocol`] for any other scheme and
/// [`UrlNormalizationError::MissingHost`] when no host is present.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("https://example.com/page").unwrap(),
///     "https://example.com/page"
/// );
/// assert_eq!(
///     normalize_url("HTTPS://EXAMPLE.COM").unwrap(),
///     "https://example.com/"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_simple_path() {
        assert_eq!(
            normalize_url("https://example.com/page").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_normalize_adds_root_path() {
        assert_eq!(
            normalize_url("http://example.com").unwrap(),
            "http://example.com/"
        );
    }

    #[test]
    fn test_normalize_lowercases_scheme_and_host() {
        assert_eq!(
            normalize_url("HTTPS://EXAMPLE.COM/Path").unwrap(),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_normalize_preserves_query_and_fragment() {
        assert_eq!(
            normalize_url("https://example.com/search?q=rust&lang=en#top").unwrap(),
            "https://example.com/search?q=rust&lang=en#top"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize_url("  https://example.com/a  ").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_normalize_keeps_custom_port() {
        assert_eq!(
            normalize_url("http://localhost:3000/test").unwrap(),
            "http://localhost:3000/test"
        );
    }

    #[test]
    fn test_normalize_encodes_non_ascii_path() {
        let result = normalize_url("https://example.com/café").unwrap();
        assert!(result.is_ascii());
        assert!(result.starts_with("https://example.com/caf"));
    }

    #[test]
    fn test_normalize_not_a_url() {
        assert!(matches!(
            normalize_url("not-a-url"),
            Err(UrlNormalizationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_normalize_empty_string() {
        assert!(matches!(
            normalize_url(""),
            Err(UrlNormalizationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_normalize_no_protocol() {
        assert!(matches!(
            normalize_url("example.com/page"),
            Err(UrlNormalizationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_other_schemes() {
        for input in [
            "ftp://example.com/file.txt",
            "file:///home/user/document.txt",
            "javascript:alert('xss')",
            "mailto:test@example.com",
            "data:text/plain,Hello",
        ] {
            assert_eq!(
                normalize_url(input),
                Err(UrlNormalizationError::UnsupportedProtocol),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_rejects_empty_host() {
        assert!(normalize_url("http://").is_err());
    }
}
