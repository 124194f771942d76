//! Destination URL validation.
//!
//! A destination must parse as an absolute URL with an explicit `http` or
//! `https` scheme and a host. The accepted value is stored as supplied
//! (surrounding whitespace trimmed), not re-serialized, so callers get back
//! exactly what they sent.

use url::Url;

/// Errors that can occur while validating a destination.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Destination URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Destination URL must include a host")]
    MissingHost,
}

/// Validates a destination URL and returns the value to store.
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for blank input
/// - [`UrlValidationError::InvalidFormat`] for relative or malformed URLs
/// - [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes
/// - [`UrlValidationError::MissingHost`] for URLs without a host
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_destination(" https://example.com ").unwrap(), "https://example.com");
/// assert!(validate_destination("not-a-url").is_err());
/// ```
pub fn validate_destination(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}
