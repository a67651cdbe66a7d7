//! URL parsing and string utilities for extractors
//!
//! Parsing is delegated to the `url` crate. The helpers here reproduce the
//! browser-side view of a URL (`URL.host`, `URLSearchParams.get`) that the
//! registry rules were written against.

use std::borrow::Cow;

use ::url::Url;

// =============================================================================
// Parsing
// =============================================================================

/// Parse a raw request URL.
#[inline]
pub fn parse(raw: &str) -> Result<Url, ::url::ParseError> {
    Url::parse(raw)
}

/// Host used for registry lookup.
///
/// Includes the port when it is explicit and not the scheme default, so
/// `https://vk.com:8443/` is looked up as `vk.com:8443`.
pub fn lookup_host(url: &Url) -> Cow<'_, str> {
    let host = url.host_str().unwrap_or("");
    match url.port() {
        Some(port) => Cow::Owned(format!("{}:{}", host, port)),
        None => Cow::Borrowed(host),
    }
}

// =============================================================================
// Query Parameters
// =============================================================================

/// First value of a query parameter, form-decoded.
///
/// Missing keys and empty values both yield `None`.
pub fn search_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// String Transforms
// =============================================================================

/// Percent-decode a value once.
///
/// Returns `None` if the decoded bytes are not valid UTF-8.
pub fn decode(s: &str) -> Option<String> {
    match urlencoding::decode(s) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(e) => {
            log::warn!("Failed to decode '{}': {}", s, e);
            None
        }
    }
}

/// Everything before the last `:`.
///
/// Without a colon the result is empty.
#[inline]
pub fn strip_from_colon(s: &str) -> &str {
    match s.rfind(':') {
        Some(pos) => &s[..pos],
        None => "",
    }
}

/// Everything after the last `/` (the whole string if there is none).
#[inline]
pub fn pick_from_last_slash(s: &str) -> &str {
    match s.rfind('/') {
        Some(pos) => &s[pos + 1..],
        None => s,
    }
}
