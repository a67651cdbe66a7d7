//! Core type definitions for DirectLink
//!
//! These types form the boundary with the host's request-interception hook.

use serde::Serialize;

// =============================================================================
// Request
// =============================================================================

/// An intercepted request, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    /// Full request URL
    pub url: &'a str,
}

impl<'a> Request<'a> {
    pub fn new(url: &'a str) -> Self {
        Self { url }
    }
}

impl<'a> From<&'a str> for Request<'a> {
    fn from(url: &'a str) -> Self {
        Self { url }
    }
}

// =============================================================================
// Redirect
// =============================================================================

/// Decision to replace a navigation with the unwrapped destination.
///
/// Serializes as `{ "redirectUrl": "..." }`, the shape a blocking
/// request listener returns to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub redirect_url: String,
}

impl Redirect {
    pub fn new(redirect_url: impl Into<String>) -> Self {
        Self {
            redirect_url: redirect_url.into(),
        }
    }
}
