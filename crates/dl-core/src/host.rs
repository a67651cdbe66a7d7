//! Subdomain folding
//!
//! Hosts under a folded base domain (any label in front of it) are looked up
//! under the wildcard key `*.<domain>`. The bare domain itself is not folded,
//! so `curseforge.com` and `*.curseforge.com` remain distinct registry keys.

use std::borrow::Cow;

/// Base domains whose subdomains fold onto a wildcard key.
pub const DEFAULT_FOLD_DOMAINS: &[&str] = &["curseforge.com", "digidip.net"];

/// Ordered set of base domains to fold. First match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldList {
    domains: Vec<String>,
}

impl FoldList {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    /// Check whether `domain` is in the list.
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    /// Normalize a host to its registry key.
    pub fn normalize<'h>(&self, host: &'h str) -> Cow<'h, str> {
        match self.domains.iter().find(|d| folds_onto(host, d)) {
            Some(domain) => Cow::Owned(format!("*.{}", domain)),
            None => Cow::Borrowed(host),
        }
    }
}

impl Default for FoldList {
    fn default() -> Self {
        Self::new(DEFAULT_FOLD_DOMAINS.iter().copied())
    }
}

/// True if `domain` is the tail of `host` on a label boundary, with at least
/// one character in front of it.
#[inline]
fn folds_onto(host: &str, domain: &str) -> bool {
    let Some(prefix) = host.strip_suffix(domain) else {
        return false;
    };
    !prefix.is_empty() && prefix.ends_with('.')
}

/// Normalize a host against the default fold list.
pub fn normalize_host(host: &str) -> Cow<'_, str> {
    crate::registry::builtin_registry().fold_list().normalize(host)
}

/// Owned form of [`normalize_host`].
pub fn subdomain(host: &str) -> String {
    normalize_host(host).into_owned()
}
