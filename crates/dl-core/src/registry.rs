//! Site registry
//!
//! The registry maps a host key to an ordered list of path rules. Keys are
//! either literal hosts (`twitter.com`) or wildcard hosts (`*.curseforge.com`)
//! reached through subdomain folding. A registry is built once and is
//! read-only afterwards.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::extract::Extractor;
use crate::host::FoldList;
use crate::pattern::{compile, PathMatcher};

/// Error type for registry validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid host key: {0:?}")]
    BadHostKey(String),
    #[error("Host key {0:?} normalizes onto an existing key")]
    DuplicateHost(String),
    #[error("Wildcard key {0:?} has no matching fold domain")]
    UnfoldedWildcard(String),
    #[error("Literal key {0:?} is folded away and can never match")]
    FoldedLiteral(String),
}

// =============================================================================
// Rules and Sites
// =============================================================================

/// A path prefix paired with the extractor that runs when it matches.
#[derive(Debug, Clone)]
pub struct PathRule {
    path: String,
    matcher: PathMatcher,
    extractor: Extractor,
}

impl PathRule {
    /// Create a rule, compiling `path` eagerly.
    pub fn new(path: impl Into<String>, extractor: Extractor) -> Self {
        let path = path.into();
        let matcher = compile(&path);
        Self { path, matcher, extractor }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn matcher(&self) -> &PathMatcher {
        &self.matcher
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }
}

/// All rules for one host key.
#[derive(Debug, Clone)]
pub struct Site {
    host: String,
    rules: Vec<PathRule>,
}

impl Site {
    pub fn new(host: impl Into<String>, rules: Vec<PathRule>) -> Self {
        Self {
            host: host.into(),
            rules,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn rules(&self) -> &[PathRule] {
        &self.rules
    }

    /// Whether the key is a `*.` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.host.starts_with("*.")
    }
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug, Clone)]
pub struct Registry {
    sites: Vec<Site>,
    fold_list: FoldList,
}

impl Registry {
    pub fn new(sites: Vec<Site>, fold_list: FoldList) -> Self {
        Self { sites, fold_list }
    }

    /// Sites in registration order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn fold_list(&self) -> &FoldList {
        &self.fold_list
    }

    /// Site stored under an exact key.
    pub fn get(&self, key: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.host == key)
    }

    /// Site for a request host, after subdomain folding.
    pub fn lookup(&self, host: &str) -> Option<&Site> {
        self.get(&self.fold_list.normalize(host))
    }

    /// Every (host key, rule) pair in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PathRule)> {
        self.sites
            .iter()
            .flat_map(|site| site.rules.iter().map(move |rule| (site.host(), rule)))
    }

    /// Check the key invariants.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen: HashSet<String> = HashSet::with_capacity(self.sites.len());

        for site in &self.sites {
            let host = site.host();
            if !is_valid_host_key(host) {
                return Err(RegistryError::BadHostKey(host.to_string()));
            }

            if let Some(domain) = host.strip_prefix("*.") {
                if !self.fold_list.contains(domain) {
                    return Err(RegistryError::UnfoldedWildcard(host.to_string()));
                }
            } else if self.fold_list.normalize(host) != host {
                return Err(RegistryError::FoldedLiteral(host.to_string()));
            }

            if !seen.insert(self.fold_list.normalize(host).into_owned()) {
                return Err(RegistryError::DuplicateHost(host.to_string()));
            }
        }

        Ok(())
    }
}

fn is_valid_host_key(host: &str) -> bool {
    let literal = host.strip_prefix("*.").unwrap_or(host);
    !literal.is_empty()
        && !literal.starts_with('.')
        && literal
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b':')
}

// =============================================================================
// Built-in Rules
// =============================================================================

static BUILTIN: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry of known redirectors.
pub fn builtin_registry() -> &'static Registry {
    BUILTIN.get_or_init(|| {
        let registry = Registry::new(builtin_sites(), FoldList::default());
        log::debug!(
            "Built-in registry ready: {} sites, {} rules",
            registry.sites().len(),
            registry.entries().count()
        );
        registry
    })
}

fn google_paths() -> Vec<PathRule> {
    vec![
        PathRule::new("/imgres", Extractor::first_param(&["imgurl", "imgrefurl"])),
        PathRule::new("/url", Extractor::first_param(&["q", "url"])),
    ]
}

fn single(host: &str, path: &str, extractor: Extractor) -> Site {
    Site::new(host, vec![PathRule::new(path, extractor)])
}

fn builtin_sites() -> Vec<Site> {
    vec![
        // https://wow.curseforge.com/linkout?remoteUrl=http%253a%252f%252fi.imgur.com%252f1AjSgEH.png
        single("*.curseforge.com", "/linkout", Extractor::param("remoteUrl")),
        single("*.digidip.net", "/visit", Extractor::param("url")),
        single("disq.us", "/url", Extractor::param("url").strip_from_colon()),
        single("console.ebsta.com", "/linktracking/track.aspx", Extractor::param("linkuri")),
        single("exit.sc", "/", Extractor::param("url")),
        single("l.facebook.com", "/l.php", Extractor::param("u")),
        single("gate.sc", "/", Extractor::param("url")),
        Site::new("www.google.co.jp", google_paths()),
        single("news.url.google.com", "/url", Extractor::param("url")),
        single("plus.url.google.com", "/url", Extractor::param("url")),
        Site::new("www.google.com", google_paths()),
        single("l.instagram.com", "/", Extractor::param("u")),
        single("www.javlibrary.com", "/en/redirect.php", Extractor::param("url")),
        single("l.messenger.com", "/l.php", Extractor::param("u")),
        // https://outgoing.prod.mozaws.net/v1/<hash>/https%3A//developer.mozilla.org/...
        single("outgoing.prod.mozaws.net", "/v1/", Extractor::LastPathSegment.decoded()),
        single("gcc01.safelinks.protection.outlook.com", "/", Extractor::param("url")),
        single("slack-redir.net", "/link", Extractor::param("url")),
        single("steamcommunity.com", "/linkfilter/", Extractor::param("url")),
        single("twitter.com", "/i/redirect", Extractor::param("url")),
        single("t.umblr.com", "/redirect", Extractor::param("z")),
        single("vk.com", "/away.php", Extractor::param("to")),
        single("workable.com", "/nr", Extractor::param("l")),
        single("www.youtube.com", "/redirect", Extractor::param("q")),
    ]
}
