//! DirectLink Core Library
//!
//! This crate provides the redirect-resolution engine for DirectLink. Given the
//! URL of a known redirector or tracking link, it finds the destination URL the
//! link carries and reports it as a redirect.
//!
//! # Architecture
//!
//! The engine operates on a static, immutable registry of sites. Each site maps
//! a host key (exact, or `*.`-prefixed for folded subdomains) to an ordered list
//! of path rules, and each rule pairs a compiled path matcher with an extractor.
//! Resolution is a pure computation over the request URL and the registry.
//!
//! # Modules
//!
//! - `url`: URL parsing and the string helpers extractors are built from
//! - `pattern`: Match-pattern compiler for path prefixes
//! - `host`: Subdomain folding onto wildcard registry keys
//! - `search`: Short-circuiting "first success" searches
//! - `extract`: Per-site extraction strategies
//! - `registry`: Site registry and the built-in rule set
//! - `subscriptions`: Match patterns for the host's request filter
//! - `resolver`: Top-level dispatch
//! - `types`: Shared type definitions

pub mod extract;
pub mod host;
pub mod pattern;
pub mod registry;
pub mod resolver;
pub mod search;
pub mod subscriptions;
pub mod types;
pub mod url;

// Re-export commonly used types
pub use extract::Extractor;
pub use host::{normalize_host, subdomain, FoldList};
pub use pattern::{compile, PathMatcher};
pub use registry::{builtin_registry, PathRule, Registry, RegistryError, Site};
pub use resolver::{resolve, resolve_url, ResolveError, Resolver};
pub use subscriptions::{build_subscriptions, subscriptions};
pub use types::{Redirect, Request};
