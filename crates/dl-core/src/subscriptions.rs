//! Request-filter match patterns
//!
//! The host only delivers requests that match one of these patterns, so the
//! resolver never sees traffic for unregistered hosts or paths.

use std::sync::OnceLock;

use crate::registry::{builtin_registry, Registry};

/// One `*://<host><path>*` pattern per registry entry, in registry order.
pub fn build_subscriptions(registry: &Registry) -> Vec<String> {
    registry
        .entries()
        .map(|(host, rule)| format!("*://{}{}*", host, rule.path()))
        .collect()
}

static SUBSCRIPTIONS: OnceLock<Vec<String>> = OnceLock::new();

/// Subscriptions for the built-in registry, computed once.
pub fn subscriptions() -> &'static [String] {
    SUBSCRIPTIONS.get_or_init(|| build_subscriptions(builtin_registry()))
}
