//! Short-circuiting searches
//!
//! Both searches stop at the first non-empty result; later candidates are
//! never evaluated.

use ::url::Url;

use crate::registry::PathRule;

/// First present value among named keys.
///
/// `get` is called with each key in order until it returns a non-empty value.
pub fn first_present<K, F>(keys: &[K], mut get: F) -> Option<String>
where
    K: AsRef<str>,
    F: FnMut(&str) -> Option<String>,
{
    keys.iter()
        .find_map(|key| get(key.as_ref()).filter(|v| !v.is_empty()))
}

/// First successful extractor among path rules.
///
/// A rule is tried only if its matcher accepts `url`'s path. Returns the rule
/// that produced the value along with the value.
pub fn first_extracted<'r, I>(rules: I, url: &Url) -> Option<(&'r PathRule, String)>
where
    I: IntoIterator<Item = &'r PathRule>,
{
    let path = url.path();
    rules.into_iter().find_map(|rule| {
        if !rule.matcher().is_match(path) {
            return None;
        }
        rule.extractor()
            .extract(url)
            .filter(|v| !v.is_empty())
            .map(|v| (rule, v))
    })
}
