//! Extraction strategies
//!
//! An [`Extractor`] pulls the embedded destination out of a parsed redirector
//! URL. Leaf strategies read a source (a query parameter, several candidate
//! parameters, or the last path segment); wrapping strategies post-process
//! whatever their inner extractor produced.

use std::fmt;

use ::url::Url;

use crate::search::first_present;
use crate::url::{decode, pick_from_last_slash, search_param, strip_from_colon};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extractor {
    /// One named query parameter
    Param(&'static str),
    /// First present query parameter among several names
    FirstParam(&'static [&'static str]),
    /// Path segment after the last `/`
    LastPathSegment,
    /// Percent-decode the inner value once
    Decode(Box<Extractor>),
    /// Keep the inner value up to its last `:`
    StripFromColon(Box<Extractor>),
}

impl Extractor {
    pub const fn param(key: &'static str) -> Self {
        Self::Param(key)
    }

    pub const fn first_param(keys: &'static [&'static str]) -> Self {
        Self::FirstParam(keys)
    }

    pub fn decoded(self) -> Self {
        Self::Decode(Box::new(self))
    }

    pub fn strip_from_colon(self) -> Self {
        Self::StripFromColon(Box::new(self))
    }

    /// Run the strategy. `None` (or an empty string) means nothing found.
    pub fn extract(&self, url: &Url) -> Option<String> {
        match self {
            Self::Param(key) => search_param(url, key),
            Self::FirstParam(keys) => first_present(*keys, |key| search_param(url, key)),
            Self::LastPathSegment => Some(pick_from_last_slash(url.path()).to_string()),
            Self::Decode(inner) => inner.extract(url).and_then(|v| decode(&v)),
            Self::StripFromColon(inner) => inner.extract(url).map(|v| strip_from_colon(&v).to_string()),
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param(key) => write!(f, "param({})", key),
            Self::FirstParam(keys) => write!(f, "first({})", keys.join(", ")),
            Self::LastPathSegment => f.write_str("last-segment"),
            Self::Decode(inner) => write!(f, "decode({})", inner),
            Self::StripFromColon(inner) => write!(f, "strip-colon({})", inner),
        }
    }
}
