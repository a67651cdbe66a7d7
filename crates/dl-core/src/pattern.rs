//! Match-pattern compiler for path prefixes
//!
//! A match pattern uses two special tokens: `.` (a literal dot) and `*`
//! (any sequence). Only the first occurrence of each is translated; the rest
//! of the pattern is passed through to the regex as-is. Every registered path
//! uses at most one of either token.

use regex::Regex;

/// Predicate over a URL path, anchored at the start.
#[derive(Debug, Clone)]
pub enum PathMatcher {
    /// Compiled `^...` regex
    Regex(Regex),
    /// Literal prefix, used when the translated pattern is not a valid regex
    Prefix(String),
}

impl PathMatcher {
    /// Test a path against this matcher.
    #[inline]
    pub fn is_match(&self, path: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(path),
            Self::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

/// Translate a match pattern into regex source.
pub fn to_regex_source(pattern: &str) -> String {
    let translated = pattern.replacen('.', "\\.", 1).replacen('*', ".*", 1);
    format!("^{}", translated)
}

/// Compile a match pattern into a path matcher.
///
/// Never fails: a pattern whose translation is not a valid regex degrades
/// to a literal prefix test on the raw pattern.
pub fn compile(pattern: &str) -> PathMatcher {
    let source = to_regex_source(pattern);
    match Regex::new(&source) {
        Ok(re) => PathMatcher::Regex(re),
        Err(e) => {
            log::warn!("Pattern '{}' is not a valid regex ({}), matching as literal prefix", pattern, e);
            PathMatcher::Prefix(pattern.to_string())
        }
    }
}
