//! Skip-filters consulted by the tokenizer before a chunk is split into words.

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^.+@[^.].*\.[a-z]{2,}$").unwrap();
    // `[a-zA-z]` is kept as written; it also admits `[\]^_` and backtick in the scheme.
    static ref URL: Regex =
        Regex::new(r"^([a-zA-z]+://[^\s].*|<[a-zA-z]+://[^\s].*>)").unwrap();
    static ref SHEBANG: Regex = Regex::new(r"^#!/.+$").unwrap();
}

/// A predicate over a word candidate. Returning `true` removes the
/// candidate from spellchecking entirely.
pub trait Filter {
    fn skip(&self, candidate: &str) -> bool;
}

pub struct EmailFilter;

impl Filter for EmailFilter {
    fn skip(&self, candidate: &str) -> bool {
        EMAIL.is_match(candidate)
    }
}

/// Bare `scheme://...` URIs as well as the `<scheme://...>` form.
pub struct UrlFilter;

impl Filter for UrlFilter {
    fn skip(&self, candidate: &str) -> bool {
        URL.is_match(candidate)
    }
}

/// Interpreter lines such as `#!/usr/bin/env python`.
pub struct ShebangFilter;

impl Filter for ShebangFilter {
    fn skip(&self, candidate: &str) -> bool {
        SHEBANG.is_match(candidate)
    }
}

/// User supplied regular expressions, any of which skips the candidate.
pub struct PatternFilter {
    patterns: Vec<Regex>,
}

impl PatternFilter {
    /// Compile `patterns`, warning about and dropping the invalid ones.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut compiled = Vec::new();
        for pattern in patterns {
            match Regex::new(pattern.as_ref()) {
                Ok(re) => compiled.push(re),
                Err(e) => warn!("invalid ignore pattern '{}': {}", pattern.as_ref(), e),
            }
        }
        Self { patterns: compiled }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Filter for PatternFilter {
    fn skip(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(candidate))
    }
}

/// The built-in filters selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Email,
    Url,
    Shebang,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::Email, FilterKind::Url, FilterKind::Shebang];

    pub fn build(self) -> Box<dyn Filter> {
        match self {
            FilterKind::Email => Box::new(EmailFilter),
            FilterKind::Url => Box::new(UrlFilter),
            FilterKind::Shebang => Box::new(ShebangFilter),
        }
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(FilterKind::Email),
            "url" => Ok(FilterKind::Url),
            "shebang" => Ok(FilterKind::Shebang),
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Email => write!(f, "email"),
            FilterKind::Url => write!(f, "url"),
            FilterKind::Shebang => write!(f, "shebang"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_filter() {
        assert!(EmailFilter.skip("user@example.com"));
        assert!(EmailFilter.skip("h.goebel@crazy-compilers.com"));
        assert!(!EmailFilter.skip("user@localhost"));
        assert!(!EmailFilter.skip("@example.com"));
    }

    #[test]
    fn test_url_filter_bare_and_bracketed() {
        assert!(UrlFilter.skip("http://example.com/path"));
        assert!(UrlFilter.skip("HTTPS://example.com"));
        assert!(UrlFilter.skip("<http://example.com>"));
        assert!(!UrlFilter.skip("example.com"));
        assert!(!UrlFilter.skip("http:/example.com"));
        assert!(!UrlFilter.skip("http://"));
    }

    #[test]
    fn test_url_filter_keeps_loose_scheme_class() {
        // A-z spans the punctuation between the two letter ranges.
        assert!(UrlFilter.skip("git_ssh://host/repo"));
        assert!(!UrlFilter.skip("git-ssh://host/repo"));
    }

    #[test]
    fn test_shebang_filter() {
        assert!(ShebangFilter.skip("#!/usr/bin/env"));
        assert!(ShebangFilter.skip("#!/usr/bin/env python"));
        assert!(!ShebangFilter.skip("#!"));
        assert!(!ShebangFilter.skip("!/usr/bin/env"));
    }

    #[test]
    fn test_pattern_filter_drops_invalid() {
        let filter = PatternFilter::new(&["^[A-Z0-9_]{2,}$", "(unclosed"]);
        assert!(!filter.is_empty());
        assert!(filter.skip("MAX_SIZE"));
        assert!(!filter.skip("tpyo"));
    }

    #[test]
    fn test_filter_kind_from_str() {
        assert_eq!("URL".parse::<FilterKind>(), Ok(FilterKind::Url));
        assert!("markdown".parse::<FilterKind>().is_err());
    }
}
