//! URL pattern matching primitives.
//!
//! Two tiers, matching the classifier's decision ladder:
//! 1. A fixed indicator set searched with an Aho-Corasick automaton
//!    (zero-allocation substring scan).
//! 2. A list of compiled regular expressions with full-string semantics:
//!    a pattern matches only if it spans the entire URL, so patterns
//!    behave like anchored matchers, not `contains` checks.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Fixed lexical indicators for ad/tracker URLs.
///
/// These are substring checks and deliberately cheap; the regex tier below
/// catches the structural cases.
const AD_INDICATORS: &[&str] = &[
    "/ad/",
    "/ads/",
    "pop-under",
    "popunder",
    "click.php",
    "track.php",
    "banner.",
    "analytics.",
    "tracker.",
];

static AD_INDICATOR_AUTOMATON: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(AD_INDICATORS).expect("static indicator set must compile")
});

/// Check a lowercase URL against the fixed ad/tracker indicator set.
#[inline]
pub fn has_ad_indicator(url: &str) -> bool {
    AD_INDICATOR_AUTOMATON.is_match(url)
}

/// Built-in regex patterns for structural ad-server URLs.
const BUILTIN_PATTERNS: &[&str] = &[
    r".*/ad[sx]?/.*",                         // /ad/, /ads/, /adx/ path segments
    r".*/banner[sx]?/.*",                     // banner images and scripts
    r".*/pop(up|under).*",                    // popup or popunder scripts
    r".*[a-z0-9-]{1,50}\.com/(ads|banners)/.*", // common ad folder structure
    r".*/pixel\.(gif|jpg|png).*",             // tracking pixels
    r".*/tracking/.*",                        // tracking scripts
    r".*/analytics\.js.*",                    // analytics scripts
    r".*/count\.js.*",                        // counting/tracking scripts
    r".*/beacon\.js.*",                       // tracking beacons
    r".*/affiliate/.*",                       // affiliate links
    r".*/(click|track|log)\.php.*",           // click tracking scripts
    r".*/metrics/.*",                         // metrics collection
];

/// Error for user-supplied pattern additions.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid URL pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled URL pattern with full-string match semantics.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    raw: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compile a pattern, rejecting malformed input at the point of
    /// addition. The expression is anchored so it must span the whole URL.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .case_insensitive(true)
            .build()
            .map_err(|source| PatternError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// True if the pattern matches the entire URL.
    #[inline]
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// The pattern source as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Compile the built-in pattern list.
pub fn builtin_patterns() -> Vec<UrlPattern> {
    BUILTIN_PATTERNS
        .iter()
        .map(|p| UrlPattern::compile(p).expect("built-in pattern must compile"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_hits() {
        assert!(has_ad_indicator("https://example.com/ads/unit.js"));
        assert!(has_ad_indicator("https://cdn.example.com/click.php?id=2"));
        assert!(has_ad_indicator("https://tracker.example.net/collect"));
        assert!(has_ad_indicator("https://x.com/banner.jpg"));
    }

    #[test]
    fn test_indicator_misses() {
        assert!(!has_ad_indicator("https://example.com/article/2024"));
        assert!(!has_ad_indicator("https://download.example.com/file.zip"));
    }

    #[test]
    fn test_builtin_patterns_compile() {
        assert_eq!(builtin_patterns().len(), 12);
    }

    #[test]
    fn test_full_string_semantics() {
        let pattern = UrlPattern::compile(r".*/tracking/.*").unwrap();
        assert!(pattern.matches("https://cdn.example.com/tracking/t.js"));

        // Anchored: a pattern without leading/trailing wildcards must span
        // the whole URL, it is not a substring search.
        let exact = UrlPattern::compile(r"https://a\.com/ads").unwrap();
        assert!(exact.matches("https://a.com/ads"));
        assert!(!exact.matches("https://a.com/ads/banner.js"));
        assert!(!exact.matches("prefix https://a.com/ads"));
    }

    #[test]
    fn test_case_insensitive() {
        let pattern = UrlPattern::compile(r".*/Pixel\.gif.*").unwrap();
        assert!(pattern.matches("https://x.com/PIXEL.GIF?cachebust=1"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = UrlPattern::compile("([unclosed").unwrap_err();
        assert!(matches!(err, PatternError::InvalidPattern { .. }));
    }
}
