//! Hierarchical vault key paths.
//!
//! A [`KeyPath`] is an ordered sequence of non-empty segments serialized
//! with `/` separators. Normalization strips leading and trailing
//! separators; anything beyond that (doubled separators, whitespace touching
//! a separator) is rejected rather than silently corrected.

use crate::errors::{Result, VaultError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Matches doubled separators and whitespace immediately adjacent to a
/// separator, the two malformations a normalized key may not contain.
static INVALID_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s/|/\s|//").expect("invalid key pattern is valid regex"));

/// A normalized, validated hierarchical secret identifier.
///
/// Two key paths are equal iff their normalized string forms match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(String);

impl KeyPath {
    /// Parse and normalize a raw key string.
    ///
    /// Leading and trailing separators are trimmed; the result must be
    /// non-empty and free of doubled separators and separator-adjacent
    /// whitespace.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim_matches('/');
        if normalized.is_empty() {
            return Err(VaultError::invalid_key(raw, "key must not be empty"));
        }
        if INVALID_KEY_PATTERN.is_match(normalized) {
            return Err(VaultError::invalid_key(
                raw,
                "key must not contain doubled separators or whitespace next to a separator",
            ));
        }
        Ok(Self(normalized.to_string()))
    }

    /// The normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path with the last segment stripped, or `None` for a
    /// single-segment path.
    pub fn parent(&self) -> Option<KeyPath> {
        self.0.rsplit_once('/').map(|(parent, _)| Self(parent.to_string()))
    }

    /// Proper ancestors of this path, ordered root first.
    ///
    /// For `a/b/c` this yields `a`, then `a/b`. The ordering lets the
    /// local-store backend materialize missing ancestors top-down so every
    /// entry's parent exists before the entry itself is created.
    pub fn ancestors(&self) -> Vec<KeyPath> {
        let mut chain = Vec::new();
        let mut current = self.parent();
        while let Some(path) = current {
            current = path.parent();
            chain.push(path);
        }
        chain.reverse();
        chain
    }

    /// Iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for KeyPath {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_strips_surrounding_separators() {
        assert_eq!(KeyPath::parse("/a/b/").unwrap().as_str(), "a/b");
        assert_eq!(KeyPath::parse("a/b").unwrap().as_str(), "a/b");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = KeyPath::parse("/a/b/c/").unwrap();
        let twice = KeyPath::parse(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        for raw in ["", "/", "a //b", "a// b", "a//b", "a /b", "a/ b"] {
            let err = KeyPath::parse(raw).unwrap_err();
            assert!(
                matches!(err, VaultError::InvalidKey { .. }),
                "expected InvalidKey for {:?}, got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_valid_keys_accepted() {
        for raw in ["a/b/c", "token", "user/2/api key", "a b/c d"] {
            assert!(KeyPath::parse(raw).is_ok(), "expected {:?} to be valid", raw);
        }
    }

    #[test]
    fn test_equality_on_normalized_form() {
        assert_eq!(KeyPath::parse("/a/b/").unwrap(), KeyPath::parse("a/b").unwrap());
        assert_ne!(KeyPath::parse("a/b").unwrap(), KeyPath::parse("a/c").unwrap());
    }

    #[test]
    fn test_parent() {
        let path = KeyPath::parse("a/b/c").unwrap();
        assert_eq!(path.parent().unwrap().as_str(), "a/b");
        assert_eq!(KeyPath::parse("a").unwrap().parent(), None);
    }

    #[test]
    fn test_ancestors_root_first() {
        let path = KeyPath::parse("a/b/c/d").unwrap();
        let chain: Vec<String> =
            path.ancestors().into_iter().map(|p| p.as_str().to_string()).collect();
        assert_eq!(chain, vec!["a", "a/b", "a/b/c"]);

        assert!(KeyPath::parse("a").unwrap().ancestors().is_empty());
    }

    #[test]
    fn test_segments() {
        let path = KeyPath::parse("a/b/c").unwrap();
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }
}
