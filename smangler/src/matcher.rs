//! Name filter shared by the copy and delete operations.
//!
//! ```
//! use smangler::Matcher;
//!
//! let matcher = Matcher::new(Some("^app_"))?;
//! assert!(matcher.matches("app_name"));
//! assert!(!matcher.matches("title_app_"));
//! assert!(Matcher::new(None)?.matches_all());
//! # Ok::<(), smangler::Error>(())
//! ```

use std::fmt::Display;

use regex::Regex;

use crate::error::Error;

/// Filter over string names.
///
/// Holds an optional regular expression; without one every name matches.
/// Matching is a search anywhere in the name, so anchor the pattern (`^a`,
/// `_title$`) to match prefixes, suffixes or whole names.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Option<Regex>,
}

impl Matcher {
    /// Compiles `pattern`. `None` and the empty string both mean "match all".
    pub fn new(pattern: Option<&str>) -> Result<Self, Error> {
        let regex = match pattern {
            Some(p) if !p.is_empty() => Some(Regex::new(p)?),
            _ => None,
        };
        Ok(Matcher { regex })
    }

    pub fn all() -> Self {
        Matcher { regex: None }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().is_none_or(|regex| regex.is_match(name))
    }

    /// `true` when no pattern was given.
    pub fn matches_all(&self) -> bool {
        self.regex.is_none()
    }

    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::all()
    }
}

impl Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pattern() {
            Some(pattern) => write!(f, "/{}/", pattern),
            None => write!(f, "(all)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_pattern_matches_everything() {
        let matcher = Matcher::new(None).unwrap();
        assert!(matcher.matches("anything"));
        assert!(matcher.matches(""));
        assert!(matcher.matches_all());
        assert_eq!(matcher.to_string(), "(all)");
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let matcher = Matcher::new(Some("")).unwrap();
        assert!(matcher.matches_all());
        assert!(matcher.pattern().is_none());
    }

    #[test]
    fn test_pattern_is_searched_not_anchored() {
        let matcher = Matcher::new(Some("name")).unwrap();
        assert!(matcher.matches("app_name"));
        assert!(matcher.matches("name_short"));
        assert!(!matcher.matches("title"));
    }

    #[test]
    fn test_anchored_pattern() {
        let matcher = Matcher::new(Some("^a")).unwrap();
        assert!(matcher.matches("a1"));
        assert!(matcher.matches("a2"));
        assert!(!matcher.matches("b1"));
        assert!(!matcher.matches("ba"));
        assert_eq!(matcher.pattern(), Some("^a"));
        assert_eq!(matcher.to_string(), "/^a/");
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let result = Matcher::new(Some("(unclosed"));
        assert!(matches!(result, Err(Error::InvalidPattern(_))));
    }
}
