//! Literal or regular-expression matching of setting names and values.

use regex::{Regex, RegexBuilder};

/// Decides whether a name (or value) read from the file is the one requested.
#[derive(Debug, Clone)]
pub enum SettingMatcher {
    /// Exact comparison.
    Literal {
        text: String,
        case_insensitive: bool,
    },
    /// Full match of an anchored regular expression.
    Pattern(Regex),
}

impl SettingMatcher {
    /// Builds a matcher for `text`.
    ///
    /// With `use_regex`, `text` must match the whole candidate, not a
    /// substring of it.
    ///
    /// # Errors
    ///
    /// Returns the [`regex::Error`] if `use_regex` is set and `text` is not a
    /// valid regular expression.
    pub fn new(text: &str, use_regex: bool, case_insensitive: bool) -> Result<Self, regex::Error> {
        if !use_regex {
            return Ok(Self::Literal {
                text: text.to_string(),
                case_insensitive,
            });
        }
        let regex = RegexBuilder::new(&format!("^(?:{text})$"))
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self::Pattern(regex))
    }

    /// Returns `true` if `candidate` is the requested name or value.
    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            Self::Literal {
                text,
                case_insensitive: false,
            } => text == candidate,
            Self::Literal {
                text,
                case_insensitive: true,
            } => text.to_lowercase() == candidate.to_lowercase(),
            Self::Pattern(regex) => regex.is_match(candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_requires_exact_match() {
        let m = SettingMatcher::new("port", false, false).unwrap();
        assert!(m.is_match("port"));
        assert!(!m.is_match("Port"));
        assert!(!m.is_match("ports"));
    }

    #[test]
    fn test_literal_case_insensitive() {
        let m = SettingMatcher::new("Port", false, true).unwrap();
        assert!(m.is_match("PORT"));
    }

    #[test]
    fn test_literal_treats_regex_metacharacters_as_text() {
        let m = SettingMatcher::new("a.b", false, false).unwrap();
        assert!(m.is_match("a.b"));
        assert!(!m.is_match("axb"));
    }

    #[test]
    fn test_pattern_requires_full_match() {
        let m = SettingMatcher::new("max_.*", true, false).unwrap();
        assert!(m.is_match("max_connections"));
        assert!(!m.is_match("the_max_connections"));
    }

    #[test]
    fn test_pattern_alternation_is_anchored_as_a_whole() {
        let m = SettingMatcher::new("a|b", true, false).unwrap();
        assert!(m.is_match("a"));
        assert!(!m.is_match("ab"));
    }

    #[test]
    fn test_pattern_case_insensitive() {
        let m = SettingMatcher::new("permit.*", true, true).unwrap();
        assert!(m.is_match("PermitRootLogin"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(SettingMatcher::new("(unclosed", true, false).is_err());
    }
}
