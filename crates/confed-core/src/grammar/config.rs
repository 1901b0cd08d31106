//! Grammar configuration for one config-file dialect.
//!
//! A [`GrammarConfig`] is pure data: which character assigns a value, which
//! character starts a comment, and which characters may appear in names and
//! values.  Named presets for common formats (postgres, ssh, ...) are just
//! different `GrammarConfig` values and live outside this crate.

use thiserror::Error;

/// ASCII letters and digits, the base of every default character set.
pub const ALPHANUMERICS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Extra name characters of the default grammar.
const DEFAULT_NAME_EXTRA: &str = "_-.";

/// Extra value characters of the default grammar.
const DEFAULT_VALUE_EXTRA: &str = "_-./:,+@%";

/// Errors raised when a [`GrammarConfig`] cannot describe a usable grammar.
#[derive(Debug, Error, PartialEq)]
pub enum GrammarConfigError {
    /// No character may appear in a setting name, so nothing could ever match.
    #[error("name character set must not be empty")]
    EmptyNameChars,

    /// No character may appear in a bare value, so nothing could ever match.
    #[error("value character set must not be empty")]
    EmptyValueChars,

    /// The assign or comment character cannot act as a delimiter.
    #[error("invalid {role} character {ch:?}: whitespace and quotes cannot be delimiters")]
    InvalidCharacter { role: &'static str, ch: char },

    /// The regular expression assembled from the configuration was rejected.
    #[error("failed to compile line grammar: {0}")]
    Compile(String),
}

/// Describes how a single setting line is written in one config dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarConfig {
    /// The assignment character, or `None` when name and value are separated
    /// by whitespace only (e.g. `sshd_config`).
    pub assign: Option<char>,
    /// The comment character, or `None` when the format has no comments.
    pub comment: Option<char>,
    /// Every character legal in a setting name.
    pub name_chars: String,
    /// Every character legal in an unquoted value.  May contain spaces or
    /// tabs, in which case values keep their whitespace padding on replace.
    pub value_chars: String,
}

impl GrammarConfig {
    /// Creates a configuration from its four parts without validating it.
    pub fn new(
        assign: Option<char>,
        comment: Option<char>,
        name_chars: impl Into<String>,
        value_chars: impl Into<String>,
    ) -> Self {
        Self {
            assign,
            comment,
            name_chars: name_chars.into(),
            value_chars: value_chars.into(),
        }
    }

    /// Checks that the configuration can describe at least one setting line.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarConfigError::EmptyNameChars`] or
    /// [`GrammarConfigError::EmptyValueChars`] for empty character sets, and
    /// [`GrammarConfigError::InvalidCharacter`] if the assign or comment
    /// character is whitespace or a quote.
    pub fn validate(&self) -> Result<(), GrammarConfigError> {
        if self.name_chars.is_empty() {
            return Err(GrammarConfigError::EmptyNameChars);
        }
        if self.value_chars.is_empty() {
            return Err(GrammarConfigError::EmptyValueChars);
        }
        for (role, ch) in [("assign", self.assign), ("comment", self.comment)] {
            if let Some(ch) = ch {
                if ch.is_whitespace() || ch == '"' || ch == '\'' {
                    return Err(GrammarConfigError::InvalidCharacter { role, ch });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if `ch` may appear in an unquoted value.
    pub fn is_value_char(&self, ch: char) -> bool {
        self.value_chars.contains(ch)
    }

    /// Returns `true` if unquoted values may contain whitespace.
    pub fn value_allows_whitespace(&self) -> bool {
        self.value_chars.chars().any(char::is_whitespace)
    }
}

impl Default for GrammarConfig {
    /// `name = value  # comment` with common name and value characters.
    fn default() -> Self {
        Self {
            assign: Some('='),
            comment: Some('#'),
            name_chars: format!("{ALPHANUMERICS}{DEFAULT_NAME_EXTRA}"),
            value_chars: format!("{ALPHANUMERICS}{DEFAULT_VALUE_EXTRA}"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
