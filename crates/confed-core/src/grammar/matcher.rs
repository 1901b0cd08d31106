//! Compiled line grammar.
//!
//! [`LineGrammar::new`] turns a [`GrammarConfig`] into one anchored regular
//! expression.  The expression is built once per edit and then applied to
//! every line, so the character classes are never rebuilt mid-scan.
//!
//! The recorded spans are byte offsets into the *original* line (terminator
//! included in the line, excluded from the match), which lets the mutator
//! splice a new value in without disturbing anything around it.

use std::ops::Range;

use regex::Regex;

use super::config::{GrammarConfig, GrammarConfigError};
use super::quoting;
use crate::lines::split_line_ending;

/// Balanced single- or double-quoted string, backslash escapes allowed.
const QUOTED: &str = r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#;

/// One setting definition recognised on a single line.
///
/// Produced fresh for each line during a scan.  The spans are only valid
/// against the exact line text the grammar was applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// 0-based index of the line in the file.
    pub index: usize,
    /// Leading whitespace before the setting (or before its comment marker).
    pub indent: String,
    /// The setting name.
    pub name: String,
    /// The raw value lexeme, quotes and whitespace padding included.
    pub value: String,
    /// Byte range of [`Self::value`] within the line.
    pub value_span: Range<usize>,
    /// Text of the trailing comment, without the comment character and the
    /// whitespace that follows it.
    pub comment: Option<String>,
    /// Byte range of [`Self::comment`] within the line.
    pub comment_span: Option<Range<usize>>,
    /// `true` if the whole definition sits behind a comment character.
    pub is_commented_out: bool,
}

impl ParsedLine {
    /// The value with padding and one pair of enclosing quotes removed.
    pub fn unquoted_value(&self) -> &str {
        quoting::unquote(self.value.trim())
    }
}

/// A line matcher compiled from one [`GrammarConfig`].
#[derive(Debug, Clone)]
pub struct LineGrammar {
    config: GrammarConfig,
    regex: Regex,
}

impl LineGrammar {
    /// Validates `config` and compiles it into a matcher.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarConfigError`] if the configuration is invalid or the
    /// assembled expression cannot be compiled.
    pub fn new(config: &GrammarConfig) -> Result<Self, GrammarConfigError> {
        config.validate()?;
        let pattern = build_pattern(config);
        let regex =
            Regex::new(&pattern).map_err(|e| GrammarConfigError::Compile(e.to_string()))?;
        Ok(Self {
            config: config.clone(),
            regex,
        })
    }

    /// The configuration this grammar was compiled from.
    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Recognises `line` as a setting definition.
    ///
    /// Returns `None` when the line is not a setting (blank lines, prose
    /// comments, section headers, ...).  Such lines are passed through
    /// unchanged by the edit.
    pub fn parse(&self, index: usize, line: &str) -> Option<ParsedLine> {
        let (body, _) = split_line_ending(line);
        let caps = self.regex.captures(body)?;

        let name = caps.name("name")?;
        let value = caps.name("value")?;
        let comment = caps.name("ctext");

        Some(ParsedLine {
            index,
            indent: caps
                .name("indent")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            name: name.as_str().to_string(),
            value: value.as_str().to_string(),
            value_span: value.range(),
            comment: comment.map(|m| m.as_str().to_string()),
            comment_span: comment.map(|m| m.range()),
            is_commented_out: caps.name("marker").is_some(),
        })
    }
}

/// Assembles the anchored expression for `config`.
fn build_pattern(config: &GrammarConfig) -> String {
    let padded_values = config.value_allows_whitespace();
    let comment = config.comment.map(escape_char);

    let mut pattern = String::from(r"^(?P<indent>[ \t]*)");
    if let Some(c) = &comment {
        pattern.push_str(&format!(r"(?:(?P<marker>{c})[ \t]*)?"));
    }

    pattern.push_str(&format!("(?P<name>[{}]+)", char_class(&config.name_chars)));

    // When values may contain whitespace the padding belongs to the value, so
    // the separator must not swallow it.
    let separator = match (config.assign.map(escape_char), padded_values) {
        (Some(a), false) => format!(r"(?:[ \t]*{a}[ \t]*|[ \t]+)"),
        (Some(a), true) => format!(r"(?:[ \t]*{a}|[ \t])"),
        (None, false) => r"[ \t]+".to_string(),
        (None, true) => r"[ \t]".to_string(),
    };
    pattern.push_str(&separator);

    let run = format!("[{}]+", char_class(&config.value_chars));
    let value = if padded_values {
        format!(r"[ \t]*(?:{QUOTED})[ \t]*|{run}")
    } else {
        format!("{QUOTED}|{run}")
    };
    pattern.push_str(&format!("(?P<value>{value})"));

    if let Some(c) = &comment {
        pattern.push_str(&format!(r"(?:[ \t]*{c}[ \t]*(?P<ctext>.*?))?"));
    }
    pattern.push_str(r"[ \t]*$");
    pattern
}

fn escape_char(ch: char) -> String {
    regex::escape(ch.encode_utf8(&mut [0; 4]))
}

fn char_class(chars: &str) -> String {
    chars.chars().map(escape_char).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
