//! Line mutator: produces new line text and applies an [`EditPlan`].
//!
//! Replacement splices into the recorded spans of the original line, so
//! indentation, spacing around the assign character, quoting and trailing
//! whitespace survive untouched.  The input lines are never modified; a new
//! vector is returned.

use super::EditError;
use crate::domain::plan::EditPlan;
use crate::domain::request::{OperationRequest, RequestError};
use crate::grammar::config::GrammarConfig;
use crate::grammar::matcher::ParsedLine;
use crate::grammar::quoting;
use crate::lines::{is_terminated, split_line_ending};

/// Comment attached to a line that was commented out.
pub const DISABLED_MARKER: &str = "Disabled by confed";

/// Comment attached to a newly inserted line when the caller gave none.
pub const ADDED_MARKER: &str = "Added by confed";

/// Rewrites the value and/or trailing comment of `line`.
///
/// `new_value` of `None` keeps the existing value bytes.  `new_comment` of
/// `None` keeps the existing comment (or the absence of one).
pub fn replace_line(
    line: &str,
    parsed: &ParsedLine,
    config: &GrammarConfig,
    new_value: Option<&str>,
    new_comment: Option<&str>,
) -> String {
    let (body, eol) = split_line_ending(line);
    let mut out = body.to_string();
    let old_span = parsed.value_span.clone();
    let mut value_end = old_span.end;
    let mut comment_span = parsed.comment_span.clone();

    if let Some(value) = new_value {
        let rendered = render_value(&body[old_span.clone()], value, config);
        out.replace_range(old_span.clone(), &rendered);
        value_end = old_span.start + rendered.len();
        // The comment always follows the value: shift it by the length delta.
        comment_span = comment_span.map(|span| {
            let start = span.start - old_span.len() + rendered.len();
            start..start + span.len()
        });
    }

    if let Some(comment) = new_comment {
        match comment_span {
            Some(span) => out.replace_range(span, comment),
            None => {
                if let Some(cc) = config.comment {
                    out.insert_str(value_end, &format!(" {cc} {comment}"));
                }
            }
        }
    }

    out.push_str(eol);
    out
}

/// Comments `line` out, marking it as disabled.
///
/// The marker goes into the existing trailing comment when there is one and
/// the caller supplied no comment of their own; otherwise `(Disabled by
/// confed)` is added after the value, or replaces the existing comment text.
pub fn comment_out_line(
    line: &str,
    parsed: &ParsedLine,
    comment_char: char,
    explicit_comment: Option<&str>,
) -> String {
    let (body, eol) = split_line_ending(line);
    let mut out = body.to_string();

    match (&parsed.comment, &parsed.comment_span, explicit_comment) {
        (Some(existing), Some(span), None) => {
            let text = if existing.is_empty() && !out[..span.start].ends_with([' ', '\t']) {
                format!(" ({DISABLED_MARKER})")
            } else if existing.is_empty() {
                format!("({DISABLED_MARKER})")
            } else {
                format!("{existing} ({DISABLED_MARKER})")
            };
            out.replace_range(span.clone(), &text);
        }
        (_, Some(span), Some(_)) => out.replace_range(span.clone(), DISABLED_MARKER),
        _ => out.insert_str(parsed.value_span.end, &format!(" ({DISABLED_MARKER})")),
    }

    format!("{comment_char} {out}{eol}")
}

/// Renders a brand-new definition line, terminated with `\n`.
pub fn format_new_line(
    config: &GrammarConfig,
    prefix: &str,
    setting: &str,
    value: &str,
    comment: Option<&str>,
) -> String {
    let separator = match config.assign {
        Some(assign) => format!(" {assign} "),
        None => " ".to_string(),
    };
    let value = quoting::quote_if_needed(value, config);
    let comment = match (config.comment, comment) {
        (Some(cc), Some(text)) => format!(" {cc} {text}"),
        _ => String::new(),
    };
    format!("{prefix}{setting}{separator}{value}{comment}\n")
}

/// Applies `plan` to `lines`, returning the complete new file content.
///
/// # Errors
///
/// Returns [`EditError::InvalidRequest`] if the plan needs to comment a line
/// out but the grammar has no comment character.
pub fn apply_plan(
    lines: &[String],
    config: &GrammarConfig,
    request: &OperationRequest,
    plan: &EditPlan,
) -> Result<Vec<String>, EditError> {
    let mut out = lines.to_vec();
    let value = request.value.as_deref();

    match plan {
        EditPlan::Unchanged => {}
        EditPlan::ReplaceInPlace(target) => {
            out[target.index] = replace_line(
                &lines[target.index],
                target,
                config,
                value,
                request.comment.as_deref(),
            );
        }
        EditPlan::Delete(target) => {
            out.remove(target.index);
        }
        EditPlan::CommentOut(target) => {
            let cc = require_comment_char(config)?;
            out[target.index] =
                comment_out_line(&lines[target.index], target, cc, request.comment.as_deref());
        }
        EditPlan::CommentOutAndInsert(target) => {
            let cc = require_comment_char(config)?;
            out[target.index] =
                comment_out_line(&lines[target.index], target, cc, request.comment.as_deref());
            insert_new_line(&mut out, target.index + 1, &target.indent, config, request);
        }
        EditPlan::InsertAt { index, prefix } => {
            let index = (*index).min(out.len());
            insert_new_line(&mut out, index, prefix, config, request);
        }
        EditPlan::Append { blank_separator } => {
            if *blank_separator {
                let end = out.len();
                terminate_previous(&mut out, end);
                out.push("\n".to_string());
            }
            let end = out.len();
            insert_new_line(&mut out, end, "", config, request);
        }
    }

    Ok(out)
}

fn insert_new_line(
    out: &mut Vec<String>,
    index: usize,
    prefix: &str,
    config: &GrammarConfig,
    request: &OperationRequest,
) {
    let comment = request.comment.as_deref().unwrap_or(ADDED_MARKER);
    let value = request.value.as_deref().unwrap_or_default();
    terminate_previous(out, index);
    out.insert(
        index,
        format_new_line(config, prefix, &request.setting, value, Some(comment)),
    );
}

/// Makes sure the line before `index` ends with a terminator.
fn terminate_previous(out: &mut [String], index: usize) {
    if index > 0 {
        if let Some(previous) = out.get_mut(index - 1) {
            if !is_terminated(previous) {
                previous.push('\n');
            }
        }
    }
}

fn require_comment_char(config: &GrammarConfig) -> Result<char, EditError> {
    config.comment.ok_or_else(|| {
        RequestError::CommentCharRequired {
            reason: "commenting out a definition",
        }
        .into()
    })
}

/// Builds the replacement for an old value lexeme.
///
/// A quoted old value keeps its quote characters unless the new value is
/// quoted already or contains that quote character.  When values may contain
/// whitespace, the old value's leading and trailing padding is kept too.
fn render_value(old: &str, new: &str, config: &GrammarConfig) -> String {
    let (lead, core, trail) = if config.value_allows_whitespace() {
        let core = old.trim();
        let lead_len = old.len() - old.trim_start().len();
        (&old[..lead_len], core, &old[lead_len + core.len()..])
    } else {
        ("", old, "")
    };

    let inner = match quoting::quote_char(core) {
        _ if quoting::quote_char(new).is_some() => new.to_string(),
        Some(q) if !new.contains(q) => format!("{q}{new}{q}"),
        _ => quoting::quote_if_needed(new, config),
    };
    format!("{lead}{inner}{trail}")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::config::ALPHANUMERICS;
    use crate::grammar::matcher::LineGrammar;

    fn parse_with(config: &GrammarConfig, line: &str) -> ParsedLine {
        LineGrammar::new(config)
            .unwrap()
            .parse(0, line)
            .expect("test line must parse")
    }

    fn parse(line: &str) -> ParsedLine {
        parse_with(&GrammarConfig::default(), line)
    }

    // ── replace_line ──────────────────────────────────────────────────────────

    #[test]
    fn test_replace_keeps_spacing_and_terminator() {
        let line = "  port   =  5432\r\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), Some("6543"), None);
        assert_eq!(out, "  port   =  6543\r\n");
    }

    #[test]
    fn test_replace_preserves_double_quotes() {
        let line = "name = \"old\"\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), Some("new"), None);
        assert_eq!(out, "name = \"new\"\n");
    }

    #[test]
    fn test_replace_preserves_single_quotes() {
        let line = "name = 'old value'\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), Some("x y"), None);
        assert_eq!(out, "name = 'x y'\n");
    }

    #[test]
    fn test_replace_quoted_with_already_quoted_value() {
        let line = "listen_addresses = 'localhost'\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), Some("'*'"), None);
        assert_eq!(out, "listen_addresses = '*'\n");
    }

    #[test]
    fn test_replace_switches_quotes_when_value_holds_old_quote() {
        let line = "name = \"x\"\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), Some("a\"b"), None);
        assert_eq!(out, "name = 'a\"b'\n");
    }

    #[test]
    fn test_replace_quotes_value_that_needs_it() {
        let line = "name = old\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), Some("a b"), None);
        assert_eq!(out, "name = \"a b\"\n");
    }

    #[test]
    fn test_replace_keeps_existing_comment_when_none_given() {
        let line = "port = 1  # keep me\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), Some("12345"), None);
        assert_eq!(out, "port = 12345  # keep me\n");
    }

    #[test]
    fn test_replace_rewrites_comment_after_longer_value() {
        // Arrange: value grows, so the comment span must shift
        let line = "port = 1 #   old note  \n";

        // Act
        let out = replace_line(
            line,
            &parse(line),
            &GrammarConfig::default(),
            Some("65535"),
            Some("new note"),
        );

        // Assert: whitespace after '#' and trailing whitespace preserved
        assert_eq!(out, "port = 65535 #   new note  \n");
    }

    #[test]
    fn test_replace_rewrites_comment_after_shorter_value() {
        let line = "port = 65535 # old\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), Some("1"), Some("new"));
        assert_eq!(out, "port = 1 # new\n");
    }

    #[test]
    fn test_replace_appends_comment_when_absent() {
        let line = "port = 1\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), Some("2"), Some("note"));
        assert_eq!(out, "port = 2 # note\n");
    }

    #[test]
    fn test_replace_with_no_value_only_changes_comment() {
        let line = "port = 1 # a\n";
        let out = replace_line(line, &parse(line), &GrammarConfig::default(), None, Some("b"));
        assert_eq!(out, "port = 1 # b\n");
    }

    #[test]
    fn test_replace_keeps_padding_for_whitespace_values() {
        // Arrange
        let cfg = GrammarConfig::new(Some('='), Some('#'), ALPHANUMERICS, format!("{ALPHANUMERICS} "));
        let line = "Defaults = a b c   # x\n";

        // Act
        let out = replace_line(line, &parse_with(&cfg, line), &cfg, Some("d e"), None);

        // Assert
        assert_eq!(out, "Defaults = d e   # x\n");
    }

    // ── comment_out_line ──────────────────────────────────────────────────────

    #[test]
    fn test_comment_out_without_trailing_comment() {
        let line = "foo=1\n";
        assert_eq!(
            comment_out_line(line, &parse(line), '#', None),
            "# foo=1 (Disabled by confed)\n"
        );
    }

    #[test]
    fn test_comment_out_extends_existing_comment() {
        let line = "foo = 1 # tuned\n";
        assert_eq!(
            comment_out_line(line, &parse(line), '#', None),
            "# foo = 1 # tuned (Disabled by confed)\n"
        );
    }

    #[test]
    fn test_comment_out_with_explicit_comment_replaces_existing_comment() {
        let line = "foo = 1 # tuned\n";
        assert_eq!(
            comment_out_line(line, &parse(line), '#', Some("new value")),
            "# foo = 1 # Disabled by confed\n"
        );
    }

    #[test]
    fn test_comment_out_with_explicit_comment_and_no_trailing_comment() {
        let line = "foo = 1\n";
        assert_eq!(
            comment_out_line(line, &parse(line), '#', Some("new value")),
            "# foo = 1 (Disabled by confed)\n"
        );
    }

    #[test]
    fn test_comment_out_fills_empty_trailing_comment() {
        let line = "foo = 1 #\n";
        assert_eq!(
            comment_out_line(line, &parse(line), '#', None),
            "# foo = 1 # (Disabled by confed)\n"
        );
    }

    #[test]
    fn test_comment_out_uses_configured_comment_char() {
        let cfg = GrammarConfig::new(
            Some('='),
            Some(';'),
            format!("{ALPHANUMERICS}_"),
            ALPHANUMERICS,
        );
        let line = "memory_limit = 128M\n";
        assert_eq!(
            comment_out_line(line, &parse_with(&cfg, line), ';', None),
            "; memory_limit = 128M (Disabled by confed)\n"
        );
    }

    // ── format_new_line ───────────────────────────────────────────────────────

    #[test]
    fn test_format_new_line_with_assign_and_comment() {
        let out = format_new_line(&GrammarConfig::default(), "", "foo", "2", Some(ADDED_MARKER));
        assert_eq!(out, "foo = 2 # Added by confed\n");
    }

    #[test]
    fn test_format_new_line_whitespace_separated() {
        let cfg = GrammarConfig::new(None, Some('#'), ALPHANUMERICS, ALPHANUMERICS);
        let out = format_new_line(&cfg, "    ", "Port", "22", None);
        assert_eq!(out, "    Port 22\n");
    }

    #[test]
    fn test_format_new_line_without_comment_char_drops_comment() {
        let cfg = GrammarConfig::new(Some('='), None, ALPHANUMERICS, ALPHANUMERICS);
        let out = format_new_line(&cfg, "", "a", "1", Some("ignored"));
        assert_eq!(out, "a = 1\n");
    }

    // ── apply_plan ────────────────────────────────────────────────────────────

    #[test]
    fn test_apply_append_terminates_last_line_first() {
        // Arrange
        let lines = vec!["a = 1".to_string()];
        let request = OperationRequest::update("b", "2");

        // Act
        let out = apply_plan(
            &lines,
            &GrammarConfig::default(),
            &request,
            &EditPlan::Append { blank_separator: true },
        )
        .unwrap();

        // Assert
        assert_eq!(out.concat(), "a = 1\n\nb = 2 # Added by confed\n");
    }

    #[test]
    fn test_apply_unchanged_returns_copy() {
        let lines = vec!["a = 1\n".to_string()];
        let out = apply_plan(
            &lines,
            &GrammarConfig::default(),
            &OperationRequest::delete("x"),
            &EditPlan::Unchanged,
        )
        .unwrap();
        assert_eq!(out, lines);
    }

    #[test]
    fn test_apply_comment_out_without_comment_char_fails() {
        let cfg = GrammarConfig::new(Some('='), None, ALPHANUMERICS, ALPHANUMERICS);
        let lines = vec!["a = 1\n".to_string()];
        let target = parse_with(&cfg, &lines[0]);
        let result = apply_plan(
            &lines,
            &cfg,
            &OperationRequest::delete("a"),
            &EditPlan::CommentOut(target),
        );
        assert!(matches!(result, Err(EditError::InvalidRequest(_))));
    }
}
