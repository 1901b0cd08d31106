//! Line scanner: one pass over the file, collecting candidates.

use tracing::{debug, trace};

use super::EditError;
use crate::domain::request::OperationRequest;
use crate::domain::scan_state::ScanState;
use crate::domain::setting_matcher::SettingMatcher;
use crate::grammar::matcher::LineGrammar;

/// Scans `lines` for definitions of the requested setting.
///
/// # Errors
///
/// Returns [`EditError::InvalidPattern`] if the setting or value is not a
/// valid regular expression in regex mode, and
/// [`EditError::MultipleDefinitions`] if the setting is actively defined more
/// than once without multiple mode.
pub fn scan(
    grammar: &LineGrammar,
    lines: &[String],
    request: &OperationRequest,
) -> Result<ScanState, EditError> {
    let name_matcher = build_matcher(&request.setting, request)?;
    let value_matcher = match (&request.value, request.multiple) {
        (Some(value), true) => Some(build_matcher(value, request)?),
        _ => None,
    };
    let before = anchor_matcher(request.before.as_deref(), request)?;
    let after = anchor_matcher(request.after.as_deref(), request)?;
    let track_commented = request.tracks_commented();

    let mut state = ScanState::new(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let Some(parsed) = grammar.parse(index, line) else {
            state.record_unparsed(line);
            continue;
        };
        state.record_parsed();
        trace!(
            line = index + 1,
            name = %parsed.name,
            commented = parsed.is_commented_out,
            "parsed setting line"
        );

        let name_matches = name_matcher.is_match(&parsed.name);

        if !parsed.is_commented_out {
            if before.as_ref().is_some_and(|m| m.is_match(&parsed.name)) {
                state.record_anchor(index);
            } else if after.as_ref().is_some_and(|m| m.is_match(&parsed.name)) {
                state.record_anchor(index + 1);
            }
        }
        // Commented definitions move the insertion point too.
        if request.multiple && name_matches {
            state.record_multiple_match(index, &parsed.indent);
        }

        if !name_matches {
            continue;
        }
        if let Some(matcher) = &value_matcher {
            if !matcher.is_match(parsed.unquoted_value()) {
                continue;
            }
        }

        if parsed.is_commented_out {
            if track_commented {
                debug!(line = index + 1, "commented-out candidate");
                state.record_commented(parsed);
            }
        } else {
            debug!(line = index + 1, "active candidate");
            state
                .record_active(parsed, request.multiple)
                .map_err(|dup| EditError::MultipleDefinitions {
                    setting: request.setting.clone(),
                    first_line: dup.first_line,
                    second_line: dup.second_line,
                })?;
        }
    }

    Ok(state)
}

fn build_matcher(text: &str, request: &OperationRequest) -> Result<SettingMatcher, EditError> {
    SettingMatcher::new(text, request.use_regex, request.case_insensitive).map_err(|source| {
        EditError::InvalidPattern {
            pattern: text.to_string(),
            source,
        }
    })
}

/// `before`/`after` name a setting literally, folded like the target name.
fn anchor_matcher(
    anchor: Option<&str>,
    request: &OperationRequest,
) -> Result<Option<SettingMatcher>, EditError> {
    anchor
        .map(|text| {
            SettingMatcher::new(text, false, request.case_insensitive).map_err(|source| {
                EditError::InvalidPattern {
                    pattern: text.to_string(),
                    source,
                }
            })
        })
        .transpose()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
