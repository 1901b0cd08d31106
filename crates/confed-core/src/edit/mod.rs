//! The edit operation: scanning, planning and mutating.
//!
//! One call to [`update_setting`] walks through
//! `Scanning → Planning → Mutating → Done` exactly once.  It either returns
//! the complete new file content or fails without producing any output, so
//! the caller's file is never left half-edited.

use thiserror::Error;
use tracing::debug;

use crate::domain::plan::EditPlan;
use crate::domain::request::{OperationRequest, RequestError};
use crate::grammar::config::{GrammarConfig, GrammarConfigError};
use crate::grammar::matcher::LineGrammar;

pub mod mutator;
pub mod planner;
pub mod scanner;

/// Errors that abort an edit operation.
#[derive(Debug, Error)]
pub enum EditError {
    /// The grammar configuration is unusable.
    #[error("invalid grammar: {0}")]
    Grammar(#[from] GrammarConfigError),

    /// The request cannot be carried out with this grammar.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    /// The setting or value is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The setting is actively defined more than once and multiple mode is off.
    #[error(
        "setting '{setting}' is defined more than once (lines {first_line} and {second_line}); \
         use multiple mode to allow this"
    )]
    MultipleDefinitions {
        setting: String,
        first_line: usize,
        second_line: usize,
    },
}

/// The new file content together with the plan that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Complete updated file content, one entry per line.
    pub lines: Vec<String>,
    /// The edit that was applied.
    pub plan: EditPlan,
}

/// Applies `request` to `lines` and returns the complete updated content.
///
/// `lines` must be the whole file, each line keeping its own terminator (see
/// [`crate::split_lines`]).  Lines the grammar does not recognise come back
/// byte for byte.
///
/// # Errors
///
/// Returns [`EditError`] if the grammar or request is invalid, a pattern does
/// not compile, or the setting is ambiguous (see
/// [`EditError::MultipleDefinitions`]).
///
/// # Examples
///
/// ```rust
/// use confed_core::{split_lines, update_setting, GrammarConfig, OperationRequest};
///
/// let lines = split_lines("foo=1\n");
/// let request = OperationRequest::update("foo", "2").keep(true);
/// let out = update_setting(&lines, &GrammarConfig::default(), &request).unwrap();
/// assert_eq!(out.concat(), "# foo=1 (Disabled by confed)\nfoo = 2 # Added by confed\n");
/// ```
pub fn update_setting(
    lines: &[String],
    config: &GrammarConfig,
    request: &OperationRequest,
) -> Result<Vec<String>, EditError> {
    Ok(update_setting_with_plan(lines, config, request)?.lines)
}

/// Same as [`update_setting`], but also reports which edit was made.
///
/// # Errors
///
/// See [`update_setting`].
pub fn update_setting_with_plan(
    lines: &[String],
    config: &GrammarConfig,
    request: &OperationRequest,
) -> Result<EditOutcome, EditError> {
    request.validate(config)?;
    let grammar = LineGrammar::new(config)?;

    let state = scanner::scan(&grammar, lines, request)?;
    debug!(
        active = ?state.active.as_ref().map(|l| l.index + 1),
        commented = ?state.commented.as_ref().map(|l| l.index + 1),
        insert_at = ?state.insert_at,
        "scan finished"
    );

    let plan = planner::plan(state, request);
    let lines = mutator::apply_plan(lines, config, request, &plan)?;
    Ok(EditOutcome { lines, plan })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
