//! The operation a caller asks for.

use thiserror::Error;

use crate::grammar::config::GrammarConfig;

/// Reasons an [`OperationRequest`] cannot be carried out with a given grammar.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The setting name (or pattern) is empty.
    #[error("setting name must not be empty")]
    EmptySetting,

    /// An update was requested without a value to write.
    #[error("a value is required to update '{setting}'")]
    MissingValue { setting: String },

    /// Keep mode or an explicit comment needs a comment character.
    #[error("{reason} requires a comment character, but the grammar has none")]
    CommentCharRequired { reason: &'static str },
}

/// Describes one edit of one setting.
///
/// Build it with [`OperationRequest::update`] or [`OperationRequest::delete`]
/// and refine it with the builder methods:
///
/// ```rust
/// use confed_core::OperationRequest;
///
/// let request = OperationRequest::update("listen_addresses", "'*'")
///     .after("port")
///     .comment("open to the LAN")
///     .keep(true);
/// assert!(request.keep);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationRequest {
    /// Name of the setting, or a regular expression when `use_regex` is set.
    pub setting: String,
    /// Value to write.  For deletes in multiple mode, the value to delete.
    pub value: Option<String>,
    /// Insert a new definition before the first active definition of this
    /// setting.  Matched literally, honouring `case_insensitive`.
    pub before: Option<String>,
    /// Insert a new definition after the first active definition of this
    /// setting.  Matched literally, honouring `case_insensitive`.
    pub after: Option<String>,
    /// Comment to attach to the written definition.
    pub comment: Option<String>,
    /// Comment out the old definition instead of overwriting or removing it.
    pub keep: bool,
    /// Remove (or, with `keep`, comment out) the definition.
    pub delete: bool,
    /// Allow several active definitions of the setting; values then select
    /// which one is targeted.
    pub multiple: bool,
    /// Treat `setting` (and `value` in multiple mode) as regular expressions.
    pub use_regex: bool,
    /// Match names and values without regard to case.
    pub case_insensitive: bool,
}

impl OperationRequest {
    /// Sets `setting` to `value`.
    pub fn update(setting: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            setting: setting.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Deletes `setting`.
    pub fn delete(setting: impl Into<String>) -> Self {
        Self {
            setting: setting.into(),
            delete: true,
            ..Self::default()
        }
    }

    /// Restricts a multiple-mode delete to the definition holding `value`.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn before(mut self, setting: impl Into<String>) -> Self {
        self.before = Some(setting.into());
        self
    }

    pub fn after(mut self, setting: impl Into<String>) -> Self {
        self.after = Some(setting.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn use_regex(mut self, use_regex: bool) -> Self {
        self.use_regex = use_regex;
        self
    }

    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Returns `true` if commented-out definitions are worth tracking, i.e.
    /// the operation may need to restore one.
    pub fn tracks_commented(&self) -> bool {
        !(self.delete && self.value.is_none())
    }

    /// Checks the request against the grammar it will run with.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the setting is empty, an update carries no
    /// value, or keep mode / an explicit comment is used with a grammar that
    /// has no comment character.
    pub fn validate(&self, grammar: &GrammarConfig) -> Result<(), RequestError> {
        if self.setting.is_empty() {
            return Err(RequestError::EmptySetting);
        }
        if !self.delete && self.value.is_none() {
            return Err(RequestError::MissingValue {
                setting: self.setting.clone(),
            });
        }
        if grammar.comment.is_none() {
            if self.keep {
                return Err(RequestError::CommentCharRequired { reason: "keep mode" });
            }
            if self.comment.is_some() {
                return Err(RequestError::CommentCharRequired {
                    reason: "an explicit comment",
                });
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
