//! The single edit chosen for an operation.

use crate::grammar::matcher::ParsedLine;

/// What the mutator will do to the file.
///
/// Line-targeted variants carry the [`ParsedLine`] of the target so the
/// mutator can splice against its recorded spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPlan {
    /// Replace the value (and optionally the comment) of the line in place.
    ReplaceInPlace(ParsedLine),
    /// Comment the line out.
    CommentOut(ParsedLine),
    /// Comment the line out and insert the new definition right after it.
    CommentOutAndInsert(ParsedLine),
    /// Remove the line.
    Delete(ParsedLine),
    /// Insert a new definition at `index`, indented with `prefix`.
    InsertAt { index: usize, prefix: String },
    /// Append a new definition at the end of the file, preceded by a blank
    /// line when `blank_separator` is set.
    Append { blank_separator: bool },
    /// Nothing to do.
    Unchanged,
}

impl EditPlan {
    /// Short human-readable description, used for logging.
    pub fn describe(&self) -> String {
        match self {
            Self::ReplaceInPlace(line) => format!("replace line {}", line.index + 1),
            Self::CommentOut(line) => format!("comment out line {}", line.index + 1),
            Self::CommentOutAndInsert(line) => format!(
                "comment out line {} and insert after it",
                line.index + 1
            ),
            Self::Delete(line) => format!("delete line {}", line.index + 1),
            Self::InsertAt { index, .. } => format!("insert at line {}", index + 1),
            Self::Append { .. } => "append at end of file".to_string(),
            Self::Unchanged => "unchanged".to_string(),
        }
    }

    /// Returns `true` if applying the plan leaves the file as it is.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_uses_one_based_line_numbers() {
        let plan = EditPlan::InsertAt {
            index: 0,
            prefix: String::new(),
        };
        assert_eq!(plan.describe(), "insert at line 1");
    }

    #[test]
    fn test_is_unchanged() {
        assert!(EditPlan::Unchanged.is_unchanged());
        assert!(!EditPlan::Append { blank_separator: true }.is_unchanged());
    }
}
