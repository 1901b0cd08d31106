//! Running state of a scan over the file.
//!
//! The scanner feeds every line into a [`ScanState`] through the `record_*`
//! methods below.  Each method encodes one update rule, so the rules can be
//! tested without parsing anything.

use crate::grammar::matcher::ParsedLine;
use crate::lines::is_blank;

/// A second active definition of a setting was found without multiple mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateDefinition {
    /// 1-based line number of the earlier definition.
    pub first_line: usize,
    /// 1-based line number of the later definition.
    pub second_line: usize,
}

/// Candidates and insertion point gathered while scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Last matching active definition.
    pub active: Option<ParsedLine>,
    /// Last matching commented-out definition.
    pub commented: Option<ParsedLine>,
    /// Explicit insertion index captured from `before`/`after` or multiple mode.
    pub insert_at: Option<usize>,
    /// Indentation to put in front of an inserted line.
    pub insert_prefix: String,
    /// Number of blank lines at the end of the file seen so far.
    pub trailing_blank_lines: usize,
    /// Number of lines in the file.
    pub line_count: usize,
    /// Set once a `before`/`after` anchor has been captured.
    anchored: bool,
}

impl ScanState {
    /// Creates an empty state for a file of `line_count` lines.
    pub fn new(line_count: usize) -> Self {
        Self {
            line_count,
            ..Self::default()
        }
    }

    /// A line the grammar did not recognise: blanks extend the trailing run,
    /// anything else ends it.
    pub fn record_unparsed(&mut self, line: &str) {
        if is_blank(line) {
            self.trailing_blank_lines += 1;
        } else {
            self.trailing_blank_lines = 0;
        }
    }

    /// A line the grammar recognised; it is never blank.
    pub fn record_parsed(&mut self) {
        self.trailing_blank_lines = 0;
    }

    /// The first active occurrence of the `before`/`after` setting fixes the
    /// insertion index; later occurrences are ignored.
    pub fn record_anchor(&mut self, index: usize) {
        if !self.anchored {
            self.anchored = true;
            self.insert_at = Some(index);
        }
    }

    /// An active definition of the setting in multiple mode: the new line goes
    /// right after it, with the same indentation.  The last one wins, even
    /// over an earlier anchor.
    pub fn record_multiple_match(&mut self, index: usize, indent: &str) {
        self.insert_at = Some(index + 1);
        self.insert_prefix = indent.to_string();
    }

    /// A matching commented-out definition; the last one wins.
    pub fn record_commented(&mut self, line: ParsedLine) {
        self.commented = Some(line);
    }

    /// A matching active definition.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateDefinition`] if an active definition was already
    /// recorded and `multiple` is not set.
    pub fn record_active(
        &mut self,
        line: ParsedLine,
        multiple: bool,
    ) -> Result<(), DuplicateDefinition> {
        if let Some(previous) = &self.active {
            if !multiple {
                return Err(DuplicateDefinition {
                    first_line: previous.index + 1,
                    second_line: line.index + 1,
                });
            }
        }
        self.active = Some(line);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
