//! Diff rendering for test mode.
//!
//! Uses the `similar` crate to produce a standard unified diff
//! (`---`/`+++` headers, `@@` hunks, three lines of context).

use similar::TextDiff;

/// Lines of unchanged context around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Generates a unified diff between `original` and `modified`.
///
/// Returns an empty string when the two are identical.
pub fn unified_diff(label: &str, original: &str, modified: &str) -> String {
    if original == modified {
        return String::new();
    }
    let old_header = format!("{label} (original)");
    let new_header = format!("{label} (updated)");
    TextDiff::from_lines(original, modified)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(&old_header, &new_header)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_line_appears_as_removal_and_addition() {
        let diff = unified_diff("app.conf", "a = 1\nport = 1\n", "a = 1\nport = 2\n");
        assert!(diff.contains("-port = 1"));
        assert!(diff.contains("+port = 2"));
    }

    #[test]
    fn test_headers_name_the_file() {
        let diff = unified_diff("app.conf", "a\n", "b\n");
        assert!(diff.starts_with("--- app.conf (original)\n+++ app.conf (updated)\n"));
        assert!(diff.contains("@@"));
    }

    #[test]
    fn test_no_changes_gives_empty_diff() {
        assert!(unified_diff("app.conf", "same\n", "same\n").is_empty());
    }

    #[test]
    fn test_addition_only() {
        let diff = unified_diff("app.conf", "a = 1\n", "a = 1\n\nb = 2\n");
        assert!(diff.contains("+b = 2"));
        assert!(!diff.contains("-a = 1"));
    }
}
