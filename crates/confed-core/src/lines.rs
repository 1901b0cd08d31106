//! Helpers for working with lines that keep their own terminators.

/// Splits `content` into lines, each retaining its `\n` (or `\r\n`) terminator.
///
/// The last line has no terminator when `content` does not end with one.
/// Concatenating the result gives back `content` byte for byte.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

/// Splits a single line into its body and its terminator (`"\n"`, `"\r\n"` or `""`).
pub fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, &line[body.len()..])
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, &line[body.len()..])
    } else {
        (line, "")
    }
}

/// Returns `true` if the line holds nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns `true` if the line ends with a terminator.
pub fn is_terminated(line: &str) -> bool {
    line.ends_with('\n')
}
