//! Output comparison
//!
//! Trailing whitespace on each line and the line-ending style are ignored.
//! Leading and interior whitespace are significant.
//!
//! Only the first `min(expected, actual)` lines are compared, so an output
//! that is a correct prefix of the answer (or the answer followed by extra
//! lines) is accepted. Empty output therefore always matches.

/// Lines of `text` with trailing whitespace removed.
///
/// A final newline does not produce an extra empty line.
fn normalized_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim_end)
}

/// Whether `actual` is accepted as `expected`
pub fn outputs_match(expected: &str, actual: &str) -> bool {
    normalized_lines(expected)
        .zip(normalized_lines(actual))
        .all(|(e, a)| e == a)
}

/// 1-based number of the first compared line that differs, if any
pub fn first_mismatch(expected: &str, actual: &str) -> Option<usize> {
    normalized_lines(expected)
        .zip(normalized_lines(actual))
        .position(|(e, a)| e != a)
        .map(|index| index + 1)
}
