//! Common utility functions shared across the codebase.

/// 1-based line and column of a byte offset.
///
/// The column counts characters, not bytes.
///
/// # Examples
///
/// ```
/// use inject_tag::utils::line_col;
///
/// assert_eq!(line_col(b"package pb\n\ntype A struct{}", 12), (3, 1));
/// assert_eq!(line_col(b"abc", 2), (1, 3));
/// ```
pub fn line_col(source: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let col = String::from_utf8_lossy(&source[line_start..offset])
        .chars()
        .count()
        + 1;
    (line, col)
}

/// The full source line containing a byte offset, without its line break.
pub fn source_line_at(source: &[u8], offset: usize) -> String {
    let offset = offset.min(source.len());
    let start = source[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let end = source[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(source.len(), |i| offset + i);
    String::from_utf8_lossy(&source[start..end])
        .trim_end_matches('\r')
        .to_string()
}
