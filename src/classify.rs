//! Single-line classification.
//!
//! A line is judged on its own: there is no block-comment state and no notion
//! of string literals, so `let s = "// not a comment";` is code and a line
//! inside `/* ... */` is code unless it happens to start with a marker.

/// Comment markers, checked in order. Covers C-family, shell/Python, INI and SQL.
pub const COMMENT_PREFIXES: [&str; 4] = ["//", "#", ";", "--"];

/// The kind of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Blank,
    Comment,
    Code,
}

/// Classifies a line whose surrounding whitespace has already been trimmed.
pub fn classify(line: &str) -> LineKind {
    if line.is_empty() {
        LineKind::Blank
    } else if is_comment(line) {
        LineKind::Comment
    } else {
        LineKind::Code
    }
}

pub fn is_comment(line: &str) -> bool {
    COMMENT_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}
