//! Normalization of single text runs.

use regex::Regex;
use std::sync::LazyLock;

/// A break inside a word pair, optionally after a comma: "Paper\nsubmission", "Rome,\nItaly".
static WRAPPED_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z0-9]),?\n\s*([a-zA-Z0-9])").unwrap());

/// A break not directly preceded by `.`, `?` or `!`.
static UNPUNCTUATED_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^.?!])\n\s*").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a raw text-node string into a single clean line.
///
/// Joins wrapped lines, joins breaks that do not end a sentence, collapses
/// whitespace runs and trims. Empty input yields an empty string.
pub fn normalize_text(raw: &str) -> String {
    let text = raw.trim();
    if text.is_empty() {
        return String::new();
    }

    let text = join_wrapped_lines(text);
    let text = join_unpunctuated_breaks(&text);
    collapse_whitespace(&text).trim().to_string()
}

/// Replace a line break between two alphanumerics (and a comma before the
/// break, if any) with one space.
pub fn join_wrapped_lines(text: &str) -> String {
    WRAPPED_BREAK_RE.replace_all(text, "${1} ${2}").into_owned()
}

/// Replace a line break with one space unless it follows `.`, `?` or `!`.
pub fn join_unpunctuated_breaks(text: &str) -> String {
    UNPUNCTUATED_BREAK_RE.replace_all(text, "${1} ").into_owned()
}

/// Collapse every whitespace run, line breaks included, to one space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").into_owned()
}
