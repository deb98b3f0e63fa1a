use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RE should compile"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("TAG_RE should compile"));
static NON_ASCII_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").expect("NON_ASCII_RE should compile"));
static NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("NEWLINES_RE should compile"));

/// Normalizes a scraped document for the training corpus
///
/// Passes run in a fixed order, each on the output of the previous one:
/// - collapse whitespace runs to one space and trim
/// - strip `<...>` tags
/// - replace each run of non-ASCII characters with one space
/// - collapse newline runs
///
/// Only the first pass trims, so a non-ASCII run at either edge leaves a
/// space behind.
pub fn clean_text(text: &str) -> String {
    let text = collapse_whitespace(text);
    let text = strip_tags(&text);
    let text = replace_non_ascii(&text);
    collapse_newlines(&text)
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

pub fn replace_non_ascii(text: &str) -> String {
    NON_ASCII_RE.replace_all(text, " ").into_owned()
}

/// No newline survives `collapse_whitespace`; kept so the passes stay
/// correct if they are ever reordered.
pub fn collapse_newlines(text: &str) -> String {
    NEWLINES_RE.replace_all(text, "\n").into_owned()
}
