//! Line-scanning primitives shared by every PBS grammar.

use std::sync::LazyLock;

use regex::Regex;

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.+)\]$").expect("section header pattern compiles"));

const BOM: char = '\u{feff}';

/// A trimmed, non-blank, non-comment line with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Iterate the meaningful lines of `source`.
///
/// Accepts LF or CRLF endings and ignores a leading byte-order mark. Blank
/// lines and full-line `#`/`;` comments are skipped; inline comments are not
/// stripped.
pub(crate) fn content_lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    source
        .strip_prefix(BOM)
        .unwrap_or(source)
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let text = raw.trim();
            if text.is_empty() || is_comment(text) {
                None
            } else {
                Some(Line { number: idx + 1, text })
            }
        })
}

pub(crate) fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with(';')
}

/// Inner text of a `[...]` line, if the whole line is a section header.
pub(crate) fn section_header(trimmed: &str) -> Option<&str> {
    SECTION_HEADER
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Split on the first `=` into trimmed `(key, value)`.
pub(crate) fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Comma-separated list with each element trimmed. Blank input yields no items.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(|s| s.trim().to_string()).collect()
}

pub(crate) fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
