//! HTML escaping and line segmentation.
//!
//! Escaping runs exactly once, over the whole input, before any token pass
//! sees the text. Every later stage works on escaped text, so nothing that
//! originated in the log file can reach the output as markup.

use std::borrow::Cow;

/// Escape `&`, `<` and `>` (in that order).
///
/// `&` goes first so the entities produced for `<` and `>` are not escaped
/// a second time. Returns `Cow::Borrowed` when the input has nothing to
/// escape (zero allocation for the common case of clean log text).
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Split escaped text into physical lines.
///
/// Splits on `\n` only, so `n` newlines always yield `n + 1` lines. A
/// trailing `\r` is dropped from each line (CRLF files render like LF).
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// True when the line has nothing worth annotating.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_specials() {
        assert_eq!(escape_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn test_escape_ampersand_first() {
        // An existing entity in the log text must come out double-escaped,
        // i.e. rendered literally, not interpreted by the browser.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_borrows_clean_text() {
        let out = escape_html("2024-01-01 10:00:00 - INFO - ready");
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_leaves_quotes_alone() {
        assert_eq!(escape_html(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn test_split_lines_counts() {
        let lines: Vec<_> = split_lines("a\n\nb\n").collect();
        assert_eq!(lines, vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_split_lines_crlf() {
        let lines: Vec<_> = split_lines("a\r\nb").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_split_empty_input() {
        let lines: Vec<_> = split_lines("").collect();
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t "));
        assert!(!is_blank(" x "));
    }
}
