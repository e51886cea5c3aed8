//! Token patterns and the passes built from them.
//!
//! Every pattern runs against already-escaped text. The pass tables are
//! compiled once per process and shared read-only by every render call.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::palette::{Level, StatusBand};
use crate::segment::{Segment, Style};

/// Kinds of token the renderer knows how to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `YYYY-MM-DD HH:MM:SS`, anywhere in the text
    Timestamp,
    /// Whole-word HTTP method
    Method,
    /// `http://` or `https://` link
    Url,
    /// Three-digit code of an `HTTP/x.y NNN Reason` status line
    Status,
    /// Whole-word level name
    Level,
    /// Double-quoted substring, quotes included
    Quote,
}

pub const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

pub(crate) const TIMESTAMP_PATTERN: &str =
    r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}";

impl TokenKind {
    pub fn pattern(&self) -> String {
        match self {
            TokenKind::Timestamp => TIMESTAMP_PATTERN.to_string(),
            TokenKind::Method => format!(r"\b(?:{})\b", HTTP_METHODS.join("|")),
            // The text is escaped: `&lt;` / `&gt;` end a link, `&amp;` does not.
            TokenKind::Url => r#"https?://(?:[^\s<>"&]|&amp;)+"#.to_string(),
            TokenKind::Status => r"(HTTP/[0-9.]+\s)([0-9]{3})(\s\w+)".to_string(),
            TokenKind::Level => {
                let names: Vec<&str> = Level::ALL.iter().map(|level| level.as_str()).collect();
                format!(r"\b(?:{})\b", names.join("|"))
            }
            TokenKind::Quote => r#""[^"]*""#.to_string(),
        }
    }

    /// Capture group that gets highlighted; the rest of the match stays plain.
    pub fn group(&self) -> usize {
        match self {
            TokenKind::Status => 2,
            _ => 0,
        }
    }

    /// Quotes pair up across the whole line, so matching one segment at a
    /// time would pair the closing quote of one string with the opening
    /// quote of the next.
    pub fn pairs_across_segments(&self) -> bool {
        matches!(self, TokenKind::Quote)
    }

    pub fn style(&self, matched: &str) -> Style {
        match self {
            TokenKind::Timestamp => Style::Timestamp,
            TokenKind::Method => Style::Method,
            TokenKind::Url => Style::Url,
            TokenKind::Status => Style::Status(StatusBand::from_code(matched)),
            TokenKind::Level => Style::Level(Level::from_name(matched)),
            TokenKind::Quote => Style::Quote,
        }
    }
}

/// One compiled substitution pass.
#[derive(Debug)]
pub struct TokenPass {
    kind: TokenKind,
    regex: Regex,
    group: usize,
}

impl TokenPass {
    /// Compile the pass for `kind`.
    ///
    /// # Panics
    ///
    /// If the built-in pattern does not compile. That is a bug in this
    /// module, not a runtime condition, and the unit tests exercise every
    /// pattern.
    pub fn new(kind: TokenKind) -> Self {
        let regex = Regex::new(&kind.pattern())
            .unwrap_or_else(|e| panic!("invalid {:?} token pattern: {}", kind, e));

        Self {
            kind,
            regex,
            group: kind.group(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte ranges of the highlighted group in `text`, in order, with the
    /// style each one gets.
    pub fn matches<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (Range<usize>, Style)> + 't {
        self.regex.captures_iter(text).filter_map(move |caps| {
            let m = caps.get(self.group)?;
            Some((m.range(), self.kind.style(m.as_str())))
        })
    }

    /// Split plain text into plain and styled segments.
    pub fn split(&self, text: &str) -> Vec<Segment> {
        let mut out = Vec::new();
        let mut last = 0;

        for (range, style) in self.matches(text) {
            if range.start > last {
                out.push(Segment::Plain(text[last..range.start].to_string()));
            }
            out.push(Segment::styled(style, &text[range.clone()]));
            last = range.end;
        }

        if last < text.len() {
            out.push(Segment::Plain(text[last..].to_string()));
        }
        out
    }
}

/// Passes for the message part of a structured line.
///
/// URL runs before method so a method word inside a link path does not split
/// the link. Quote always runs last.
pub static MESSAGE_PASSES: LazyLock<Vec<TokenPass>> = LazyLock::new(|| {
    [TokenKind::Url, TokenKind::Method, TokenKind::Status, TokenKind::Quote]
        .into_iter()
        .map(TokenPass::new)
        .collect()
});

/// Best-effort passes for lines that are not structured.
pub static FALLBACK_PASSES: LazyLock<Vec<TokenPass>> = LazyLock::new(|| {
    [
        TokenKind::Timestamp,
        TokenKind::Url,
        TokenKind::Method,
        TokenKind::Level,
        TokenKind::Quote,
    ]
    .into_iter()
    .map(TokenPass::new)
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    fn styled_texts(segments: &[Segment]) -> Vec<(Style, &str)> {
        segments
            .iter()
            .filter_map(|s| match s {
                Segment::Styled { style, text } => Some((*style, text.as_str())),
                Segment::Plain(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(MESSAGE_PASSES.len(), 4);
        assert_eq!(FALLBACK_PASSES.len(), 5);
        assert_eq!(MESSAGE_PASSES.last().map(|p| p.kind()), Some(TokenKind::Quote));
        assert_eq!(FALLBACK_PASSES.last().map(|p| p.kind()), Some(TokenKind::Quote));
    }

    #[test]
    fn test_method_whole_word_only() {
        let pass = TokenPass::new(TokenKind::Method);
        let segments = pass.split("GET /a then GETTER and POST");
        assert_eq!(
            styled_texts(&segments),
            vec![(Style::Method, "GET"), (Style::Method, "POST")]
        );
    }

    #[test]
    fn test_url_stops_at_escaped_bracket() {
        let pass = TokenPass::new(TokenKind::Url);
        let segments = pass.split("see &lt;https://x.test/a?b=1&amp;c=2&gt; now");
        assert_eq!(
            styled_texts(&segments),
            vec![(Style::Url, "https://x.test/a?b=1&amp;c=2")]
        );
        assert_eq!(segments.last(), Some(&Segment::Plain("&gt; now".to_string())));
    }

    #[test]
    fn test_url_stops_at_quote_and_space() {
        let pass = TokenPass::new(TokenKind::Url);
        let segments = pass.split(r#"url="http://a.b/c" next"#);
        assert_eq!(styled_texts(&segments), vec![(Style::Url, "http://a.b/c")]);
    }

    #[test]
    fn test_status_highlights_code_only() {
        let pass = TokenPass::new(TokenKind::Status);
        let segments = pass.split("HTTP/1.1 404 Not Found");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("HTTP/1.1 ".to_string()),
                Segment::styled(Style::Status(StatusBand::Error), "404"),
                Segment::Plain(" Not Found".to_string()),
            ]
        );
    }

    #[test]
    fn test_status_bands_applied() {
        let pass = TokenPass::new(TokenKind::Status);
        let ok = pass.split("HTTP/2 200 OK");
        assert_eq!(styled_texts(&ok), vec![(Style::Status(StatusBand::Success), "200")]);
        let moved = pass.split("HTTP/1.0 301 Moved");
        assert_eq!(styled_texts(&moved), vec![(Style::Status(StatusBand::Redirect), "301")]);
    }

    #[test]
    fn test_status_needs_reason_phrase() {
        let pass = TokenPass::new(TokenKind::Status);
        assert_eq!(
            pass.split("HTTP/1.1 404"),
            vec![Segment::Plain("HTTP/1.1 404".to_string())]
        );
    }

    #[test]
    fn test_level_keyword_colors() {
        let pass = TokenPass::new(TokenKind::Level);
        let segments = pass.split("went WARNING then ERRORS and CRITICAL");
        assert_eq!(
            styled_texts(&segments),
            vec![
                (Style::Level(Some(Level::Warning)), "WARNING"),
                (Style::Level(Some(Level::Critical)), "CRITICAL"),
            ]
        );
    }

    #[test]
    fn test_quote_includes_marks() {
        let pass = TokenPass::new(TokenKind::Quote);
        let segments = pass.split(r#"value "bad value" and "" end"#);
        assert_eq!(
            styled_texts(&segments),
            vec![(Style::Quote, r#""bad value""#), (Style::Quote, r#""""#)]
        );
    }

    #[test]
    fn test_only_quote_pairs_across_segments() {
        assert!(TokenKind::Quote.pairs_across_segments());
        assert!(!TokenKind::Url.pairs_across_segments());
        assert!(!TokenKind::Method.pairs_across_segments());
    }

    #[test]
    fn test_matches_report_group_ranges() {
        let pass = TokenPass::new(TokenKind::Status);
        let found: Vec<_> = pass.matches("x HTTP/1.1 302 Found").collect();
        assert_eq!(found, vec![(11..14, Style::Status(StatusBand::Redirect))]);
    }

    #[test]
    fn test_unmatched_quote_stays_plain() {
        let pass = TokenPass::new(TokenKind::Quote);
        assert_eq!(
            pass.split(r#"one " quote"#),
            vec![Segment::Plain(r#"one " quote"#.to_string())]
        );
    }

    #[test]
    fn test_timestamp_unanchored() {
        let pass = TokenPass::new(TokenKind::Timestamp);
        let segments = pass.split("at 2024-01-01 10:00:00 boom");
        assert_eq!(styled_texts(&segments), vec![(Style::Timestamp, "2024-01-01 10:00:00")]);
    }

    #[test]
    fn test_split_without_match_is_single_plain() {
        let pass = TokenPass::new(TokenKind::Url);
        assert_eq!(pass.split("plain"), vec![Segment::Plain("plain".to_string())]);
        assert!(pass.split("").is_empty());
    }
}
