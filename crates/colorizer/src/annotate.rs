//! Line classification and annotation.
//!
//! Each escaped line is classified once (`Blank`, `Structured` or
//! `Unstructured`) and then annotated into an HTML fragment. There is no
//! state shared between lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::escape::is_blank;
use crate::palette::Level;
use crate::segment::{Line, Style};
use crate::tokens::{FALLBACK_PASSES, MESSAGE_PASSES, TIMESTAMP_PATTERN};

/// `TIMESTAMP SEP LEVEL SEP MESSAGE`, where SEP is `spaces - spaces`.
static STRUCTURED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^({}) +- +([A-Z]+) +- +(.*)$", TIMESTAMP_PATTERN);
    Regex::new(&pattern).unwrap_or_else(|e| panic!("invalid structured line pattern: {}", e))
});

/// One classified line. Borrows from the escaped input and lives only
/// until it has been annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRecord<'a> {
    /// Empty or whitespace-only
    Blank,
    Structured {
        timestamp: &'a str,
        level: &'a str,
        message: &'a str,
    },
    Unstructured {
        text: &'a str,
    },
}

/// Classify an escaped line. Never fails: anything that does not fit the
/// structured grammar is `Unstructured`.
pub fn classify(line: &str) -> LineRecord<'_> {
    if is_blank(line) {
        return LineRecord::Blank;
    }

    match STRUCTURED_LINE.captures(line) {
        Some(caps) => match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(timestamp), Some(level), Some(message)) => LineRecord::Structured {
                timestamp: timestamp.as_str(),
                level: level.as_str(),
                message: message.as_str(),
            },
            _ => LineRecord::Unstructured { text: line },
        },
        None => LineRecord::Unstructured { text: line },
    }
}

/// Render one classified line to HTML (without the trailing line break).
pub fn annotate(record: LineRecord<'_>) -> String {
    match record {
        LineRecord::Blank => String::new(),
        LineRecord::Structured {
            timestamp,
            level,
            message,
        } => annotate_structured(timestamp, level, message).to_html(),
        LineRecord::Unstructured { text } => annotate_fallback(text).to_html(),
    }
}

fn annotate_structured(timestamp: &str, level: &str, message: &str) -> Line {
    let mut line = Line::new();
    line.push_styled(Style::Timestamp, timestamp);
    line.push_plain(" - ");
    line.push_styled(Style::Level(Level::from_name(level)), level);

    if !message.is_empty() {
        line.push_plain(" - ");
        let mut body = Line::plain(message);
        body.apply_all(MESSAGE_PASSES.iter());
        line.extend(body);
    }
    line
}

fn annotate_fallback(text: &str) -> Line {
    let mut line = Line::plain(text);
    line.apply_all(FALLBACK_PASSES.iter());
    line
}
