//! Typed segment list for a single line.
//!
//! A line starts as one plain segment. Each token pass splits plain segments
//! into plain and styled pieces; styled segments are never rescanned, so no
//! pass can wrap the output of an earlier one.
//!
//! Quote pairs are the exception to per-segment matching: they are found over
//! the whole line, styled text included, and only a pair that lies inside a
//! single plain segment is styled.

use crate::palette::{self, Level, StatusBand};
use crate::tokens::TokenPass;

/// How a styled segment is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Timestamp,
    /// Bold, colored per the level table; `None` for unknown names.
    Level(Option<Level>),
    Method,
    Url,
    Status(StatusBand),
    Quote,
}

impl Style {
    /// Inline `style` attribute value.
    pub fn css(&self) -> &'static str {
        match self {
            Style::Timestamp => "color: #7ed321;",
            Style::Level(Some(Level::Debug)) => "color: #8a8a8a; font-weight: bold;",
            Style::Level(Some(Level::Info)) => "color: #4a90e2; font-weight: bold;",
            Style::Level(Some(Level::Warning)) => "color: #f5a623; font-weight: bold;",
            Style::Level(Some(Level::Error | Level::Exception)) => {
                "color: #d0021b; font-weight: bold;"
            }
            Style::Level(Some(Level::Critical)) => "color: #b10dc9; font-weight: bold;",
            Style::Level(None) => "color: #ffffff; font-weight: bold;",
            Style::Method => "color: #f8e71c; font-weight: bold;",
            Style::Url => "color: #4a90e2; text-decoration: underline;",
            Style::Status(StatusBand::Success) => "color: #7ed321; font-weight: bold;",
            Style::Status(StatusBand::Redirect) => "color: #f5a623; font-weight: bold;",
            Style::Status(StatusBand::Error) => "color: #d0021b; font-weight: bold;",
            Style::Quote => "color: #9013fe;",
        }
    }

    /// Foreground color carried by [`Style::css`].
    pub fn color(&self) -> &'static str {
        match self {
            Style::Timestamp => palette::TIMESTAMP_COLOR,
            Style::Level(level) => level.map_or(palette::UNKNOWN_LEVEL_COLOR, |l| l.color()),
            Style::Method => palette::METHOD_COLOR,
            Style::Url => palette::URL_COLOR,
            Style::Status(band) => band.color(),
            Style::Quote => palette::QUOTE_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Escaped text that no pass has claimed yet.
    Plain(String),
    /// Escaped text wrapped in a span on output.
    Styled { style: Style, text: String },
}

impl Segment {
    pub fn styled(style: Style, text: impl Into<String>) -> Self {
        Segment::Styled { style, text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Styled { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: &str) -> Self {
        let mut line = Self::new();
        line.push_plain(text);
        line
    }

    pub fn push_plain(&mut self, text: &str) {
        if !text.is_empty() {
            self.segments.push(Segment::Plain(text.to_string()));
        }
    }

    pub fn push_styled(&mut self, style: Style, text: &str) {
        self.segments.push(Segment::styled(style, text));
    }

    /// Append every segment of `other`.
    pub fn extend(&mut self, other: Line) {
        self.segments.extend(other.segments);
    }

    /// Run one token pass over the plain segments.
    pub fn apply(&mut self, pass: &TokenPass) {
        if pass.kind().pairs_across_segments() {
            self.apply_across(pass);
            return;
        }

        let segments = std::mem::take(&mut self.segments);
        self.segments.reserve(segments.len());

        for segment in segments {
            match segment {
                Segment::Plain(text) => self.segments.extend(pass.split(&text)),
                styled => self.segments.push(styled),
            }
        }
    }

    /// Match over the text of the whole line, then style only the matches
    /// that fall inside one plain segment. A match that reaches into a styled
    /// segment is dropped, and still consumes its characters.
    fn apply_across(&mut self, pass: &TokenPass) {
        let full: String = self.segments.iter().map(Segment::text).collect();
        let mut found = pass.matches(&full).peekable();

        let segments = std::mem::take(&mut self.segments);
        self.segments.reserve(segments.len());
        let mut start = 0;

        for segment in segments {
            let end = start + segment.text().len();
            match segment {
                Segment::Plain(text) => {
                    let mut last = 0;
                    while let Some((range, style)) = found.next_if(|(range, _)| range.start < end) {
                        if range.end > end {
                            continue;
                        }
                        let (from, to) = (range.start - start, range.end - start);
                        self.push_plain(&text[last..from]);
                        self.push_styled(style, &text[from..to]);
                        last = to;
                    }
                    self.push_plain(&text[last..]);
                }
                styled => {
                    while found.next_if(|(range, _)| range.start < end).is_some() {}
                    self.segments.push(styled);
                }
            }
            start = end;
        }
    }

    pub fn apply_all<'a>(&mut self, passes: impl IntoIterator<Item = &'a TokenPass>) {
        for pass in passes {
            self.apply(pass);
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Plain(text) => out.push_str(text),
                Segment::Styled { style, text } => {
                    out.push_str("<span style=\"");
                    out.push_str(&style.css());
                    out.push_str("\">");
                    out.push_str(text);
                    out.push_str("</span>");
                }
            }
        }
        out
    }
}
