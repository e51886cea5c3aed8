//! Log text to colorized HTML.
//!
//! Turns raw, unstructured log text into an HTML fragment that is safe to
//! embed inside a block-level container. The whole input is processed in one
//! buffer; callers are expected to bound the input size before calling.
//!
//! # Pipeline
//!
//! - `escape.rs`: HTML escaping (once, up front) and line splitting
//! - `annotate.rs`: per-line classification (`timestamp - LEVEL - message`
//!   or not) and annotation
//! - `tokens.rs`: token patterns and the process-wide pass tables
//! - `segment.rs`: typed plain/styled segment list each pass refines
//! - `palette.rs`: level and token colors
//!
//! Rendering is a pure function of its input. It never fails: input that
//! does not fit the structured grammar degrades to best-effort spot coloring.

pub mod annotate;
pub mod escape;
pub mod palette;
pub mod segment;
pub mod tokens;

pub use annotate::{annotate, classify, LineRecord};
pub use escape::{escape_html, split_lines};
pub use palette::{Level, StatusBand};

/// Line separator in rich output.
pub const LINE_BREAK: &str = "<br>";

/// How log text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Text returned untouched; the host decides how to escape it.
    Raw,
    /// Escaped and colorized HTML fragment.
    #[default]
    Rich,
}

impl RenderMode {
    /// `raw=1` selects raw mode; anything else (or nothing) is rich.
    pub fn from_raw_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("1") => RenderMode::Raw,
            _ => RenderMode::Rich,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, RenderMode::Raw)
    }
}

/// Per-call line counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub lines: usize,
    pub structured: usize,
    pub unstructured: usize,
    pub blank: usize,
}

impl RenderSummary {
    fn record(&mut self, record: &LineRecord<'_>) {
        self.lines += 1;
        match record {
            LineRecord::Blank => self.blank += 1,
            LineRecord::Structured { .. } => self.structured += 1,
            LineRecord::Unstructured { .. } => self.unstructured += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub summary: RenderSummary,
}

/// Render log text.
pub fn render(text: &str, mode: RenderMode) -> String {
    render_with_summary(text, mode).html
}

/// Render log text and report how its lines were classified.
///
/// Raw mode returns the text unchanged with an empty summary.
pub fn render_with_summary(text: &str, mode: RenderMode) -> Rendered {
    if mode.is_raw() {
        return Rendered {
            html: text.to_string(),
            summary: RenderSummary::default(),
        };
    }

    let escaped = escape_html(text);
    let mut summary = RenderSummary::default();
    let mut parts = Vec::new();

    for line in split_lines(&escaped) {
        let record = classify(line);
        summary.record(&record);
        parts.push(annotate(record));
    }

    tracing::trace!(
        bytes = text.len(),
        lines = summary.lines,
        structured = summary.structured,
        unstructured = summary.unstructured,
        blank = summary.blank,
        "Rendered log text"
    );

    Rendered {
        html: parts.join(LINE_BREAK),
        summary,
    }
}
