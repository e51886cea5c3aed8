//! Color table for the log renderer.
//!
//! All colors are fixed, process-wide constants. Level names map to a color
//! through [`Level`]; names outside the known set use [`UNKNOWN_LEVEL_COLOR`].

pub const TIMESTAMP_COLOR: &str = "#7ed321";
pub const METHOD_COLOR: &str = "#f8e71c";
pub const URL_COLOR: &str = "#4a90e2";
pub const QUOTE_COLOR: &str = "#9013fe";
pub const UNKNOWN_LEVEL_COLOR: &str = "#ffffff";

pub const SUCCESS_COLOR: &str = "#7ed321";
pub const REDIRECT_COLOR: &str = "#f5a623";
pub const ERROR_COLOR: &str = "#d0021b";

/// Recognized log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    Exception,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Exception,
    ];

    /// Exact, case-sensitive lookup (`"ERROR"`, not `"error"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Exception => "EXCEPTION",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Level::Debug => "#8a8a8a",
            Level::Info => "#4a90e2",
            Level::Warning => "#f5a623",
            Level::Error | Level::Exception => ERROR_COLOR,
            Level::Critical => "#b10dc9",
        }
    }
}

/// Status code banding by leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBand {
    /// 2xx
    Success,
    /// 3xx
    Redirect,
    /// 1xx, 4xx, 5xx and anything else
    Error,
}

impl StatusBand {
    pub fn from_code(code: &str) -> Self {
        match code.as_bytes().first() {
            Some(b'2') => StatusBand::Success,
            Some(b'3') => StatusBand::Redirect,
            _ => StatusBand::Error,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StatusBand::Success => SUCCESS_COLOR,
            StatusBand::Redirect => REDIRECT_COLOR,
            StatusBand::Error => ERROR_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_lookup() {
        assert_eq!(Level::from_name("WARNING"), Some(Level::Warning));
        assert_eq!(Level::from_name("warning"), None);
        assert_eq!(Level::from_name("WARN"), None);
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(Level::Error.color(), "#d0021b");
        assert_eq!(Level::Exception.color(), "#d0021b");
        assert_eq!(Level::Critical.color(), "#b10dc9");
        assert_eq!(Level::from_name("TRACE").map(|level| level.color()), None);
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(StatusBand::from_code("200"), StatusBand::Success);
        assert_eq!(StatusBand::from_code("301"), StatusBand::Redirect);
        assert_eq!(StatusBand::from_code("404"), StatusBand::Error);
        assert_eq!(StatusBand::from_code("500"), StatusBand::Error);
        assert_eq!(StatusBand::from_code("101"), StatusBand::Error);
    }
}
