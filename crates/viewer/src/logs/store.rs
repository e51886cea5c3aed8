//! Log file access for the viewer.
//!
//! Resolves file names inside the configured log directory, lists files with
//! their size and modification time, and loads a file fully into memory
//! (bounded by `logs.max_file_bytes`) for rendering.

use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::config::LogsConfig;
use crate::error::{ViewerError, ViewerResult};

/// One row of the log listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileEntry {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<FixedOffset>,
}

/// A log file loaded for display.
#[derive(Debug, Clone)]
pub struct LogFile {
    pub name: String,
    pub size: u64,
    /// Decoded content; invalid UTF-8 is replaced, never rejected
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
    max_file_bytes: u64,
    offset: FixedOffset,
}

impl LogStore {
    pub fn new(config: &LogsConfig) -> Self {
        let offset = FixedOffset::east_opt(config.utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix());

        Self {
            dir: PathBuf::from(&config.directory),
            max_file_bytes: config.max_file_bytes,
            offset,
        }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Create the log directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> ViewerResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Regular files in the log directory, newest first.
    pub async fn list(&self) -> ViewerResult<Vec<LogFileEntry>> {
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = dir.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    // Raced with a delete; skip the entry.
                    tracing::debug!(path = %entry.path().display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(row) = self.entry(name, metadata.len(), metadata.modified()) {
                entries.push(row);
            }
        }

        entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
        Ok(entries)
    }

    /// Listing row for one file; `None` (logged) when the platform cannot
    /// report its modification time.
    fn entry(&self, name: String, size: u64, modified: io::Result<SystemTime>) -> Option<LogFileEntry> {
        let modified: DateTime<Utc> = match modified {
            Ok(time) => time.into(),
            Err(e) => {
                tracing::debug!(file = %name, error = %e, "Skipping entry without modification time");
                return None;
            }
        };

        Some(LogFileEntry {
            name,
            size,
            modified: modified.with_timezone(&self.offset),
        })
    }

    /// Load one log file by name.
    pub async fn read(&self, name: &str) -> ViewerResult<LogFile> {
        validate_name(name)?;
        let path = self.dir.join(name);

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ViewerError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Err(ViewerError::NotFound(name.to_string()));
        }
        if metadata.len() > self.max_file_bytes {
            return Err(ViewerError::TooLarge {
                name: name.to_string(),
                size: metadata.len(),
                limit: self.max_file_bytes,
            });
        }

        let bytes = tokio::fs::read(&path).await?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        Ok(LogFile {
            name: name.to_string(),
            size: bytes.len() as u64,
            content,
        })
    }
}

/// Reject names that could escape the log directory.
pub fn validate_name(name: &str) -> ViewerResult<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(ViewerError::InvalidName(name.to_string()));
    }
    Ok(())
}
