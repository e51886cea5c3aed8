use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::logs::page;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Log file not found: {0}")]
    NotFound(String),

    #[error("Invalid log file name: {0:?}")]
    InvalidName(String),

    #[error("Log file too large: {name} is {size} bytes (max: {limit} bytes)")]
    TooLarge { name: String, size: u64, limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render task failed: {0}")]
    Render(#[from] tokio::task::JoinError),
}

pub type ViewerResult<T> = Result<T, ViewerError>;

impl ViewerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ViewerError::NotFound(_) => StatusCode::NOT_FOUND,
            ViewerError::InvalidName(_) => StatusCode::BAD_REQUEST,
            ViewerError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ViewerError::Io(_) | ViewerError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the error page. `debug` controls whether the underlying detail
    /// is shown to the client; it is always logged.
    pub fn into_page(self, debug: bool) -> ErrorPage {
        let status = self.status();
        let (message, description) = match &self {
            ViewerError::NotFound(_) => (
                "Log file not found",
                "The requested log file does not exist or has been deleted.",
            ),
            ViewerError::InvalidName(_) => (
                "Invalid file name",
                "Log file names may not contain path separators.",
            ),
            ViewerError::TooLarge { .. } => (
                "Log file too large",
                "The log file exceeds the configured display limit (logs.max_file_bytes).",
            ),
            ViewerError::Io(_) | ViewerError::Render(_) => (
                "Server error",
                "The server encountered an unexpected error. Please try again later.",
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        ErrorPage {
            status,
            message: message.to_string(),
            description: description.to_string(),
            detail: debug.then(|| self.to_string()),
        }
    }
}

impl IntoResponse for ViewerError {
    fn into_response(self) -> Response {
        self.into_page(false).into_response()
    }
}

/// Rendered error page with its status code.
#[derive(Debug)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
    pub description: String,
    pub detail: Option<String>,
}

impl ErrorPage {
    pub fn not_found_route(path: &str) -> Self {
        tracing::warn!(path = path, "Route not found");
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Page not found".to_string(),
            description: "The page you requested does not exist or has been moved.".to_string(),
            detail: None,
        }
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let body = page::error_page(
            self.status,
            &self.message,
            &self.description,
            self.detail.as_deref(),
        );
        (self.status, Html(body)).into_response()
    }
}
