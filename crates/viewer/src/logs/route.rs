use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Router,
};
use colorizer::RenderMode;
use serde::Deserialize;
use tracing::debug;

use super::page;
use crate::error::{ErrorPage, ViewerError};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/logs", get(list_logs_handler))
        .route("/logs/{filename}", get(view_log_handler))
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    /// `1` shows the file verbatim
    raw: Option<String>,
}

/// GET /logs: all log files, newest first
async fn list_logs_handler(State(state): State<AppState>) -> Result<Html<String>, ErrorPage> {
    let entries = state
        .store
        .list()
        .await
        .map_err(|e| e.into_page(state.debug()))?;

    debug!(count = entries.len(), "Listed log files");
    Ok(Html(page::listing_page(&entries)))
}

/// GET /logs/{filename}?raw=1: one log file, colorized unless raw
async fn view_log_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, ErrorPage> {
    let mode = RenderMode::from_raw_flag(query.raw.as_deref());
    let file = state
        .store
        .read(&filename)
        .await
        .map_err(|e| e.into_page(state.debug()))?;

    // Full-buffer render, bounded by the store's size limit, off the async workers.
    let (file, rendered) = tokio::task::spawn_blocking(move || {
        let rendered = colorizer::render_with_summary(&file.content, mode);
        (file, rendered)
    })
    .await
    .map_err(|e| ViewerError::from(e).into_page(state.debug()))?;

    debug!(
        file = %file.name,
        bytes = file.size,
        raw = mode.is_raw(),
        structured = rendered.summary.structured,
        unstructured = rendered.summary.unstructured,
        "Rendered log file"
    );

    Ok(Html(page::log_view_page(&file.name, &rendered.html, mode)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app_for(dir: &std::path::Path, debug: bool) -> Router {
        let mut config = ViewerConfig::default();
        config.logs.directory = dir.to_string_lossy().into_owned();
        config.server.debug = debug;
        routes().with_state(AppState::new(config))
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_listing_shows_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("app.log"), "hello").unwrap();

        let (status, body) = get_page(app_for(tmp.path(), false), "/logs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a href="/logs/app.log">app.log</a>"#));
        assert!(body.contains("5 B"));
    }

    #[tokio::test]
    async fn test_view_rich() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("app.log"),
            "2024-01-01 10:00:00 - ERROR - GET https://example.com/a\n<oops>\n",
        )
        .unwrap();

        let (status, body) = get_page(app_for(tmp.path(), false), "/logs/app.log").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<div class="log-content">"#));
        assert!(body.contains(r#"<span style="color: #d0021b; font-weight: bold;">ERROR</span>"#));
        assert!(body.contains("&lt;oops&gt;<br>"));
        assert!(!body.contains("<oops>"));
    }

    #[tokio::test]
    async fn test_view_large_file_renders_every_line() {
        let tmp = tempfile::tempdir().unwrap();
        let content: String = (0..2000)
            .map(|i| format!("2024-01-01 10:00:00 - INFO - GET https://a.test/{} \"q\"\n", i))
            .collect();
        std::fs::write(tmp.path().join("big.log"), &content).unwrap();

        let (status, body) = get_page(app_for(tmp.path(), false), "/logs/big.log").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("<br>").count(), 2000);
        assert!(body.contains("https://a.test/1999</span>"));
    }

    #[tokio::test]
    async fn test_view_raw() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("app.log"), "2024-01-01 10:00:00 - INFO - <x>").unwrap();

        let (status, body) = get_page(app_for(tmp.path(), false), "/logs/app.log?raw=1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<pre class="log-raw">2024-01-01 10:00:00 - INFO - &lt;x&gt;</pre>"#));
        assert!(!body.contains("font-weight: bold;\">INFO"));
    }

    #[tokio::test]
    async fn test_view_raw_flag_other_values_are_rich() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("app.log"), "x").unwrap();

        let (_, body) = get_page(app_for(tmp.path(), false), "/logs/app.log?raw=0").await;
        assert!(body.contains(r#"<div class="log-content">x</div>"#));
    }

    #[tokio::test]
    async fn test_view_missing_file() {
        let tmp = tempfile::tempdir().unwrap();

        let (status, body) = get_page(app_for(tmp.path(), false), "/logs/nope.log").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Log file not found"));
        assert!(!body.contains("nope.log"));
    }

    #[tokio::test]
    async fn test_view_missing_file_debug_detail() {
        let tmp = tempfile::tempdir().unwrap();

        let (status, body) = get_page(app_for(tmp.path(), true), "/logs/nope.log").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Log file not found: nope.log"));
    }

    #[tokio::test]
    async fn test_view_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();

        let (status, _) = get_page(app_for(tmp.path(), false), "/logs/..").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_page(app_for(tmp.path(), false), "/logs/..%2Fsecret").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
