mod config;
mod error;
mod logs;
mod state;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    config::{LogFormat, LogOutput, ViewerConfig},
    error::ErrorPage,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Phase 1: thread-local subscriber so config loading can log
    let basic_tracing = init_tracing_basic();

    info!("Starting log viewer v{}", env!("CARGO_PKG_VERSION"));

    let config = ViewerConfig::load().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    // Phase 2: global subscriber from config
    drop(basic_tracing);
    init_tracing_from_config(&config)?;

    info!("Configuration loaded successfully");

    let state = AppState::new(config.clone());
    state
        .store
        .ensure_dir()
        .await
        .context("Failed to create log directory")?;
    info!("Serving log files from: {}", state.store.dir().display());

    let app = build_router(state);

    let addr: SocketAddr = config
        .server
        .bind_address
        .parse()
        .context("Invalid bind address")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    info!("Listening on: http://{}", addr);
    info!("  - Log listing: http://{}/logs", addr);
    info!("  - Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Build the application router
fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let cors = if !server.enable_cors {
        // Same-origin only
        CorsLayer::new()
    } else if server.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins = server
            .cors_origins
            .iter()
            .filter_map(|s| s.parse::<axum::http::HeaderValue>().ok())
            .collect::<Vec<_>>();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let request_timeout = Duration::from_secs(server.write_timeout_secs);

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .merge(logs::route::routes())
        .fallback(fallback_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
                .layer(cors),
        )
        .with_state(state)
}

/// Home page: menu of the available pages
async fn home_handler() -> Html<String> {
    Html(logs::page::home_page())
}

/// Health check: healthy while the log directory is readable
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let listing = state.store.list().await;
    let healthy = listing.is_ok();

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let logs = match listing {
        Ok(entries) => json!({
            "directory": state.store.dir().display().to_string(),
            "files": entries.len(),
        }),
        Err(e) => {
            warn!(error = %e, "Log directory unreadable");
            json!({
                "directory": state.store.dir().display().to_string(),
                "error": "log directory unreadable",
            })
        }
    };

    (
        status_code,
        Json(json!({
            "status": if healthy { "healthy" } else { "unhealthy" },
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "logs": logs,
        })),
    )
}

async fn fallback_handler(uri: Uri) -> ErrorPage {
    ErrorPage::not_found_route(uri.path())
}

/// Phase 1: Basic tracing init so we can log during config loading.
/// Uses RUST_LOG env var or a sensible default.
fn init_tracing_basic() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,viewer=debug"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

/// Phase 2: Install the global subscriber from configuration.
/// RUST_LOG still wins over `logging.level` when set.
fn init_tracing_from_config(config: &ViewerConfig) -> Result<()> {
    use std::sync::Arc;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let file = match &config.logging.output {
        LogOutput::Stdout => None,
        LogOutput::File { path } => Some(Arc::new(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path))?,
        )),
    };

    match (&config.logging.format, file) {
        (LogFormat::Json, None) => {
            let layer = fmt::layer().json().with_target(true).with_thread_ids(true);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        (LogFormat::Json, Some(file)) => {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .with_writer(file);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        (LogFormat::Pretty, None) => {
            let layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        (LogFormat::Pretty, Some(file)) => {
            let layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(false)
                .with_writer(file);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app_for(dir: &std::path::Path) -> Router {
        let mut config = ViewerConfig::default();
        config.logs.directory = dir.to_string_lossy().into_owned();
        build_router(AppState::new(config))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_home_page() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = get_body(app_for(tmp.path()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a href="/logs">Browse log files</a>"#));
    }

    #[tokio::test]
    async fn test_health_ok() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.log"), "x").unwrap();

        let (status, body) = get_body(app_for(tmp.path()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["logs"]["files"], 1);
    }

    #[tokio::test]
    async fn test_health_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = get_body(app_for(&tmp.path().join("missing")), "/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "unhealthy");
    }

    #[tokio::test]
    async fn test_unknown_route_renders_error_page() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = get_body(app_for(tmp.path()), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
    }
}
