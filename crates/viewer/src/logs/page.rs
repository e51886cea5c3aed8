//! HTML pages served by the viewer.
//!
//! Every host-supplied string (file names, error details) goes through
//! `escape_html` or `encode_path_segment` before it reaches a page. Rendered
//! log fragments from the colorizer are embedded verbatim.

use axum::http::StatusCode;
use colorizer::{escape_html, RenderMode};

use super::store::LogFileEntry;

const STYLE: &str = r#"
        body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f4f5f7; color: #222; }
        header { background: #1f2430; color: #fff; padding: 12px 24px; }
        header a { color: #fff; text-decoration: none; margin-right: 16px; }
        main { padding: 24px; }
        table { border-collapse: collapse; width: 100%; background: #fff; }
        th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid #e1e4e8; }
        .log-content, pre.log-raw { background: #1e1e1e; color: #d4d4d4; padding: 16px; border-radius: 4px;
            font-family: "JetBrains Mono", Menlo, Consolas, monospace; font-size: 13px; line-height: 1.5;
            overflow-x: auto; white-space: pre-wrap; word-break: break-all; }
        .toolbar { margin-bottom: 12px; }
        .error { background: #fff; padding: 24px; border-left: 4px solid #d0021b; }
        .muted { color: #777; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <header><a href="/">Home</a><a href="/logs">Logs</a></header>
    <main>
{body}
    </main>
</body>
</html>"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

pub fn home_page() -> String {
    layout(
        "Log Viewer",
        r#"        <h1>Log Viewer</h1>
        <ul>
            <li><a href="/logs">Browse log files</a></li>
            <li><a href="/health">Service health</a></li>
        </ul>"#,
    )
}

pub fn listing_page(entries: &[LogFileEntry]) -> String {
    let rows = if entries.is_empty() {
        r#"            <tr><td colspan="4" class="muted">No log files yet.</td></tr>"#.to_string()
    } else {
        entries
            .iter()
            .map(|entry| {
                let href = format!("/logs/{}", encode_path_segment(&entry.name));
                format!(
                    r#"            <tr><td><a href="{href}">{name}</a></td><td>{size}</td><td>{modified}</td><td><a href="{href}?raw=1">raw</a></td></tr>"#,
                    href = href,
                    name = escape_html(&entry.name),
                    size = format_size(entry.size),
                    modified = entry.modified.format("%Y-%m-%d %H:%M:%S"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"        <h1>Log files</h1>
        <table>
            <thead><tr><th>Name</th><th>Size</th><th>Modified</th><th></th></tr></thead>
            <tbody>
{rows}
            </tbody>
        </table>"#,
        rows = rows
    );
    layout("Log files", &body)
}

/// Page for one log file.
///
/// `content` is the colorizer's output: an HTML fragment in rich mode, the
/// untouched file text in raw mode (escaped here and shown preformatted).
pub fn log_view_page(name: &str, content: &str, mode: RenderMode) -> String {
    let href = format!("/logs/{}", encode_path_segment(name));
    let (toggle, block) = match mode {
        RenderMode::Raw => (
            format!(r#"<a href="{}">colorized view</a>"#, href),
            format!(r#"<pre class="log-raw">{}</pre>"#, escape_html(content)),
        ),
        RenderMode::Rich => (
            format!(r#"<a href="{}?raw=1">raw view</a>"#, href),
            format!(r#"<div class="log-content">{}</div>"#, content),
        ),
    };

    let body = format!(
        r#"        <h1>{name}</h1>
        <div class="toolbar"><a href="/logs">&larr; all logs</a> | {toggle}</div>
        {block}"#,
        name = escape_html(name),
        toggle = toggle,
        block = block,
    );
    layout(&format!("Viewing - {}", name), &body)
}

pub fn error_page(status: StatusCode, message: &str, description: &str, detail: Option<&str>) -> String {
    let detail = detail
        .map(|d| format!(r#"<pre class="muted">{}</pre>"#, escape_html(d)))
        .unwrap_or_default();

    let body = format!(
        r#"        <div class="error">
            <h1>{code}</h1>
            <h2>{message}</h2>
            <p>{description}</p>
            {detail}
            <p><a href="/">Back to home</a></p>
        </div>"#,
        code = status.as_u16(),
        message = escape_html(message),
        description = escape_html(description),
        detail = detail,
    );
    layout(&format!("{} {}", status.as_u16(), message), &body)
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Percent-encode a file name for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
