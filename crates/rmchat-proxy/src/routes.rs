//! HTTP routes: health, the `/api/*` reverse proxy, and static assets.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::ProxyState;

/// Request headers never forwarded upstream. `accept-encoding` is left to
/// reqwest, which only advertises encodings it can decode.
const SKIPPED_HEADERS: [&str; 4] = [
    "host",
    "content-length",
    "transfer-encoding",
    "accept-encoding",
];

const PREVIEW_CHARS: usize = 500;

pub fn build_router(state: ProxyState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/{*path}", any(forward))
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/main.js", get(main_js))
        .route("/styles.css", get(styles_css))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "OK", "service": "webclient"}))
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !SKIPPED_HEADERS
            .iter()
            .any(|skip| name.as_str().eq_ignore_ascii_case(skip))
        {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Forward any `/api/*` call to the request manager and relay its answer
/// as JSON with the upstream status.
async fn forward(
    State(state): State<ProxyState>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = state.target_url(&path, uri.query());
    let headers = forwarded_headers(&headers);
    tracing::info!(
        method = %method,
        url = %target,
        body_len = body.len(),
        headers = headers.len(),
        "PROXY >>>"
    );

    let started = Instant::now();
    let result = state
        .http
        .request(method.clone(), &target)
        .headers(headers)
        .body(body)
        .send()
        .await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let upstream = match result {
        Ok(resp) => resp,
        Err(e) if e.is_timeout() => {
            tracing::error!(method = %method, url = %target, elapsed_ms, error = %e, "PROXY TIMEOUT");
            return error_response(
                StatusCode::GATEWAY_TIMEOUT,
                "The agent is still processing. Please try again in a moment.".into(),
            );
        }
        Err(e) if e.is_connect() => {
            tracing::error!(method = %method, url = %target, elapsed_ms, error = %e, "PROXY CONNECT ERROR");
            return error_response(
                StatusCode::BAD_GATEWAY,
                format!("Cannot reach Request Manager at {}: {e}", state.upstream),
            );
        }
        Err(e) => {
            tracing::error!(method = %method, url = %target, elapsed_ms, error = %e, "PROXY REQUEST ERROR");
            return error_response(StatusCode::BAD_GATEWAY, format!("Proxy error: {e}"));
        }
    };

    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("?")
        .to_string();

    let text = match upstream.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(method = %method, url = %target, error = %e, "PROXY BODY ERROR");
            return error_response(StatusCode::BAD_GATEWAY, format!("Proxy error: {e}"));
        }
    };

    tracing::info!(
        method = %method,
        url = %target,
        status = status.as_u16(),
        content_type = %content_type,
        body_len = text.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "PROXY <<<"
    );
    tracing::debug!(
        preview = %text.chars().take(PREVIEW_CHARS).collect::<String>(),
        "PROXY <<< response preview"
    );

    let content = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| {
        tracing::warn!(url = %target, "upstream response is not JSON, wrapping as raw");
        json!({ "raw": text })
    });

    (status, Json(content)).into_response()
}

async fn serve_asset(state: &ProxyState, name: &str, content_type: &'static str) -> Response {
    let Some(dir) = state.static_dir.as_ref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(dir.join(name)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(e) => {
            tracing::warn!(asset = name, error = %e, "static asset unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn index(State(state): State<ProxyState>) -> Response {
    serve_asset(&state, "index.html", "text/html; charset=utf-8").await
}

async fn main_js(State(state): State<ProxyState>) -> Response {
    serve_asset(&state, "main.js", "application/javascript").await
}

async fn styles_css(State(state): State<ProxyState>) -> Response {
    serve_asset(&state, "styles.css", "text/css").await
}
