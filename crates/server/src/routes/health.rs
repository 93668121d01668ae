use crate::error::{ServerError, ServerResult};
use crate::state::{ServerMetadata, ServerState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    let metadata = ServerMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime_seconds(),
    };

    Json(json!({
        "status": "healthy",
        "service": "nav-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": metadata.version,
        "uptime_seconds": metadata.uptime_seconds,
    }))
}

/// Readiness check endpoint
/// Returns 200 once the catalog answers its health probe, 503 otherwise
pub async fn readiness_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let (status, catalog_status) = match state.store.health().await {
        Ok(()) => (StatusCode::OK, "ready".to_string()),
        Err(err) => {
            tracing::warn!(error = %err, "catalog health probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
    };

    let overall = if status == StatusCode::OK { "ready" } else { "not_ready" };
    let body = Json(json!({
        "status": overall,
        "service": "nav-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "components": {
            "api": "ready",
            "catalog": catalog_status,
        }
    }));

    (status, body)
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    if !state.config.metrics_enabled {
        return Err(ServerError::NotFound);
    }

    let rendered = state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        rendered,
    ))
}
