//! API route handlers
//!
//! - `health`: liveness, readiness and Prometheus metrics
//! - `brands`: brand listing, per-brand products and model compatibility
//! - `products`: product detail by slug

pub mod brands;
pub mod health;
pub mod products;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info (GET /)
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "navcompat",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/brands",
            "/api/brands/{brand}",
            "/api/brands/{brand}/{model}",
            "/api/products/{slug}",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
