use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::Json;
use catalog::Product;
use std::sync::Arc;

/// Product detail (GET /api/products/{slug}). Drafts and inactive products
/// are reported as missing.
pub async fn product_by_slug(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> ServerResult<Json<Product>> {
    match state.store.find_by_slug(&slug).await? {
        Some(product) if product.is_active() => Ok(Json(product)),
        _ => Err(ServerError::NotFound),
    }
}
