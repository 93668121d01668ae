use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::Json;
use catalog::{BrandSummary, Product};
use matcher::ModelMatchResult;
use std::sync::Arc;

/// Brands with at least one active product (GET /api/brands)
pub async fn list_brands(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<Vec<BrandSummary>>> {
    Ok(Json(state.store.list_brands().await?))
}

/// Active products whose brand contains `brand` (GET /api/brands/{brand})
pub async fn brand_products(
    State(state): State<Arc<ServerState>>,
    Path(brand): Path<String>,
) -> ServerResult<Json<Vec<Product>>> {
    let brand = non_blank("brand", &brand)?;
    Ok(Json(state.store.find_active_products_by_brand(brand).await?))
}

/// Compatible products for one vehicle (GET /api/brands/{brand}/{model})
pub async fn match_model(
    State(state): State<Arc<ServerState>>,
    Path((brand, model)): Path<(String, String)>,
) -> ServerResult<Json<ModelMatchResult>> {
    let brand = non_blank("brand", &brand)?;
    let model = non_blank("model", &model)?;
    let result = state.matcher.match_vehicle_model(brand, model).await?;
    Ok(Json(result))
}

fn non_blank<'a>(field: &str, value: &'a str) -> ServerResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServerError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}
