//! services/api/src/web/products.rs
//!
//! Product CRUD and the publish toggle. Handlers map 1:1 to store
//! operations; validation runs at this boundary before anything is
//! persisted.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::web::dto::{
    fail, store_failure, validation_failure, ApiFailure, CreateProductRequest, ListProductsQuery,
    MessageResponse, ProductResponse, UpdateProductRequest,
};
use crate::web::state::AppState;
use productr_core::ports::PublishFilter;

const PRODUCT_NOT_FOUND: &str = "Product not found";

fn parse_filter(query: &ListProductsQuery) -> PublishFilter {
    match query.published.as_deref() {
        Some("true") => PublishFilter::Published,
        Some("false") => PublishFilter::Unpublished,
        _ => PublishFilter::All,
    }
}

/// List products, newest first, optionally filtered by publish state.
#[utoipa::path(
    get,
    path = "/api/products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Matching products", body = [ProductResponse]),
        (status = 500, description = "Store failure", body = crate::web::dto::ErrorBody)
    ),
    tag = "products"
)]
pub async fn list_products_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, ApiFailure> {
    let products = state
        .store
        .list_products(parse_filter(&query))
        .await
        .map_err(|e| {
            error!("GET /api/products failed: {}", e);
            store_failure(e, PRODUCT_NOT_FOUND)
        })?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Create a product. New products are drafts unless the body says otherwise.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failure", body = crate::web::dto::ErrorBody),
        (status = 500, description = "Store failure", body = crate::web::dto::ErrorBody)
    ),
    tag = "products"
)]
pub async fn create_product_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiFailure> {
    let draft = req
        .into_draft()
        .map_err(|body| (StatusCode::BAD_REQUEST, Json(body)))?;
    let fields = draft.validate().map_err(|e| validation_failure(&e))?;

    let product = state.store.create_product(fields).await.map_err(|e| {
        error!("POST /api/products failed: {}", e);
        store_failure(e, PRODUCT_NOT_FOUND)
    })?;
    info!("Product created: {}", product.name);

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Merge partial fields into a product, re-validating the merged result.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Validation failure", body = crate::web::dto::ErrorBody),
        (status = 404, description = "No such product", body = crate::web::dto::ErrorBody),
        (status = 500, description = "Store failure", body = crate::web::dto::ErrorBody)
    ),
    tag = "products"
)]
pub async fn update_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiFailure> {
    let patch = req
        .into_patch()
        .map_err(|body| (StatusCode::BAD_REQUEST, Json(body)))?;

    // Validate the merged result before touching storage.
    let mut merged = state
        .store
        .get_product(id)
        .await
        .map_err(|e| store_failure(e, PRODUCT_NOT_FOUND))?;
    merged.apply_patch(&patch);
    merged.validate().map_err(|e| validation_failure(&e))?;

    let product = state.store.update_product(id, patch).await.map_err(|e| {
        error!("PUT /api/products/{} failed: {}", id, e);
        store_failure(e, PRODUCT_NOT_FOUND)
    })?;
    info!("Product updated: {} (ID: {})", product.name, product.id);

    Ok(Json(product.into()))
}

/// Hard-delete a product.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product removed", body = MessageResponse),
        (status = 404, description = "No such product", body = crate::web::dto::ErrorBody),
        (status = 500, description = "Store failure", body = crate::web::dto::ErrorBody)
    ),
    tag = "products"
)]
pub async fn delete_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiFailure> {
    let deleted = state.store.delete_product(id).await.map_err(|e| {
        error!("DELETE /api/products/{} failed: {}", id, e);
        store_failure(e, PRODUCT_NOT_FOUND)
    })?;
    if !deleted {
        info!("Product delete failed (not found): {}", id);
        return Err(fail(StatusCode::NOT_FOUND, PRODUCT_NOT_FOUND));
    }
    info!("Product deleted: {}", id);

    Ok(Json(MessageResponse::new("Product has been deleted...")))
}

/// Flip the published flag. Concurrent flips race last-write-wins.
#[utoipa::path(
    patch,
    path = "/api/products/{id}/publish",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 404, description = "No such product", body = crate::web::dto::ErrorBody),
        (status = 500, description = "Store failure", body = crate::web::dto::ErrorBody)
    ),
    tag = "products"
)]
pub async fn toggle_publish_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiFailure> {
    let product = state
        .store
        .toggle_publish(id)
        .await
        .map_err(|e| store_failure(e, PRODUCT_NOT_FOUND))?;
    info!(
        "Product publish status changed: {} -> {}",
        product.name,
        if product.is_published { "Published" } else { "Draft" }
    );

    Ok(Json(product.into()))
}
