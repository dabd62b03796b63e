//! services/api/src/web/analytics.rs
//!
//! Serves the inventory summary. The computation itself is the pure
//! `productr_core::analytics::summarize`; this handler only fetches the
//! snapshot and reshapes the result for the wire.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::error;

use crate::web::dto::{store_failure, ApiFailure, SummaryResponse};
use crate::web::state::AppState;
use productr_core::analytics::summarize;
use productr_core::ports::PublishFilter;

/// Summary statistics over the whole inventory.
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    responses(
        (status = 200, description = "Inventory summary", body = SummaryResponse),
        (status = 500, description = "Store failure", body = crate::web::dto::ErrorBody)
    ),
    tag = "analytics"
)]
pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SummaryResponse>, ApiFailure> {
    let products = state
        .store
        .list_products(PublishFilter::All)
        .await
        .map_err(|e| {
            error!("GET /api/analytics/summary failed: {}", e);
            store_failure(e, "Product not found")
        })?;
    Ok(Json(summarize(&products).into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::state::AppState;
    use productr_core::domain::{Category, ProductDraft};

    async fn seed(state: &AppState, name: &str, category: Category, price: f64, stock: i64) {
        let fields = ProductDraft {
            name: Some(name.to_string()),
            category: Some(category),
            stock: Some(stock),
            mrp: Some(price),
            selling_price: Some(price),
            brand: Some("Acme".to_string()),
            ..ProductDraft::default()
        }
        .validate()
        .expect("valid draft");
        state.store.create_product(fields).await.expect("create");
    }

    #[tokio::test]
    async fn empty_inventory_yields_a_zeroed_summary() {
        let state = AppState::for_tests();
        let summary = summary_handler(State(state)).await.unwrap();

        assert_eq!(summary.0.total_products, 0);
        assert_eq!(summary.0.total_value, 0.0);
        assert_eq!(summary.0.avg_price, 0.0);
        assert!(summary.0.category_distribution.is_empty());
        assert!(summary.0.insight.is_none());
    }

    #[tokio::test]
    async fn summary_reflects_the_stored_products() {
        let state = AppState::for_tests();
        seed(&state, "Rice", Category::Foods, 10.0, 5).await;
        seed(&state, "Radio", Category::Electronics, 100.0, 1).await;

        let summary = summary_handler(State(state)).await.unwrap();
        assert_eq!(summary.0.total_products, 2);
        assert_eq!(summary.0.total_value, 150.0);
        assert_eq!(summary.0.avg_price, 25.0);
        assert_eq!(summary.0.low_stock_count, 2);
        assert_eq!(summary.0.category_distribution[0].name, "Electronics");
        assert_eq!(summary.0.category_distribution[0].value, 100.0);
    }
}
