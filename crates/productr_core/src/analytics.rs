//! crates/productr_core/src/analytics.rs
//!
//! The pure aggregation function over a product list. Deterministic and
//! side-effect-free: identical input order and values always produce
//! identical output, including tie-break order (sorts are stable).

use crate::domain::{Category, Product};

/// Products with stock below this count are flagged for restocking.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many products the top-assets list is truncated to.
const TOP_ASSETS_LIMIT: usize = 10;

/// Asset value held in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub category: Category,
    pub value: f64,
}

/// One product annotated with its computed asset value.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub name: String,
    pub stock: i64,
    pub price: f64,
    pub value: f64,
}

/// Summary statistics over an inventory snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_value: f64,
    pub total_stock_units: i64,
    pub avg_price: f64,
    pub low_stock_count: usize,
    /// Per-category asset value, sorted descending by value.
    pub category_distribution: Vec<CategoryValue>,
    /// The highest-value products, descending, at most ten.
    pub top_assets: Vec<AssetEntry>,
    pub insight: Option<String>,
}

fn asset_value(product: &Product) -> f64 {
    product.selling_price * product.stock as f64
}

/// Computes summary statistics for an ordered product list.
///
/// An empty input yields a zeroed summary with no insight text and no
/// divide-by-zero on the average price.
pub fn summarize(products: &[Product]) -> InventorySummary {
    if products.is_empty() {
        return InventorySummary::default();
    }

    let total_products = products.len();
    let total_value: f64 = products.iter().map(asset_value).sum();
    let total_stock_units: i64 = products.iter().map(|p| p.stock).sum();
    let avg_price = if total_stock_units == 0 {
        0.0
    } else {
        total_value / total_stock_units as f64
    };
    let low_stock_count = products
        .iter()
        .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
        .count();

    // Group by category in first-seen order, then stable-sort by value so
    // ties keep that order.
    let mut category_distribution: Vec<CategoryValue> = Vec::new();
    for product in products {
        match category_distribution
            .iter_mut()
            .find(|entry| entry.category == product.category)
        {
            Some(entry) => entry.value += asset_value(product),
            None => category_distribution.push(CategoryValue {
                category: product.category,
                value: asset_value(product),
            }),
        }
    }
    category_distribution.sort_by(|a, b| b.value.total_cmp(&a.value));

    let mut top_assets: Vec<AssetEntry> = products
        .iter()
        .map(|p| AssetEntry {
            name: p.name.clone(),
            stock: p.stock,
            price: p.selling_price,
            value: asset_value(p),
        })
        .collect();
    top_assets.sort_by(|a, b| b.value.total_cmp(&a.value));
    top_assets.truncate(TOP_ASSETS_LIMIT);

    let top_category = category_distribution
        .first()
        .map(|entry| entry.category.as_str())
        .unwrap_or("None");
    let insight = Some(format!(
        "Your inventory is dominated by **{}**, which accounts for majority of your asset value. \
         You have **{}** products needing immediate restocking.",
        top_category, low_stock_count
    ));

    InventorySummary {
        total_products,
        total_value,
        total_stock_units,
        avg_price,
        low_stock_count,
        category_distribution,
        top_assets,
        insight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn product(name: &str, category: Category, selling_price: f64, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            stock,
            mrp: selling_price,
            selling_price,
            brand: "Acme".to_string(),
            images: Vec::new(),
            exchange_eligible: Default::default(),
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_input_yields_zeroed_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.avg_price, 0.0);
        assert_eq!(summary.low_stock_count, 0);
        assert!(summary.category_distribution.is_empty());
        assert!(summary.top_assets.is_empty());
        assert!(summary.insight.is_none());
    }

    #[test]
    fn two_product_fixture_matches_expected_totals() {
        let products = [
            product("Rice", Category::Foods, 10.0, 5),
            product("Radio", Category::Electronics, 100.0, 1),
        ];
        let summary = summarize(&products);

        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.total_value, 150.0);
        assert_eq!(summary.avg_price, 25.0);
        assert_eq!(summary.low_stock_count, 2);
        assert_eq!(summary.category_distribution.len(), 2);
        assert_eq!(summary.category_distribution[0].category, Category::Electronics);
        assert_eq!(summary.category_distribution[0].value, 100.0);
        assert_eq!(summary.category_distribution[1].category, Category::Foods);
        assert_eq!(summary.category_distribution[1].value, 50.0);
    }

    #[test]
    fn zero_total_stock_guards_average() {
        let products = [product("Ghost", Category::Others, 500.0, 0)];
        let summary = summarize(&products);
        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.avg_price, 0.0);
    }

    #[test]
    fn top_assets_sorted_descending_and_truncated() {
        let products: Vec<Product> = (0..12)
            .map(|i| product(&format!("p{}", i), Category::Others, 1.0, i))
            .collect();
        let summary = summarize(&products);

        assert_eq!(summary.top_assets.len(), 10);
        assert_eq!(summary.top_assets[0].name, "p11");
        assert_eq!(summary.top_assets[0].value, 11.0);
        let values: Vec<f64> = summary.top_assets.iter().map(|a| a.value).collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(values, sorted);
    }

    #[test]
    fn equal_values_keep_input_order() {
        let products = [
            product("first", Category::Foods, 10.0, 2),
            product("second", Category::Clothes, 4.0, 5),
            product("third", Category::Electronics, 20.0, 1),
        ];
        let summary = summarize(&products);

        let names: Vec<&str> = summary.top_assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        let categories: Vec<Category> = summary
            .category_distribution
            .iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(
            categories,
            [Category::Foods, Category::Clothes, Category::Electronics]
        );
    }

    #[test]
    fn insight_names_top_category_and_low_stock_count() {
        let products = [
            product("Rice", Category::Foods, 10.0, 5),
            product("Radio", Category::Electronics, 100.0, 1),
        ];
        let summary = summarize(&products);
        let insight = summary.insight.unwrap();
        assert!(insight.contains("**Electronics**"));
        assert!(insight.contains("**2**"));
    }
}
