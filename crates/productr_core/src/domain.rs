//! crates/productr_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Foods,
    Electronics,
    Clothes,
    BeautyProducts,
    Others,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Foods,
        Category::Electronics,
        Category::Clothes,
        Category::BeautyProducts,
        Category::Others,
    ];

    /// The category label as it appears on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Foods => "Foods",
            Category::Electronics => "Electronics",
            Category::Clothes => "Clothes",
            Category::BeautyProducts => "Beauty Products",
            Category::Others => "Others",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Whether a product can be exchanged after purchase. Stored as "Yes"/"No".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeEligible {
    #[default]
    Yes,
    No,
}

impl ExchangeEligible {
    pub fn as_str(self) -> &'static str {
        match self {
            ExchangeEligible::Yes => "Yes",
            ExchangeEligible::No => "No",
        }
    }

    pub fn parse(s: &str) -> Option<ExchangeEligible> {
        match s {
            "Yes" => Some(ExchangeEligible::Yes),
            "No" => Some(ExchangeEligible::No),
            _ => None,
        }
    }
}

/// An inventory item with pricing, stock, and publish state.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub stock: i64,
    pub mrp: f64,
    pub selling_price: f64,
    pub brand: String,
    /// Opaque encoded-image strings or URLs, in insertion order.
    pub images: Vec<String>,
    pub exchange_eligible: ExchangeEligible,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Derived attribute: number of attached images. Computed, never stored.
    pub fn total_images(&self) -> usize {
        self.images.len()
    }

    /// Merges the fields present in `patch` into this product.
    /// The caller re-validates the merged result before persisting.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(mrp) = patch.mrp {
            self.mrp = mrp;
        }
        if let Some(selling_price) = patch.selling_price {
            self.selling_price = selling_price;
        }
        if let Some(brand) = &patch.brand {
            self.brand = brand.clone();
        }
        if let Some(images) = &patch.images {
            self.images = images.clone();
        }
        if let Some(exchange_eligible) = patch.exchange_eligible {
            self.exchange_eligible = exchange_eligible;
        }
        if let Some(is_published) = patch.is_published {
            self.is_published = is_published;
        }
    }

    /// Re-validates a merged product. Only the constraints that a partial
    /// update can break are checked here; enum fields are already typed.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(msg::NAME_REQUIRED.to_string());
        }
        if self.stock < 0 {
            errors.push(msg::STOCK_NEGATIVE.to_string());
        }
        if self.brand.trim().is_empty() {
            errors.push(msg::BRAND_REQUIRED.to_string());
        }
        ValidationErrors::from_vec(errors)
    }
}

/// A fully validated set of fields for a product about to be created.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub stock: i64,
    pub mrp: f64,
    pub selling_price: f64,
    pub brand: String,
    pub images: Vec<String>,
    pub exchange_eligible: ExchangeEligible,
    pub is_published: bool,
}

/// Raw, possibly incomplete product fields as received from a caller.
/// `validate` turns a draft into a `NewProduct` or reports every failure.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub stock: Option<i64>,
    pub mrp: Option<f64>,
    pub selling_price: Option<f64>,
    pub brand: Option<String>,
    pub images: Vec<String>,
    pub exchange_eligible: Option<ExchangeEligible>,
    pub is_published: Option<bool>,
}

impl ProductDraft {
    /// Checks every required field and collects all failures in field order,
    /// so the first message names the first missing/invalid field.
    pub fn validate(self) -> Result<NewProduct, ValidationErrors> {
        let mut errors = Vec::new();

        let name = match self.name {
            Some(n) if !n.trim().is_empty() => Some(n),
            _ => {
                errors.push(msg::NAME_REQUIRED.to_string());
                None
            }
        };
        let category = match self.category {
            Some(c) => Some(c),
            None => {
                errors.push(msg::CATEGORY_REQUIRED.to_string());
                None
            }
        };
        let stock = match self.stock {
            Some(s) if s >= 0 => Some(s),
            Some(_) => {
                errors.push(msg::STOCK_NEGATIVE.to_string());
                None
            }
            None => {
                errors.push(msg::STOCK_REQUIRED.to_string());
                None
            }
        };
        let mrp = match self.mrp {
            Some(m) => Some(m),
            None => {
                errors.push(msg::MRP_REQUIRED.to_string());
                None
            }
        };
        let selling_price = match self.selling_price {
            Some(p) => Some(p),
            None => {
                errors.push(msg::SELLING_PRICE_REQUIRED.to_string());
                None
            }
        };
        let brand = match self.brand {
            Some(b) if !b.trim().is_empty() => Some(b),
            _ => {
                errors.push(msg::BRAND_REQUIRED.to_string());
                None
            }
        };

        if let Some(errors) = ValidationErrors::from_vec(errors).err() {
            return Err(errors);
        }

        // All `None` arms pushed an error above, so these cannot fail.
        Ok(NewProduct {
            name: name.unwrap_or_default(),
            category: category.unwrap_or(Category::Others),
            stock: stock.unwrap_or_default(),
            mrp: mrp.unwrap_or_default(),
            selling_price: selling_price.unwrap_or_default(),
            brand: brand.unwrap_or_default(),
            images: self.images,
            exchange_eligible: self.exchange_eligible.unwrap_or_default(),
            is_published: self.is_published.unwrap_or(false),
        })
    }
}

/// Partial product fields for an update; only present fields are merged.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub stock: Option<i64>,
    pub mrp: Option<f64>,
    pub selling_price: Option<f64>,
    pub brand: Option<String>,
    pub images: Option<Vec<String>>,
    pub exchange_eligible: Option<ExchangeEligible>,
    pub is_published: Option<bool>,
}

/// One or more field-level validation failures, in field order.
#[derive(Debug, Clone)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.first())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    fn from_vec(messages: Vec<String>) -> Result<(), ValidationErrors> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { messages })
        }
    }

    /// The message for the first failing field.
    pub fn first(&self) -> &str {
        self.messages.first().map(String::as_str).unwrap_or("")
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Validation messages, kept identical to the original schema's wording.
pub mod msg {
    pub const NAME_REQUIRED: &str = "Please enter product name";
    pub const CATEGORY_REQUIRED: &str = "Please select product type";
    pub const STOCK_REQUIRED: &str = "Please enter stock quantity";
    pub const STOCK_NEGATIVE: &str = "Stock quantity cannot be negative";
    pub const MRP_REQUIRED: &str = "Please enter MRP";
    pub const SELLING_PRICE_REQUIRED: &str = "Please enter selling price";
    pub const BRAND_REQUIRED: &str = "Please enter brand name";
}

/// A user/profile record identified by email.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    /// Opaque encoded-image string.
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The mutable profile fields. An update replaces exactly these.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ProductDraft {
        ProductDraft {
            name: Some("Keyboard".to_string()),
            category: Some(Category::Electronics),
            stock: Some(25),
            mrp: Some(1999.0),
            selling_price: Some(1499.0),
            brand: Some("Clicky".to_string()),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn complete_draft_validates_with_defaults() {
        let product = complete_draft().validate().unwrap();
        assert!(!product.is_published);
        assert_eq!(product.exchange_eligible, ExchangeEligible::Yes);
        assert!(product.images.is_empty());
    }

    #[test]
    fn first_error_names_first_missing_field() {
        let mut draft = complete_draft();
        draft.name = None;
        draft.brand = None;
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.first(), msg::NAME_REQUIRED);
        assert_eq!(
            errors.messages(),
            &[msg::NAME_REQUIRED.to_string(), msg::BRAND_REQUIRED.to_string()]
        );
    }

    #[test]
    fn each_required_field_is_reported() {
        let cases: [(fn(&mut ProductDraft), &str); 6] = [
            (|d| d.name = None, msg::NAME_REQUIRED),
            (|d| d.category = None, msg::CATEGORY_REQUIRED),
            (|d| d.stock = None, msg::STOCK_REQUIRED),
            (|d| d.mrp = None, msg::MRP_REQUIRED),
            (|d| d.selling_price = None, msg::SELLING_PRICE_REQUIRED),
            (|d| d.brand = None, msg::BRAND_REQUIRED),
        ];
        for (clear, expected) in cases {
            let mut draft = complete_draft();
            clear(&mut draft);
            let errors = draft.validate().unwrap_err();
            assert_eq!(errors.first(), expected);
        }
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut draft = complete_draft();
        draft.stock = Some(-1);
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.first(), msg::STOCK_NEGATIVE);
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let mut draft = complete_draft();
        draft.name = Some("   ".to_string());
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.first(), msg::NAME_REQUIRED);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let new = complete_draft().validate().unwrap();
        let now = chrono::Utc::now();
        let mut product = Product {
            id: Uuid::new_v4(),
            name: new.name,
            category: new.category,
            stock: new.stock,
            mrp: new.mrp,
            selling_price: new.selling_price,
            brand: new.brand,
            images: new.images,
            exchange_eligible: new.exchange_eligible,
            is_published: new.is_published,
            created_at: now,
            updated_at: now,
        };

        product.apply_patch(&ProductPatch {
            stock: Some(3),
            selling_price: Some(999.0),
            ..ProductPatch::default()
        });

        assert_eq!(product.stock, 3);
        assert_eq!(product.selling_price, 999.0);
        assert_eq!(product.name, "Keyboard");
        assert!(product.validate().is_ok());

        product.apply_patch(&ProductPatch {
            stock: Some(-5),
            ..ProductPatch::default()
        });
        assert!(product.validate().is_err());
    }

    #[test]
    fn category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("Beauty Products"), Some(Category::BeautyProducts));
        assert_eq!(Category::parse("Gadgets"), None);
    }
}
