//! services/api/src/web/dto.rs
//!
//! Request and response payloads for the REST API, plus the shared error
//! body. These are the wire shapes; the pure domain types live in
//! `productr_core` and are converted at this boundary.

use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use productr_core::analytics::InventorySummary;
use productr_core::domain::{
    Account, Category, ExchangeEligible, Product, ProductDraft, ProductPatch, ValidationErrors,
};
use productr_core::ports::StoreError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const EXCHANGE_INVALID: &str = "Exchange eligibility must be Yes or No";
pub const CATEGORY_INVALID: &str = "Please select product type";

//=========================================================================================
// Error Body
//=========================================================================================

/// The JSON error shape: a message, plus the full failure list for
/// validation errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            message: errors.first().to_string(),
            errors: Some(errors.messages().to_vec()),
        }
    }

    pub fn validation_single(message: &str) -> Self {
        Self {
            message: message.to_string(),
            errors: Some(vec![message.to_string()]),
        }
    }
}

/// The failure half of every handler result.
pub type ApiFailure = (StatusCode, Json<ErrorBody>);

pub fn fail(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (status, Json(ErrorBody::message(message)))
}

pub fn validation_failure(errors: &ValidationErrors) -> ApiFailure {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::validation(errors)))
}

/// Maps a store error to an HTTP failure. `not_found_message` overrides the
/// store's own wording for the 404 case; unexpected store errors pass
/// through as 500 with the message intact.
pub fn store_failure(err: StoreError, not_found_message: &str) -> ApiFailure {
    match err {
        StoreError::NotFound(_) => fail(StatusCode::NOT_FOUND, not_found_message),
        StoreError::EmailTaken(_) => fail(StatusCode::BAD_REQUEST, err.to_string()),
        StoreError::Unexpected(message) => fail(StatusCode::INTERNAL_SERVER_ERROR, message),
    }
}

//=========================================================================================
// Shared Responses
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

//=========================================================================================
// Products
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub stock: i64,
    pub mrp: f64,
    pub selling_price: f64,
    pub brand: String,
    pub images: Vec<String>,
    pub exchange_eligible: String,
    pub is_published: bool,
    /// Derived: number of attached images.
    pub total_images: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        let total_images = p.total_images();
        Self {
            id: p.id,
            name: p.name,
            category: p.category.as_str().to_string(),
            stock: p.stock,
            mrp: p.mrp,
            selling_price: p.selling_price,
            brand: p.brand,
            total_images,
            images: p.images,
            exchange_eligible: p.exchange_eligible.as_str().to_string(),
            is_published: p.is_published,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub mrp: Option<f64>,
    pub selling_price: Option<f64>,
    pub brand: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub exchange_eligible: Option<String>,
    pub is_published: Option<bool>,
}

impl CreateProductRequest {
    /// Converts the raw body into a draft for validation. An unknown
    /// category label is treated as "not selected" so the validator can
    /// report every failure in field order.
    pub fn into_draft(self) -> Result<ProductDraft, ErrorBody> {
        let exchange_eligible = match self.exchange_eligible.as_deref() {
            None => None,
            Some(s) => Some(
                ExchangeEligible::parse(s)
                    .ok_or_else(|| ErrorBody::validation_single(EXCHANGE_INVALID))?,
            ),
        };
        Ok(ProductDraft {
            name: self.name,
            category: self.category.as_deref().and_then(Category::parse),
            stock: self.stock,
            mrp: self.mrp,
            selling_price: self.selling_price,
            brand: self.brand,
            images: self.images,
            exchange_eligible,
            is_published: self.is_published,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub mrp: Option<f64>,
    pub selling_price: Option<f64>,
    pub brand: Option<String>,
    pub images: Option<Vec<String>>,
    pub exchange_eligible: Option<String>,
    pub is_published: Option<bool>,
}

impl UpdateProductRequest {
    /// Converts the raw body into a patch. Unlike creation, an unknown
    /// enum label here is an outright error: absent means "leave as is",
    /// so an invalid value cannot fall back to absent.
    pub fn into_patch(self) -> Result<ProductPatch, ErrorBody> {
        let category = match self.category.as_deref() {
            None => None,
            Some(s) => Some(
                Category::parse(s)
                    .ok_or_else(|| ErrorBody::validation_single(CATEGORY_INVALID))?,
            ),
        };
        let exchange_eligible = match self.exchange_eligible.as_deref() {
            None => None,
            Some(s) => Some(
                ExchangeEligible::parse(s)
                    .ok_or_else(|| ErrorBody::validation_single(EXCHANGE_INVALID))?,
            ),
        };
        Ok(ProductPatch {
            name: self.name,
            category,
            stock: self.stock,
            mrp: self.mrp,
            selling_price: self.selling_price,
            brand: self.brand,
            images: self.images,
            exchange_eligible,
            is_published: self.is_published,
        })
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    /// "true" for published only, "false" for drafts only, anything else
    /// (or absent) for all.
    pub published: Option<String>,
}

//=========================================================================================
// Accounts
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            email: a.email,
            full_name: a.full_name,
            phone: a.phone,
            bio: a.bio,
            profile_pic: a.profile_pic,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
}

//=========================================================================================
// Auth
//=========================================================================================

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub message: String,
    /// Opaque bearer value; not a real signed credential.
    pub token: String,
    pub user: AccountResponse,
}

//=========================================================================================
// Analytics
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryValueResponse {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssetResponse {
    pub name: String,
    pub stock: i64,
    pub price: f64,
    pub value: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_products: usize,
    pub total_value: f64,
    pub total_stock_units: i64,
    pub avg_price: f64,
    pub low_stock_count: usize,
    pub category_distribution: Vec<CategoryValueResponse>,
    pub top_assets: Vec<AssetResponse>,
    pub insight: Option<String>,
}

impl From<InventorySummary> for SummaryResponse {
    fn from(s: InventorySummary) -> Self {
        Self {
            total_products: s.total_products,
            total_value: s.total_value,
            total_stock_units: s.total_stock_units,
            avg_price: s.avg_price,
            low_stock_count: s.low_stock_count,
            category_distribution: s
                .category_distribution
                .into_iter()
                .map(|c| CategoryValueResponse {
                    name: c.category.as_str().to_string(),
                    value: c.value,
                })
                .collect(),
            top_assets: s
                .top_assets
                .into_iter()
                .map(|a| AssetResponse {
                    name: a.name,
                    stock: a.stock,
                    price: a.price,
                    value: a.value,
                })
                .collect(),
            insight: s.insight,
        }
    }
}
