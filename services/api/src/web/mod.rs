//! services/api/src/web/mod.rs
//!
//! The HTTP-facing layer: handlers, wire DTOs, shared state, and the
//! master OpenAPI definition.

pub mod analytics;
pub mod auth;
pub mod dto;
pub mod products;
pub mod state;
pub mod users;

use utoipa::OpenApi;

pub use analytics::summary_handler;
pub use auth::{send_otp_handler, verify_otp_handler};
pub use products::{
    create_product_handler, delete_product_handler, list_products_handler,
    toggle_publish_handler, update_product_handler,
};
pub use users::{get_user_handler, update_user_handler};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::send_otp_handler,
        auth::verify_otp_handler,
        products::list_products_handler,
        products::create_product_handler,
        products::update_product_handler,
        products::delete_product_handler,
        products::toggle_publish_handler,
        analytics::summary_handler,
        users::get_user_handler,
        users::update_user_handler,
    ),
    components(schemas(
        dto::ErrorBody,
        dto::MessageResponse,
        dto::SendOtpRequest,
        dto::VerifyOtpRequest,
        dto::VerifyOtpResponse,
        dto::ProductResponse,
        dto::CreateProductRequest,
        dto::UpdateProductRequest,
        dto::AccountResponse,
        dto::UpdateUserRequest,
        dto::SummaryResponse,
        dto::CategoryValueResponse,
        dto::AssetResponse,
    )),
    tags(
        (name = "auth", description = "Mock OTP login flow."),
        (name = "products", description = "Inventory CRUD and publish toggling."),
        (name = "analytics", description = "Summary statistics over the inventory."),
        (name = "user", description = "Profile read and update.")
    )
)]
pub struct ApiDoc;
