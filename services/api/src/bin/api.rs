//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{OtpRegistry, PgStore},
    config::Config,
    error::ApiError,
    web::{
        create_product_handler, delete_product_handler, get_user_handler, list_products_handler,
        send_otp_handler, state::AppState, summary_handler, toggle_publish_handler,
        update_product_handler, update_user_handler, verify_otp_handler, ApiDoc,
    },
};
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Inline base64 images travel in request bodies, so the ceiling is generous.
const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

async fn root_handler() -> &'static str {
    "Productr API is Running"
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let store = Arc::new(PgStore::new(db_pool));
    info!("Running database migrations...");
    store.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        store: store.clone(),
        otp: Arc::new(OtpRegistry::new(config.otp_ttl)),
        config: config.clone(),
    });

    // --- 4. CORS ---
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = match &config.cors_allow_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|e| ApiError::Config(api_lib::config::ConfigError::InvalidValue(
                    "CORS_ALLOW_ORIGIN".to_string(),
                    e.to_string(),
                )))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_credentials(true)
                .allow_methods(methods)
                .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any),
    };

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/api/auth/send-otp", post(send_otp_handler))
        .route("/api/auth/verify-otp", post(verify_otp_handler))
        .route("/api/products", get(list_products_handler))
        .route("/api/products", post(create_product_handler))
        .route("/api/products/{id}", put(update_product_handler))
        .route("/api/products/{id}", delete(delete_product_handler))
        .route("/api/products/{id}/publish", patch(toggle_publish_handler))
        .route("/api/analytics/summary", get(summary_handler))
        .route("/api/user/{id}", get(get_user_handler))
        .route("/api/user/{id}", put(update_user_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .route("/", get(root_handler))
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
