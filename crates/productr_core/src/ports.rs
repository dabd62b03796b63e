//! crates/productr_core/src/ports.rs
//!
//! Defines the store contract (trait) for the application's core logic.
//! The trait forms the boundary of the hexagonal architecture, keeping the
//! core independent of the concrete persistence layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, AccountUpdate, NewProduct, Product, ProductPatch};

/// A generic error type for all store operations.
/// This abstracts away the specific errors of the underlying database.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An account already exists for {0}")]
    EmailTaken(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Listing filter for products: everything, published only, or drafts only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishFilter {
    #[default]
    All,
    Published,
    Unpublished,
}

impl PublishFilter {
    pub fn matches(self, is_published: bool) -> bool {
        match self {
            PublishFilter::All => true,
            PublishFilter::Published => is_published,
            PublishFilter::Unpublished => !is_published,
        }
    }
}

/// Durable storage for Account and Product entities.
///
/// Callers validate product fields before persisting; the store enforces
/// the structural invariants it owns (email uniqueness, id lookup).
#[async_trait]
pub trait ProductStore: Send + Sync {
    // --- Products ---
    async fn create_product(&self, fields: NewProduct) -> StoreResult<Product>;

    async fn get_product(&self, id: Uuid) -> StoreResult<Product>;

    /// Merges `patch` into the stored product. The merged result has been
    /// re-validated by the caller before this is invoked.
    async fn update_product(&self, id: Uuid, patch: ProductPatch) -> StoreResult<Product>;

    /// Removes the product. Absence of the id is not a store-level error;
    /// the returned bool reports whether anything was removed.
    async fn delete_product(&self, id: Uuid) -> StoreResult<bool>;

    /// Returns products matching `filter`, newest-created-first.
    async fn list_products(&self, filter: PublishFilter) -> StoreResult<Vec<Product>>;

    /// Flips the published flag. Last write wins under concurrency.
    async fn toggle_publish(&self, id: Uuid) -> StoreResult<Product>;

    // --- Accounts ---
    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    /// Creates an account; fails with `EmailTaken` if one already exists
    /// for this email.
    async fn create_account(&self, email: &str, full_name: &str) -> StoreResult<Account>;

    async fn get_account(&self, id: Uuid) -> StoreResult<Account>;

    /// Replaces the mutable profile fields that are present in `update`.
    async fn update_account(&self, id: Uuid, update: AccountUpdate) -> StoreResult<Account>;
}
