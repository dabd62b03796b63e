//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete
//! implementation of the `ProductStore` port from the `core` crate. It
//! handles all interactions with the PostgreSQL database using `sqlx`.
//!
//! Queries are runtime-checked (`query_as` over `FromRow` records) so the
//! crate builds without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use productr_core::domain::{
    Account, AccountUpdate, Category, ExchangeEligible, NewProduct, Product, ProductPatch,
};
use productr_core::ports::{ProductStore, PublishFilter, StoreError, StoreResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ProductStore` port.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a new `PgStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> StoreError {
    StoreError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

const PRODUCT_COLUMNS: &str = "id, name, category, stock, mrp, selling_price, brand, images, \
     exchange_eligible, is_published, created_at, updated_at";

#[derive(FromRow)]
struct ProductRecord {
    id: Uuid,
    name: String,
    category: String,
    stock: i64,
    mrp: f64,
    selling_price: f64,
    brand: String,
    images: Vec<String>,
    exchange_eligible: String,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRecord {
    fn to_domain(self) -> StoreResult<Product> {
        let category = Category::parse(&self.category).ok_or_else(|| {
            StoreError::Unexpected(format!("Unknown category in storage: {}", self.category))
        })?;
        let exchange_eligible =
            ExchangeEligible::parse(&self.exchange_eligible).ok_or_else(|| {
                StoreError::Unexpected(format!(
                    "Unknown exchange eligibility in storage: {}",
                    self.exchange_eligible
                ))
            })?;
        Ok(Product {
            id: self.id,
            name: self.name,
            category,
            stock: self.stock,
            mrp: self.mrp,
            selling_price: self.selling_price,
            brand: self.brand,
            images: self.images,
            exchange_eligible,
            is_published: self.is_published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct AccountRecord {
    id: Uuid,
    email: String,
    full_name: String,
    phone: Option<String>,
    bio: Option<String>,
    profile_pic: Option<String>,
    created_at: DateTime<Utc>,
}

impl AccountRecord {
    fn to_domain(self) -> Account {
        Account {
            id: self.id,
            email: self.email,
            full_name: self.full_name,
            phone: self.phone,
            bio: self.bio,
            profile_pic: self.profile_pic,
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// `ProductStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ProductStore for PgStore {
    async fn create_product(&self, fields: NewProduct) -> StoreResult<Product> {
        let sql = format!(
            "INSERT INTO products \
             (id, name, category, stock, mrp, selling_price, brand, images, \
              exchange_eligible, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let record = sqlx::query_as::<_, ProductRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(&fields.name)
            .bind(fields.category.as_str())
            .bind(fields.stock)
            .bind(fields.mrp)
            .bind(fields.selling_price)
            .bind(&fields.brand)
            .bind(&fields.images)
            .bind(fields.exchange_eligible.as_str())
            .bind(fields.is_published)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        record.to_domain()
    }

    async fn get_product(&self, id: Uuid) -> StoreResult<Product> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let record = sqlx::query_as::<_, ProductRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| StoreError::NotFound(format!("Product {} not found", id)))?;
        record.to_domain()
    }

    async fn update_product(&self, id: Uuid, patch: ProductPatch) -> StoreResult<Product> {
        // Single read-then-write, no cross-request locking: concurrent
        // updates race last-write-wins, as documented.
        let mut product = self.get_product(id).await?;
        product.apply_patch(&patch);

        let sql = format!(
            "UPDATE products SET name = $2, category = $3, stock = $4, mrp = $5, \
             selling_price = $6, brand = $7, images = $8, exchange_eligible = $9, \
             is_published = $10, updated_at = now() \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        let record = sqlx::query_as::<_, ProductRecord>(&sql)
            .bind(id)
            .bind(&product.name)
            .bind(product.category.as_str())
            .bind(product.stock)
            .bind(product.mrp)
            .bind(product.selling_price)
            .bind(&product.brand)
            .bind(&product.images)
            .bind(product.exchange_eligible.as_str())
            .bind(product.is_published)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| StoreError::NotFound(format!("Product {} not found", id)))?;
        record.to_domain()
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_products(&self, filter: PublishFilter) -> StoreResult<Vec<Product>> {
        let sql = match filter {
            PublishFilter::All => format!(
                "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
            ),
            PublishFilter::Published => format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_published = TRUE \
                 ORDER BY created_at DESC"
            ),
            PublishFilter::Unpublished => format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_published = FALSE \
                 ORDER BY created_at DESC"
            ),
        };
        let records = sqlx::query_as::<_, ProductRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        records.into_iter().map(ProductRecord::to_domain).collect()
    }

    async fn toggle_publish(&self, id: Uuid) -> StoreResult<Product> {
        let sql = format!(
            "UPDATE products SET is_published = NOT is_published, updated_at = now() \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        let record = sqlx::query_as::<_, ProductRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| StoreError::NotFound(format!("Product {} not found", id)))?;
        record.to_domain()
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let record = sqlx::query_as::<_, AccountRecord>(
            "SELECT id, email, full_name, phone, bio, profile_pic, created_at \
             FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(AccountRecord::to_domain))
    }

    async fn create_account(&self, email: &str, full_name: &str) -> StoreResult<Account> {
        let record = sqlx::query_as::<_, AccountRecord>(
            "INSERT INTO accounts (id, email, full_name) VALUES ($1, $2, $3) \
             RETURNING id, email, full_name, phone, bio, profile_pic, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if unique {
                StoreError::EmailTaken(email.to_string())
            } else {
                unexpected(e)
            }
        })?;
        Ok(record.to_domain())
    }

    async fn get_account(&self, id: Uuid) -> StoreResult<Account> {
        let record = sqlx::query_as::<_, AccountRecord>(
            "SELECT id, email, full_name, phone, bio, profile_pic, created_at \
             FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| StoreError::NotFound(format!("User {} not found", id)))?;
        Ok(record.to_domain())
    }

    async fn update_account(&self, id: Uuid, update: AccountUpdate) -> StoreResult<Account> {
        // Absent fields keep their stored value, matching a partial
        // profile submission.
        let record = sqlx::query_as::<_, AccountRecord>(
            "UPDATE accounts SET \
             full_name = COALESCE($2, full_name), \
             email = COALESCE($3, email), \
             phone = COALESCE($4, phone), \
             bio = COALESCE($5, bio), \
             profile_pic = COALESCE($6, profile_pic) \
             WHERE id = $1 \
             RETURNING id, email, full_name, phone, bio, profile_pic, created_at",
        )
        .bind(id)
        .bind(update.full_name)
        .bind(update.email)
        .bind(update.phone)
        .bind(update.bio)
        .bind(update.profile_pic)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if unique {
                StoreError::EmailTaken("email already in use".to_string())
            } else {
                unexpected(e)
            }
        })?
        .ok_or_else(|| StoreError::NotFound(format!("User {} not found", id)))?;
        Ok(record.to_domain())
    }
}
