//! services/api/src/adapters/memory.rs
//!
//! An in-memory implementation of the `ProductStore` port, used by the
//! handler tests. Semantics mirror the Postgres adapter, including the
//! last-write-wins behavior under concurrent mutation.

use async_trait::async_trait;
use chrono::Utc;
use productr_core::domain::{Account, AccountUpdate, NewProduct, Product, ProductPatch};
use productr_core::ports::{ProductStore, PublishFilter, StoreError, StoreResult};
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    /// Insertion order; newest entries are at the back.
    products: Vec<Product>,
    accounts: Vec<Account>,
}

/// A mutex-guarded store for tests and local experiments.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn create_product(&self, fields: NewProduct) -> StoreResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: fields.name,
            category: fields.category,
            stock: fields.stock,
            mrp: fields.mrp,
            selling_price: fields.selling_price,
            brand: fields.brand,
            images: fields.images,
            exchange_eligible: fields.exchange_eligible,
            is_published: fields.is_published,
            created_at: now,
            updated_at: now,
        };
        self.lock().products.push(product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: Uuid) -> StoreResult<Product> {
        self.lock()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Product {} not found", id)))
    }

    async fn update_product(&self, id: Uuid, patch: ProductPatch) -> StoreResult<Product> {
        let mut inner = self.lock();
        let product = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Product {} not found", id)))?;
        product.apply_patch(&patch);
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.lock();
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        Ok(inner.products.len() < before)
    }

    async fn list_products(&self, filter: PublishFilter) -> StoreResult<Vec<Product>> {
        let inner = self.lock();
        // Reverse insertion order == newest-created-first.
        Ok(inner
            .products
            .iter()
            .rev()
            .filter(|p| filter.matches(p.is_published))
            .cloned()
            .collect())
    }

    async fn toggle_publish(&self, id: Uuid) -> StoreResult<Product> {
        let mut inner = self.lock();
        let product = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Product {} not found", id)))?;
        product.is_published = !product.is_published;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn create_account(&self, email: &str, full_name: &str) -> StoreResult<Account> {
        let mut inner = self.lock();
        if inner.accounts.iter().any(|a| a.email == email) {
            return Err(StoreError::EmailTaken(email.to_string()));
        }
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            phone: None,
            bio: None,
            profile_pic: None,
            created_at: Utc::now(),
        };
        inner.accounts.push(account.clone());
        Ok(account)
    }

    async fn get_account(&self, id: Uuid) -> StoreResult<Account> {
        self.lock()
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", id)))
    }

    async fn update_account(&self, id: Uuid, update: AccountUpdate) -> StoreResult<Account> {
        let mut inner = self.lock();
        if let Some(email) = &update.email {
            if inner.accounts.iter().any(|a| a.email == *email && a.id != id) {
                return Err(StoreError::EmailTaken(email.clone()));
            }
        }
        let account = inner
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", id)))?;
        if let Some(full_name) = update.full_name {
            account.full_name = full_name;
        }
        if let Some(email) = update.email {
            account.email = email;
        }
        if let Some(phone) = update.phone {
            account.phone = Some(phone);
        }
        if let Some(bio) = update.bio {
            account.bio = Some(bio);
        }
        if let Some(profile_pic) = update.profile_pic {
            account.profile_pic = Some(profile_pic);
        }
        Ok(account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use productr_core::domain::{Category, ProductDraft};
    use std::sync::Arc;

    fn draft(name: &str, published: Option<bool>) -> NewProduct {
        ProductDraft {
            name: Some(name.to_string()),
            category: Some(Category::Electronics),
            stock: Some(5),
            mrp: Some(100.0),
            selling_price: Some(80.0),
            brand: Some("Acme".to_string()),
            is_published: published,
            ..ProductDraft::default()
        }
        .validate()
        .expect("valid draft")
    }

    #[tokio::test]
    async fn toggle_twice_is_an_involution() {
        let store = MemoryStore::new();
        let product = store.create_product(draft("Radio", None)).await.unwrap();
        assert!(!product.is_published);

        let once = store.toggle_publish(product.id).await.unwrap();
        assert!(once.is_published);
        let twice = store.toggle_publish(product.id).await.unwrap();
        assert_eq!(twice.is_published, product.is_published);
    }

    #[tokio::test]
    async fn publish_filters_partition_the_full_listing() {
        let store = MemoryStore::new();
        for i in 0..6 {
            store
                .create_product(draft(&format!("p{}", i), Some(i % 2 == 0)))
                .await
                .unwrap();
        }

        let all = store.list_products(PublishFilter::All).await.unwrap();
        let published = store.list_products(PublishFilter::Published).await.unwrap();
        let unpublished = store
            .list_products(PublishFilter::Unpublished)
            .await
            .unwrap();

        assert_eq!(all.len(), published.len() + unpublished.len());
        for p in &published {
            assert!(p.is_published);
            assert!(!unpublished.iter().any(|u| u.id == p.id));
        }
        let mut ids: Vec<Uuid> = published.iter().chain(&unpublished).map(|p| p.id).collect();
        ids.sort();
        let mut all_ids: Vec<Uuid> = all.iter().map(|p| p.id).collect();
        all_ids.sort();
        assert_eq!(ids, all_ids);
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let store = MemoryStore::new();
        store.create_product(draft("older", None)).await.unwrap();
        store.create_product(draft("newer", None)).await.unwrap();

        let all = store.list_products(PublishFilter::All).await.unwrap();
        assert_eq!(all[0].name, "newer");
        assert_eq!(all[1].name, "older");
    }

    #[tokio::test]
    async fn delete_is_idempotent_at_the_store_level() {
        let store = MemoryStore::new();
        let product = store.create_product(draft("Radio", None)).await.unwrap();

        assert!(store.delete_product(product.id).await.unwrap());
        assert!(!store.delete_product(product.id).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store.create_account("a@example.com", "a").await.unwrap();
        let err = store.create_account("a@example.com", "a").await.unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_toggles_end_in_a_valid_state() {
        let store = Arc::new(MemoryStore::new());
        let product = store.create_product(draft("Radio", None)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..2 {
            let store = store.clone();
            let id = product.id;
            handles.push(tokio::spawn(async move {
                store.toggle_publish(id).await
            }));
        }
        for handle in handles {
            handle.await.expect("join").expect("toggle");
        }

        // Last write wins; either publish state is a legal outcome, but the
        // entry itself must survive uncorrupted.
        let after = store.get_product(product.id).await.unwrap();
        assert_eq!(after.id, product.id);
        assert_eq!(after.name, "Radio");
    }
}
