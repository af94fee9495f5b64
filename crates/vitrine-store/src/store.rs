//! # Product Store
//!
//! The in-memory product collection and its mutation operations.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Requests Share the Collection                    │
//! │                                                                         │
//! │  insert / update / delete / bulk_*                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write lock ── mutate Vec<Product> ── release                          │
//! │                                                                         │
//! │  list / catalog                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read lock ── clone snapshot ── release                                │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  vitrine_core::query(&snapshot, ..)   (no lock held)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The engines never see the lock: they only receive `&[Product]`.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use vitrine_core::discount::Catalog;
use vitrine_core::validation::{ProductDraft, ProductPatch};
use vitrine_core::{query, PageResult, Product, ProductId, ProductStatus, QueryDescriptor};

use crate::error::{StoreError, StoreResult};

/// Shared handle to the product collection.
///
/// ## Usage
/// ```rust,ignore
/// let store = ProductStore::new(seed::load_seed_file("products.json")?);
///
/// // Query a page
/// let page = store.list(&QueryDescriptor::default().search("lamp")).await;
///
/// // Mutate
/// let product = store.update(3, patch).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductStore {
    /// Creates a store holding `products`, in the given order.
    pub fn new(products: Vec<Product>) -> Self {
        ProductStore {
            products: Arc::new(RwLock::new(products)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a copy of the whole collection, in storage order.
    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Runs the query engine over a snapshot of the collection.
    pub async fn list(&self, descriptor: &QueryDescriptor) -> PageResult<Product> {
        let snapshot = self.snapshot().await;
        let page = query(&snapshot, descriptor);

        debug!(
            total = page.total,
            page = page.page,
            page_size = page.page_size,
            pages = page.page_count(),
            returned = page.data.len(),
            "Listed products"
        );
        page
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Some(Product)` - Product found
    /// * `None` - No product with that id
    pub async fn get_by_id(&self, id: ProductId) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Validates `draft` and appends it with id `max(existing) + 1`.
    ///
    /// `createdAt` defaults to now when the draft doesn't carry one. A draft
    /// that fails validation leaves the collection untouched.
    pub async fn insert(&self, draft: ProductDraft) -> StoreResult<Product> {
        let new_product = draft.validate()?;

        let mut products = self.products.write().await;
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = new_product.into_product(next_id, Utc::now());
        products.push(product.clone());

        debug!(id = product.id, name = %product.name, "Inserted product");
        Ok(product)
    }

    /// Merges `patch` into the product with `id`.
    ///
    /// Existence is checked first: an unknown id is `NotFound` even if the
    /// patch is also invalid.
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        patch.validate()?;
        let empty = patch.is_empty();
        patch.apply(product);

        debug!(id, empty, "Updated product");
        Ok(product.clone())
    }

    /// Removes the product with `id`.
    pub async fn delete(&self, id: ProductId) -> StoreResult<()> {
        let mut products = self.products.write().await;
        let idx = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        products.remove(idx);

        debug!(id, "Deleted product");
        Ok(())
    }

    /// Removes every product whose id is in `ids`. Unknown ids are ignored.
    ///
    /// ## Returns
    /// The number of products removed.
    ///
    /// ## Errors
    /// [`StoreError::InvalidRequest`] if `ids` is empty.
    pub async fn bulk_delete(&self, ids: &[ProductId]) -> StoreResult<usize> {
        if ids.is_empty() {
            return Err(StoreError::invalid_request("ids array is required"));
        }
        let wanted: HashSet<ProductId> = ids.iter().copied().collect();

        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| !wanted.contains(&p.id));
        let removed = before - products.len();

        debug!(requested = ids.len(), removed, "Bulk deleted products");
        Ok(removed)
    }

    /// Sets `status` on every product whose id is in `ids`. Unknown ids are
    /// ignored; an empty list is a no-op.
    ///
    /// ## Returns
    /// The number of products actually updated.
    pub async fn bulk_update_status(&self, ids: &[ProductId], status: ProductStatus) -> usize {
        let wanted: HashSet<ProductId> = ids.iter().copied().collect();

        let mut products = self.products.write().await;
        let mut updated = 0;
        for product in products.iter_mut().filter(|p| wanted.contains(&p.id)) {
            product.status = status;
            updated += 1;
        }

        debug!(requested = ids.len(), updated, status = %status, "Bulk updated status");
        updated
    }

    /// Builds a discount-engine catalog from the current collection.
    pub async fn catalog(&self) -> Catalog {
        Catalog::from_products(&self.products.read().await)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
